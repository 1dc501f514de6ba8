//! lldb expressions and log templates shared by the generated breakpoints.
//!
//! Strings here end up inside XML attributes verbatim, so any quote is
//! already written as `&quot;`.

use crate::breakpoint::escape_markup;

pub const INDENTATION_VARIABLE: &str = "$indentationString";
pub const IGNORE_EXIT_VARIABLE: &str = "$ignoreBreakpointAtMethodEnd";

/// One call level of indentation.
pub const INDENT_UNIT: &str = "    ";

pub const INIT_INDENTATION: &str =
    "expr NSMutableString *$indentationString= [@&quot;&quot; mutableCopy]";
pub const INIT_IGNORE_EXIT: &str = "expr BOOL $ignoreBreakpointAtMethodEnd= false";

pub const GROW_INDENTATION: &str =
    "expr (void)[$indentationString appendString:@&quot;    &quot;]";

/// Shrinks by one unit unless an explicit return already did.
pub const SHRINK_INDENTATION: &str = "expr if($ignoreBreakpointAtMethodEnd == false) { \
(void)[$indentationString setString:[$indentationString \
substringToIndex:(int)(float)fmax($indentationString.length-4, 0)]]; }";

pub const SET_IGNORE_EXIT: &str = "expr (void)($ignoreBreakpointAtMethodEnd = true)";

/// Clears the flag and skips the breakpoint if it was set, fires otherwise.
pub const FALL_THROUGH_CONDITION: &str =
    "$ignoreBreakpointAtMethodEnd ? $ignoreBreakpointAtMethodEnd = false : true";

const INDENT_PREFIX: &str = "@$indentationString.UTF8String@";

/// `entering method <name> <p>: @<p>@ ...`
pub fn entry_message(method: &str, parameters: &[String]) -> String {
    let mut message = format!("{}entering method {}", INDENT_PREFIX, escape_markup(method));
    for parameter in parameters {
        let name = escape_markup(parameter);
        message.push_str(&format!(" {}: @{}@", name, name));
    }
    message
}

/// `returning from method <name> (line <n>)[, value: @<ref>@]`
pub fn exit_message(method: &str, line: u32, referenced_name: Option<&str>) -> String {
    let mut message = format!(
        "{}returning from method {} (line {})",
        INDENT_PREFIX,
        escape_markup(method),
        line
    );
    if let Some(name) = referenced_name {
        message.push_str(&format!(", value: @{}@", escape_markup(name)));
    }
    message
}
