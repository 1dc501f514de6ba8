use super::templates::{
    entry_message, exit_message, FALL_THROUGH_CONDITION, GROW_INDENTATION, SET_IGNORE_EXIT,
    SHRINK_INDENTATION,
};
use crate::breakpoint::{escape_markup, timestamp_now, BreakpointRecord, SourceRange};
use crate::source::{MethodDescription, ReturnStatement};

/// Builds the call-tracing breakpoints for a method body.
#[derive(Debug, Clone, Copy)]
pub struct Instrumenter {
    clock: fn() -> i64,
}

impl Default for Instrumenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Instrumenter {
    pub fn new() -> Self {
        Self {
            clock: timestamp_now,
        }
    }

    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self { clock }
    }

    fn record(&self, range: SourceRange, method: &str) -> BreakpointRecord {
        let mut bp = BreakpointRecord::with_timestamp((self.clock)());
        bp.set_source_range(range);
        bp.set_landmark_name(escape_markup(method));
        bp
    }

    /// Logs the call with its arguments and grows the indentation.
    pub fn entry_breakpoint(&self, method: &MethodDescription, body: &SourceRange) -> BreakpointRecord {
        let mut bp = self.record(body.clone(), &method.display_name);
        bp.add_log_action(entry_message(&method.display_name, &method.parameters));
        bp.add_command_action(GROW_INDENTATION);
        bp
    }

    /// Logs the exit, shrinks the indentation and marks the exit as handled.
    pub fn return_breakpoint(&self, method: &MethodDescription, ret: &ReturnStatement) -> BreakpointRecord {
        let mut bp = self.record(ret.range.clone(), &method.display_name);
        bp.add_log_action(exit_message(
            &method.display_name,
            ret.range.starting_line_number,
            ret.referenced_name.as_deref(),
        ));
        bp.add_command_action(SHRINK_INDENTATION);
        bp.add_command_action(SET_IGNORE_EXIT);
        bp
    }

    /// Sits on the closing line; only fires when no return handled the exit.
    pub fn fall_through_breakpoint(&self, method: &MethodDescription, body: &SourceRange) -> BreakpointRecord {
        let range = body.at_closing_line();
        let line = range.ending_line_number;
        let mut bp = self.record(range, &method.display_name);
        bp.set_condition(FALL_THROUGH_CONDITION);
        bp.add_log_action(exit_message(&method.display_name, line, None));
        bp.add_command_action(SHRINK_INDENTATION);
        bp
    }

    /// Entry, every return in traversal order, then the fall-through exit.
    ///
    /// Empty for a method without a body. Records may share an id; the
    /// collection they are offered to decides which survives.
    pub fn instrument(&self, method: &MethodDescription) -> Vec<BreakpointRecord> {
        let Some(body) = method.body.as_ref() else {
            return Vec::new();
        };

        let mut records = Vec::with_capacity(method.returns.len() + 2);
        records.push(self.entry_breakpoint(method, body));
        for ret in &method.returns {
            records.push(self.return_breakpoint(method, ret));
        }
        records.push(self.fall_through_breakpoint(method, body));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::Action;

    fn fixed_clock() -> i64 {
        1234
    }

    fn foo_bar() -> MethodDescription {
        MethodDescription::new("-[Foo bar:]", SourceRange::new("/p/Foo.m", (10, 20), (15, 1)))
            .with_parameter("x")
            .with_return(SourceRange::new("/p/Foo.m", (13, 5), (13, 13)), Some("x"))
    }

    #[test]
    fn produces_entry_returns_and_exit_in_order() {
        let records = Instrumenter::with_clock(fixed_clock).instrument(&foo_bar());
        let lines: Vec<_> = records
            .iter()
            .map(|r| r.source_range().starting_line_number)
            .collect();
        assert_eq!(lines, [10, 13, 15]);
        assert!(records.iter().all(|r| r.landmark_name() == "-[Foo bar:]"));
        assert!(records.iter().all(|r| r.timestamp() == 1234));
    }

    #[test]
    fn entry_logs_arguments_then_grows() {
        let method = foo_bar();
        let bp = Instrumenter::new().entry_breakpoint(&method, method.body.as_ref().unwrap());
        assert!(bp.condition().is_empty());
        assert_eq!(
            bp.actions(),
            [
                Action::log("@$indentationString.UTF8String@entering method -[Foo bar:] x: @x@"),
                Action::command(GROW_INDENTATION),
            ]
        );
    }

    #[test]
    fn return_shrinks_then_sets_flag() {
        let method = foo_bar();
        let bp = Instrumenter::new().return_breakpoint(&method, &method.returns[0]);
        assert!(bp.condition().is_empty());
        assert_eq!(bp.id(), "/p/Foo.m13");
        assert_eq!(
            bp.actions(),
            [
                Action::log(
                    "@$indentationString.UTF8String@returning from method -[Foo bar:] (line 13), value: @x@"
                ),
                Action::command(SHRINK_INDENTATION),
                Action::command(SET_IGNORE_EXIT),
            ]
        );
    }

    #[test]
    fn fall_through_is_conditional_on_closing_line() {
        let method = foo_bar();
        let bp = Instrumenter::new().fall_through_breakpoint(&method, method.body.as_ref().unwrap());
        let range = bp.source_range();
        assert_eq!((range.starting_line_number, range.starting_column_number), (15, 1));
        assert_eq!((range.ending_line_number, range.ending_column_number), (15, 1));
        assert_eq!(bp.condition(), FALL_THROUGH_CONDITION);
        assert_eq!(
            bp.actions(),
            [
                Action::log("@$indentationString.UTF8String@returning from method -[Foo bar:] (line 15)"),
                Action::command(SHRINK_INDENTATION),
            ]
        );
    }

    #[test]
    fn method_without_returns_gets_entry_and_exit() {
        let method = MethodDescription::new("-[Foo run]", SourceRange::new("/p/Foo.m", (3, 12), (6, 1)));
        let records = Instrumenter::new().instrument(&method);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "/p/Foo.m3");
        assert_eq!(records[1].id(), "/p/Foo.m6");
    }

    #[test]
    fn method_without_body_gets_nothing() {
        let mut method = foo_bar();
        method.body = None;
        assert!(Instrumenter::new().instrument(&method).is_empty());
    }

    #[test]
    fn computed_return_has_no_value() {
        let method = MethodDescription::new("+[Math sum]", SourceRange::new("m.m", (1, 1), (4, 1)))
            .with_return(SourceRange::new("m.m", (2, 3), (2, 20)), None);
        let bp = Instrumenter::new().return_breakpoint(&method, &method.returns[0]);
        assert!(!bp.actions()[0].payload().contains("value:"));
    }
}
