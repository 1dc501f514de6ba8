/// One entry in a breakpoint's action list. Actions run in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print a message; `@expr@` tokens are evaluated by the debugger.
    Log { template: String },
    /// Evaluate a debugger command for its side effect.
    Command { command: String },
}

impl Action {
    pub fn log(template: impl Into<String>) -> Self {
        Action::Log {
            template: template.into(),
        }
    }

    pub fn command(command: impl Into<String>) -> Self {
        Action::Command {
            command: command.into(),
        }
    }

    pub fn is_log(&self) -> bool {
        matches!(self, Action::Log { .. })
    }

    /// The payload string, verbatim.
    pub fn payload(&self) -> &str {
        match self {
            Action::Log { template } => template,
            Action::Command { command } => command,
        }
    }
}

/// Escape markup-reserved characters in a dynamic value before it is
/// embedded in a message or attribute.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
