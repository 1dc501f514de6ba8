use crate::instrument::templates::{
    FALL_THROUGH_CONDITION, GROW_INDENTATION, IGNORE_EXIT_VARIABLE, INDENTATION_VARIABLE,
    INDENT_UNIT, INIT_IGNORE_EXIT, INIT_INDENTATION, SET_IGNORE_EXIT, SHRINK_INDENTATION,
};
use std::collections::HashMap;
use thiserror::Error;

const INDENTATION_TOKEN: &str = "$indentationString.UTF8String";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("{0} used before initialisation")]
    Uninitialized(&'static str),
    #[error("unknown debugger command: {0}")]
    UnknownCommand(String),
    #[error("unknown breakpoint condition: {0}")]
    UnknownCondition(String),
    #[error("no value bound for @{0}@")]
    Unbound(String),
    #[error("unterminated @ token in log message: {0}")]
    UnbalancedTemplate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Bool(bool),
}

/// Argument bindings of the call that hit a breakpoint.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub method: String,
    pub args: HashMap<String, String>,
}

impl Frame {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: HashMap::new(),
        }
    }

    pub fn bind(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

/// Debugger-side convenience variables touched by the generated breakpoints.
#[derive(Debug, Default)]
pub struct DebugContext {
    pub variables: HashMap<String, Value>,
}

impl DebugContext {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    pub fn indentation(&self) -> Result<&str, StateError> {
        match self.variables.get(INDENTATION_VARIABLE) {
            Some(Value::Text(text)) => Ok(text.as_str()),
            _ => Err(StateError::Uninitialized(INDENTATION_VARIABLE)),
        }
    }

    pub fn ignore_exit(&self) -> Result<bool, StateError> {
        match self.variables.get(IGNORE_EXIT_VARIABLE) {
            Some(Value::Bool(flag)) => Ok(*flag),
            _ => Err(StateError::Uninitialized(IGNORE_EXIT_VARIABLE)),
        }
    }

    /// Current call depth in indentation units.
    pub fn depth(&self) -> Result<usize, StateError> {
        Ok(self.indentation()?.len() / INDENT_UNIT.len())
    }

    fn set_indentation(&mut self, text: String) {
        self.variables
            .insert(INDENTATION_VARIABLE.to_string(), Value::Text(text));
    }

    fn set_ignore_exit(&mut self, flag: bool) {
        self.variables
            .insert(IGNORE_EXIT_VARIABLE.to_string(), Value::Bool(flag));
    }

    pub fn run_command(&mut self, command: &str) -> Result<(), StateError> {
        match command {
            INIT_INDENTATION => self.set_indentation(String::new()),
            INIT_IGNORE_EXIT => self.set_ignore_exit(false),
            GROW_INDENTATION => {
                let grown = format!("{}{}", self.indentation()?, INDENT_UNIT);
                self.set_indentation(grown);
            }
            SHRINK_INDENTATION => {
                if !self.ignore_exit()? {
                    let current = self.indentation()?;
                    let keep = current.len().saturating_sub(INDENT_UNIT.len());
                    let shrunk = current[..keep].to_string();
                    self.set_indentation(shrunk);
                }
            }
            SET_IGNORE_EXIT => {
                self.ignore_exit()?;
                self.set_ignore_exit(true);
            }
            other => return Err(StateError::UnknownCommand(other.to_string())),
        }
        Ok(())
    }

    /// Whether a breakpoint with this condition fires. May clear the ignore flag.
    pub fn evaluate_condition(&mut self, condition: &str) -> Result<bool, StateError> {
        match condition {
            "" => Ok(true),
            FALL_THROUGH_CONDITION => {
                if self.ignore_exit()? {
                    self.set_ignore_exit(false);
                    Ok(false)
                } else {
                    Ok(true)
                }
            }
            other => Err(StateError::UnknownCondition(other.to_string())),
        }
    }

    /// Substitute `@...@` tokens the way the debugger prints a log action.
    pub fn render_log(&self, template: &str, frame: &Frame) -> Result<String, StateError> {
        let parts: Vec<&str> = template.split('@').collect();
        if parts.len() % 2 == 0 {
            return Err(StateError::UnbalancedTemplate(template.to_string()));
        }

        let mut out = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i % 2 == 0 {
                out.push_str(part);
            } else if *part == INDENTATION_TOKEN {
                out.push_str(self.indentation()?);
            } else {
                match frame.args.get(*part) {
                    Some(value) => out.push_str(value),
                    None => return Err(StateError::Unbound(part.to_string())),
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialised() -> DebugContext {
        let mut ctx = DebugContext::new();
        ctx.run_command(INIT_INDENTATION).unwrap();
        ctx.run_command(INIT_IGNORE_EXIT).unwrap();
        ctx
    }

    #[test]
    fn grow_before_init_fails() {
        let mut ctx = DebugContext::new();
        assert_eq!(
            ctx.run_command(GROW_INDENTATION),
            Err(StateError::Uninitialized(INDENTATION_VARIABLE))
        );
    }

    #[test]
    fn grow_and_shrink() {
        let mut ctx = initialised();
        ctx.run_command(GROW_INDENTATION).unwrap();
        ctx.run_command(GROW_INDENTATION).unwrap();
        assert_eq!(ctx.depth().unwrap(), 2);
        ctx.run_command(SHRINK_INDENTATION).unwrap();
        assert_eq!(ctx.indentation().unwrap(), "    ");
    }

    #[test]
    fn shrink_never_goes_negative() {
        let mut ctx = initialised();
        ctx.run_command(SHRINK_INDENTATION).unwrap();
        assert_eq!(ctx.depth().unwrap(), 0);
    }

    #[test]
    fn shrink_is_skipped_while_flag_set() {
        let mut ctx = initialised();
        ctx.run_command(GROW_INDENTATION).unwrap();
        ctx.run_command(SET_IGNORE_EXIT).unwrap();
        ctx.run_command(SHRINK_INDENTATION).unwrap();
        assert_eq!(ctx.depth().unwrap(), 1);
    }

    #[test]
    fn fall_through_condition_clears_flag() {
        let mut ctx = initialised();
        assert!(ctx.evaluate_condition(FALL_THROUGH_CONDITION).unwrap());

        ctx.run_command(SET_IGNORE_EXIT).unwrap();
        assert!(!ctx.evaluate_condition(FALL_THROUGH_CONDITION).unwrap());
        assert!(!ctx.ignore_exit().unwrap());
        assert!(ctx.evaluate_condition("").unwrap());
    }

    #[test]
    fn unknown_text_is_rejected() {
        let mut ctx = initialised();
        assert!(matches!(
            ctx.run_command("expr abort()"),
            Err(StateError::UnknownCommand(_))
        ));
        assert!(matches!(
            ctx.evaluate_condition("x > 3"),
            Err(StateError::UnknownCondition(_))
        ));
    }

    #[test]
    fn renders_tokens() {
        let mut ctx = initialised();
        ctx.run_command(GROW_INDENTATION).unwrap();
        let frame = Frame::new("-[Foo bar:]").bind("x", "7");
        let line = ctx
            .render_log("@$indentationString.UTF8String@value @x@!", &frame)
            .unwrap();
        assert_eq!(line, "    value 7!");
        assert_eq!(
            ctx.render_log("@y@", &frame),
            Err(StateError::Unbound("y".into()))
        );
        assert!(matches!(
            ctx.render_log("broken @x", &frame),
            Err(StateError::UnbalancedTemplate(_))
        ));
    }
}
