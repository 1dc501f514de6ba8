use super::context::{DebugContext, Frame, StateError};
use crate::breakpoint::{Action, BreakpointRecord, BreakpointSet};
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::trace;

/// Replays breakpoint hits against a generated set, as lldb would run them.
pub struct TraceSession<'a> {
    breakpoints: &'a BreakpointSet,
    context: DebugContext,
    hit_counts: HashMap<String, u32>,
    log: Vec<String>,
}

fn protocol(record: &BreakpointRecord, err: StateError) -> Error {
    Error::Protocol {
        method: record.landmark_name().to_string(),
        reason: format!("line {}: {}", record.source_range().starting_line_number, err),
    }
}

impl<'a> TraceSession<'a> {
    pub fn new(breakpoints: &'a BreakpointSet) -> Self {
        Self {
            breakpoints,
            context: DebugContext::new(),
            hit_counts: HashMap::new(),
            log: Vec::new(),
        }
    }

    pub fn context(&self) -> &DebugContext {
        &self.context
    }

    /// Messages printed so far, one per log action.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Execution reached `line` of `file_path`. Returns whether a breakpoint
    /// there fired and ran its actions.
    pub fn hit(&mut self, file_path: &str, line: u32, frame: &Frame) -> Result<bool> {
        let breakpoints = self.breakpoints;
        let Some(record) = breakpoints.at_line(file_path, line) else {
            return Ok(false);
        };
        if !record.should_be_enabled {
            return Ok(false);
        }

        let count = self.hit_counts.entry(record.id()).or_insert(0);
        *count += 1;
        if *count <= record.ignore_count {
            return Ok(false);
        }

        let fires = self
            .context
            .evaluate_condition(record.condition())
            .map_err(|e| protocol(record, e))?;
        if !fires {
            trace!("{}:{} condition false", file_path, line);
            return Ok(false);
        }

        for action in record.actions() {
            match action {
                Action::Log { template } => {
                    let message = self
                        .context
                        .render_log(template, frame)
                        .map_err(|e| protocol(record, e))?;
                    trace!("log: {}", message);
                    self.log.push(message);
                }
                Action::Command { command } => self
                    .context
                    .run_command(command)
                    .map_err(|e| protocol(record, e))?,
            }
        }
        Ok(true)
    }
}
