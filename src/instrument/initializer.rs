use super::templates::{INIT_IGNORE_EXIT, INIT_INDENTATION};
use crate::breakpoint::{BreakpointRecord, SourceRange};
use crate::error::{Error, Result};

/// Seeds the debugger-side indentation and ignore-flag variables at `main`.
///
/// Only one entry point may be installed per run.
#[derive(Debug, Default)]
pub struct EntryPointInitializer {
    installed: Option<SourceRange>,
}

impl EntryPointInitializer {
    pub fn new() -> Self {
        Self { installed: None }
    }

    pub fn installed(&self) -> Option<&SourceRange> {
        self.installed.as_ref()
    }

    pub fn install(&mut self, main: &SourceRange, timestamp: i64) -> Result<BreakpointRecord> {
        if let Some(first) = &self.installed {
            return Err(Error::AmbiguousEntryPoint {
                first: first.clone(),
                second: main.clone(),
            });
        }
        self.installed = Some(main.clone());

        let mut bp = BreakpointRecord::with_timestamp(timestamp);
        bp.set_source_range(main.clone());
        bp.set_landmark_name("main");
        bp.add_command_action(INIT_INDENTATION);
        bp.add_command_action(INIT_IGNORE_EXIT);
        Ok(bp)
    }
}
