use super::types::TranslationUnit;
use crate::breakpoint::SourceRange;
use crate::error::{Error, Result};
use regex::Regex;
use tracing::debug;

/// Files that may hold the program's `main`.
pub const DEFAULT_MAIN_FILE_PATTERN: &str = r".*main\.(m|mm|c|cpp)$";

/// Finds the single `main` function across all translation units.
pub struct EntryPointFinder {
    pattern: Regex,
    source: String,
}

impl EntryPointFinder {
    pub fn new(pattern: &str) -> Result<Self> {
        // The convention must match the whole path.
        let anchored = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            pattern: anchored,
            source: pattern.to_string(),
        })
    }

    pub fn is_main_file(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Location of the unique entry point.
    ///
    /// Fails when no candidate exists or when a second one turns up.
    pub fn find(&self, units: &[TranslationUnit]) -> Result<SourceRange> {
        let mut found: Option<SourceRange> = None;

        for unit in units.iter().filter(|u| self.is_main_file(&u.file_path)) {
            for function in unit.functions.iter().filter(|f| f.name == "main") {
                debug!("Entry point candidate in {}", unit.file_path);
                if let Some(first) = found.take() {
                    return Err(Error::AmbiguousEntryPoint {
                        first,
                        second: function.range.clone(),
                    });
                }
                found = Some(function.range.clone());
            }
        }

        found.ok_or_else(|| Error::MissingEntryPoint {
            pattern: self.source.clone(),
        })
    }
}
