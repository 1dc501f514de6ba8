//! Error types for breakpoint generation.

use crate::breakpoint::SourceRange;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// More than one `main` matched the entry-point convention.
    #[error(
        "multiple main-methods found ({}:{} and {}:{}), can't proceed",
        .first.file_path, .first.starting_line_number,
        .second.file_path, .second.starting_line_number
    )]
    AmbiguousEntryPoint {
        first: SourceRange,
        second: SourceRange,
    },

    #[error("could not find the main-method within a file matching {pattern} - can't proceed")]
    MissingEntryPoint { pattern: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid method description in {}: {source}", .path.display())]
    InvalidDescription {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid entry-point pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("failed to write breakpoints: {0}")]
    Output(#[source] std::io::Error),

    #[error("debugger protocol violation in {method}: {reason}")]
    Protocol { method: String, reason: String },
}

impl Error {
    /// Process exit status for this failure. 2 is left to clap usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingEntryPoint { .. } => 1,
            Error::AmbiguousEntryPoint { .. } => 5,
            Error::Io { .. }
            | Error::InvalidDescription { .. }
            | Error::InvalidPattern(_)
            | Error::Output(_) => 3,
            Error::Protocol { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_point_failures_are_distinguishable() {
        let missing = Error::MissingEntryPoint {
            pattern: ".*main\\.m$".into(),
        };
        let ambiguous = Error::AmbiguousEntryPoint {
            first: SourceRange::new("a/main.m", (1, 1), (3, 1)),
            second: SourceRange::new("b/main.m", (5, 1), (9, 1)),
        };
        assert_ne!(missing.exit_code(), 0);
        assert_ne!(ambiguous.exit_code(), 0);
        assert_ne!(missing.exit_code(), ambiguous.exit_code());
        assert_ne!(ambiguous.exit_code(), 2);
        assert!(ambiguous.to_string().contains("a/main.m:1"));
        assert!(ambiguous.to_string().contains("b/main.m:5"));
    }
}
