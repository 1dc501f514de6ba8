use serde::{Deserialize, Serialize};

/// A span of source text, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub file_path: String,
    pub starting_line_number: u32,
    pub ending_line_number: u32,
    pub starting_column_number: u32,
    pub ending_column_number: u32,
}

impl SourceRange {
    pub fn new(
        file_path: impl Into<String>,
        (starting_line_number, starting_column_number): (u32, u32),
        (ending_line_number, ending_column_number): (u32, u32),
    ) -> Self {
        Self {
            file_path: file_path.into(),
            starting_line_number,
            ending_line_number,
            starting_column_number,
            ending_column_number,
        }
    }

    /// Collapse the range onto column 1 of its last line.
    ///
    /// Used for the fall-through breakpoint at a body's closing brace.
    pub fn at_closing_line(&self) -> Self {
        Self {
            file_path: self.file_path.clone(),
            starting_line_number: self.ending_line_number,
            ending_line_number: self.ending_line_number,
            starting_column_number: 1,
            ending_column_number: 1,
        }
    }
}
