//! Xcode breakpoint-list XML rendering.
//!
//! Text is written verbatim: message, command and landmark strings must
//! already be escaped by whoever built them.

use super::action::Action;
use super::record::BreakpointRecord;
use super::set::BreakpointSet;
use std::fmt;
use std::io::{self, Write};

const CONVEYANCE_TYPE: u32 = 0;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Display adapter rendering one `BreakpointProxy` document.
pub struct XmlDocument<'a>(pub &'a BreakpointRecord);

impl fmt::Display for XmlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bp = self.0;
        let range = bp.source_range();

        writeln!(f, "<BreakpointProxy")?;
        writeln!(
            f,
            "  BreakpointExtensionID = \"Xcode.Breakpoint.FileBreakpoint\">"
        )?;
        writeln!(f, "  <BreakpointContent")?;
        writeln!(f, "    shouldBeEnabled = \"{}\"", yes_no(bp.should_be_enabled))?;
        writeln!(f, "    ignoreCount = \"{}\"", bp.ignore_count)?;
        // No attribute at all means unconditional.
        if !bp.condition().is_empty() {
            writeln!(f, "    condition = \"{}\"", bp.condition())?;
        }
        writeln!(
            f,
            "    continueAfterRunningActions = \"{}\"",
            yes_no(bp.continue_after_running_actions)
        )?;
        writeln!(f, "    filePath = \"{}\"", range.file_path)?;
        writeln!(f, "    timestampString = \"{}\"", bp.timestamp())?;
        writeln!(f, "    startingColumnNumber = \"{}\"", range.starting_column_number)?;
        writeln!(f, "    endingColumnNumber = \"{}\"", range.ending_column_number)?;
        writeln!(f, "    startingLineNumber = \"{}\"", range.starting_line_number)?;
        writeln!(f, "    endingLineNumber = \"{}\"", range.ending_line_number)?;
        writeln!(f, "    landmarkName = \"{}\"", bp.landmark_name())?;
        writeln!(f, "    landmarkType = \"{}\">", bp.landmark_kind())?;
        writeln!(f, "  <Actions>")?;
        for action in bp.actions() {
            write_action(f, action)?;
        }
        writeln!(f, "  </Actions>")?;
        writeln!(f, "  </BreakpointContent>")?;
        writeln!(f, "</BreakpointProxy>")
    }
}

fn write_action(f: &mut fmt::Formatter<'_>, action: &Action) -> fmt::Result {
    let (extension, attribute) = match action {
        Action::Log { .. } => ("Xcode.BreakpointAction.Log", "message"),
        Action::Command { .. } => ("Xcode.BreakpointAction.DebuggerCommand", "consoleCommand"),
    };
    writeln!(f, "    <BreakpointActionProxy")?;
    writeln!(f, "      ActionExtensionID = \"{}\">", extension)?;
    writeln!(f, "      <ActionContent")?;
    writeln!(f, "        {} = \"{}\"", attribute, action.payload())?;
    writeln!(f, "        conveyanceType = \"{}\">", CONVEYANCE_TYPE)?;
    writeln!(f, "      </ActionContent>")?;
    writeln!(f, "    </BreakpointActionProxy>")
}

pub fn serialize(record: &BreakpointRecord) -> String {
    XmlDocument(record).to_string()
}

/// One document per record, in the set's iteration order.
pub fn serialize_collection(set: &BreakpointSet) -> Vec<String> {
    set.iter().map(serialize).collect()
}

/// Write one document to the output stream, followed by a blank line.
pub fn write_document<W: Write>(out: &mut W, record: &BreakpointRecord) -> io::Result<()> {
    writeln!(out, "{}", XmlDocument(record))
}

pub fn bucket_header() -> &'static str {
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Bucket\n   type = \"1\"\n   version = \"2.0\">\n   <Breakpoints>\n"
}

pub fn bucket_footer() -> &'static str {
    "   </Breakpoints>\n</Bucket>\n"
}
