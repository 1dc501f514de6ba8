use super::action::Action;
use super::range::SourceRange;
use chrono::{DateTime, Local, TimeZone, Utc};

/// Landmark discriminator for a method, the only kind this tool emits.
pub const METHOD_LANDMARK_KIND: u32 = 5;

/// The instant 2001-01-01T00:00:00 in the local time zone.
pub fn reference_instant() -> Option<DateTime<Utc>> {
    Local
        .with_ymd_and_hms(2001, 1, 1, 0, 0, 0)
        .earliest()
        .map(|reference| reference.with_timezone(&Utc))
}

/// Milliseconds elapsed between the reference instant and `now`.
pub fn elapsed_since_reference(now: DateTime<Utc>) -> i64 {
    match reference_instant() {
        Some(reference) => (now - reference).num_milliseconds(),
        None => 0,
    }
}

/// Milliseconds elapsed from 2001-01-01T00:00:00 local time until now.
pub fn timestamp_now() -> i64 {
    elapsed_since_reference(Utc::now())
}

/// A file breakpoint with a condition and an ordered action list.
///
/// The identity ([`BreakpointRecord::id`]) is derived from the source range on
/// every call, so it can never go stale after [`BreakpointRecord::set_source_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointRecord {
    source_range: SourceRange,
    condition: String,
    landmark_name: String,
    pub should_be_enabled: bool,
    pub ignore_count: u32,
    pub continue_after_running_actions: bool,
    actions: Vec<Action>,
    timestamp: i64,
}

impl Default for BreakpointRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakpointRecord {
    pub fn new() -> Self {
        Self::with_timestamp(timestamp_now())
    }

    pub fn with_timestamp(timestamp: i64) -> Self {
        Self {
            source_range: SourceRange::default(),
            condition: String::new(),
            landmark_name: String::new(),
            should_be_enabled: true,
            ignore_count: 0,
            continue_after_running_actions: true,
            actions: Vec::new(),
            timestamp,
        }
    }

    /// File path immediately followed by the decimal starting line.
    pub fn id(&self) -> String {
        format!(
            "{}{}",
            self.source_range.file_path, self.source_range.starting_line_number
        )
    }

    pub fn set_source_range(&mut self, range: SourceRange) {
        self.source_range = range;
    }

    pub fn source_range(&self) -> &SourceRange {
        &self.source_range
    }

    pub fn set_condition(&mut self, condition: impl Into<String>) {
        self.condition = condition.into();
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn set_landmark_name(&mut self, name: impl Into<String>) {
        self.landmark_name = name.into();
    }

    pub fn landmark_name(&self) -> &str {
        &self.landmark_name
    }

    pub fn landmark_kind(&self) -> u32 {
        METHOD_LANDMARK_KIND
    }

    pub fn add_log_action(&mut self, template: impl Into<String>) {
        self.actions.push(Action::log(template));
    }

    pub fn add_command_action(&mut self, command: impl Into<String>) {
        self.actions.push(Action::command(command));
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}
