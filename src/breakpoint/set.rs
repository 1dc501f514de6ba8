use super::record::BreakpointRecord;
use std::collections::BTreeMap;
use tracing::debug;

/// Breakpoints keyed by [`BreakpointRecord::id`], iterated in key order.
///
/// The first record offered for an id wins; later ones are discarded.
#[derive(Debug, Default)]
pub struct BreakpointSet {
    points: BTreeMap<String, BreakpointRecord>,
}

impl BreakpointSet {
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Returns true if the record was new and has been stored.
    pub fn insert(&mut self, record: BreakpointRecord) -> bool {
        let id = record.id();
        if self.points.contains_key(&id) {
            debug!("Discarding duplicate breakpoint {}", id);
            return false;
        }
        debug!("Breakpoint set at {}", id);
        self.points.insert(id, record);
        true
    }

    pub fn get(&self, id: &str) -> Option<&BreakpointRecord> {
        self.points.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreakpointRecord> {
        self.points.values()
    }

    /// The record whose range starts on `line` of `file_path`.
    pub fn at_line(&self, file_path: &str, line: u32) -> Option<&BreakpointRecord> {
        self.get(&format!("{}{}", file_path, line))
    }
}
