mod action;
mod range;
mod record;
mod set;
pub mod xml;

pub use action::{escape_markup, Action};
pub use range::SourceRange;
pub use record::{timestamp_now, BreakpointRecord, METHOD_LANDMARK_KIND};
pub use set::BreakpointSet;
