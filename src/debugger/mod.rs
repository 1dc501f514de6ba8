mod context;
mod session;
mod verify;

pub use context::{DebugContext, Frame, StateError, Value};
pub use session::TraceSession;
pub use verify::{verify_all, verify_method};
