mod engine;
mod generator;
mod initializer;
pub mod templates;

pub use engine::Instrumenter;
pub use generator::{Generator, RunSummary};
pub use initializer::EntryPointInitializer;
