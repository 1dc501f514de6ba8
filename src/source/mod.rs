mod entry_point;
mod loader;
mod types;

pub use entry_point::{EntryPointFinder, DEFAULT_MAIN_FILE_PATTERN};
pub use loader::{load_translation_unit, load_translation_units, parse_translation_unit};
pub use types::{FunctionDescription, MethodDescription, ReturnStatement, TranslationUnit};
