use super::types::TranslationUnit;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn parse_translation_unit(json: &str, path: &Path) -> Result<TranslationUnit> {
    serde_json::from_str(json).map_err(|source| Error::InvalidDescription {
        path: path.to_path_buf(),
        source,
    })
}

/// Load one description file produced by the source traversal.
pub fn load_translation_unit(path: &Path) -> Result<TranslationUnit> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let unit = parse_translation_unit(&contents, path)?;
    debug!(
        "Loaded {} ({} functions, {} methods)",
        path.display(),
        unit.functions.len(),
        unit.methods.len()
    );
    Ok(unit)
}

pub fn load_translation_units<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<TranslationUnit>> {
    paths
        .iter()
        .map(|p| load_translation_unit(p.as_ref()))
        .collect()
}
