//! Plain JSON export (`src/data/knowledgeBase.json`) and its loader.

use std::{fs, path::Path};

use tracing::info;

use crate::{
    errors::{BuildError, Result},
    export::write_file,
    model::entry::KnowledgeEntry,
};

/// Writes the entries as a pretty-printed JSON array with a trailing newline.
pub fn write_json(path: &Path, entries: &[KnowledgeEntry]) -> Result<()> {
    let mut content = serde_json::to_string_pretty(entries)?;
    content.push('\n');
    write_file(path, &content)?;
    info!(entries = entries.len(), "json: wrote knowledge base -> {}", path.display());
    Ok(())
}

/// Reads a knowledge base previously written by [`write_json`].
pub fn load_json(path: &Path) -> Result<Vec<KnowledgeEntry>> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| BuildError::InvalidKnowledgeJson {
        path: path.to_path_buf(),
        source,
    })
}
