//! Writers for the built knowledge base.
//!
//! - [`typescript`] renders the module imported by the front-end;
//! - [`json`] writes (and reads back) the plain JSON array.

pub mod json;
pub mod typescript;

use std::{fs, path::Path};

use crate::errors::{BuildError, Result};

/// Writes `content` to `path`, creating missing parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    let wrap = |source| BuildError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, content).map_err(wrap)
}
