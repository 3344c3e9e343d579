//! Error type for the knowledge-base builder.
//!
//! Parsing never fails (malformed input degrades to fewer records and a
//! warning), so everything here is about the filesystem and serialization.

use std::path::PathBuf;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

pub type Result<T> = std::result::Result<T, BuildError>;

/* ------------------------------------------------------------------------- */
/* Error                                                                     */
/* ------------------------------------------------------------------------- */

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BuildError {
    /// Source document could not be read.
    #[error("[KB Builder] failed to read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file (or its parent directory) could not be written.
    #[error("[KB Builder] failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Knowledge base could not be read back (e.g. by the API at startup).
    #[error("[KB Builder] invalid knowledge base JSON in {path}: {source}")]
    InvalidKnowledgeJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("[KB Builder] serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
