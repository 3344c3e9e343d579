use kb_builder::KnowledgeEntry;
use serde::{Deserialize, Serialize};

/// Query string for /knowledge.
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeQuery {
    /// Free-text search; absent or blank lists every entry.
    #[serde(default)]
    pub q: Option<String>,
    /// Result cap for searches (default 4, at most 20).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response payload for /knowledge.
#[derive(Debug, Serialize)]
pub struct KnowledgeResponse<'a> {
    pub total: usize,
    pub entries: Vec<&'a KnowledgeEntry>,
}
