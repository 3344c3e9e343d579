use serde::{Deserialize, Serialize};

use crate::model::{category::Category, tag::Tag};

/// Question/answer pair as emitted by a document parser, before
/// normalization and deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub section: Category,
    pub question: String,
    pub answer: String,
}

/// Final, merged knowledge-base record.
///
/// Field order and names match the `KnowledgeEntry` interface consumed by
/// the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Slug derived from the question, unique within one build.
    pub id: String,
    pub category: Category,
    pub question: String,
    pub answer: String,
    /// Sorted, de-duplicated file names of every document the question was found in.
    pub sources: Vec<String>,
    /// Topical tags in vocabulary order.
    pub tags: Vec<Tag>,
}
