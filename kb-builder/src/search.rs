//! Keyword search over built knowledge entries.
//!
//! Every field is normalized once when the index is built; queries are scored
//! by substring hits of the whole query and of each query token.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::entry::KnowledgeEntry;

/// Default number of entries returned by [`KnowledgeIndex::select_relevant`].
pub const DEFAULT_LIMIT: usize = 4;

static NON_SEARCH_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9가-힣\s]").expect("static search regex"));
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static space regex"));

/// Lower-cases, turns everything outside `[a-z0-9가-힣]` and whitespace into
/// spaces, collapses runs and trims.
///
/// # Example
/// ```
/// use kb_builder::search::normalize_for_search;
///
/// assert_eq!(normalize_for_search("  ACE·프로그램?! 2025 "), "ace 프로그램 2025");
/// ```
pub fn normalize_for_search(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = NON_SEARCH_CHARS.replace_all(&lowered, " ");
    SPACE_RUN.replace_all(&spaced, " ").trim().to_string()
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: KnowledgeEntry,
    question: String,
    answer: String,
    tags: String,
    category: String,
    all: String,
}

impl IndexedEntry {
    fn new(entry: KnowledgeEntry) -> Self {
        let tags = entry
            .tags
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(" ");
        let sources = entry.sources.join(" ");
        let all = normalize_for_search(&format!(
            "{} {} {} {} {}",
            entry.question,
            entry.answer,
            entry.category.label(),
            tags,
            sources
        ));
        Self {
            question: normalize_for_search(&entry.question),
            answer: normalize_for_search(&entry.answer),
            tags: normalize_for_search(&tags),
            category: normalize_for_search(entry.category.label()),
            all,
            entry,
        }
    }

    fn score(&self, query: &str, tokens: &[&str]) -> u32 {
        let mut score = 0;
        let mut matched = 0;

        if self.question.contains(query) {
            score += 12;
        }
        if self.answer.contains(query) {
            score += 8;
        }

        for token in tokens {
            if self.question.contains(token) {
                score += 6;
                matched += 1;
            }
            if self.answer.contains(token) {
                score += 4;
                matched += 1;
            }
            if self.tags.contains(token) {
                score += 3;
            }
            if self.category.contains(token) {
                score += 2;
            }
            if self.all.contains(token) {
                score += 1;
            }
        }

        score + matched
    }
}

/// Read-only search index over a knowledge base.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeIndex {
    entries: Vec<IndexedEntry>,
}

impl KnowledgeIndex {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(IndexedEntry::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in build order.
    pub fn entries(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    /// Top `limit` entries for `query`.
    ///
    /// Entries with a positive score are preferred; when nothing matches, all
    /// entries compete (so the result is the first `limit` in build order).
    /// Ties keep build order. A query with no searchable characters returns
    /// the first `limit` entries.
    pub fn select_relevant(&self, query: &str, limit: usize) -> Vec<&KnowledgeEntry> {
        let query = normalize_for_search(query);
        if query.is_empty() {
            return self.entries().take(limit).collect();
        }
        let tokens: Vec<&str> = query.split(' ').filter(|t| !t.is_empty()).collect();

        let scored: Vec<(u32, &IndexedEntry)> = self
            .entries
            .iter()
            .map(|e| (e.score(&query, &tokens), e))
            .collect();

        let mut candidates: Vec<(u32, &IndexedEntry)> =
            scored.iter().copied().filter(|(s, _)| *s > 0).collect();
        if candidates.is_empty() {
            candidates = scored;
        }
        // `sort_by` is stable.
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        candidates
            .into_iter()
            .take(limit)
            .map(|(_, e)| &e.entry)
            .collect()
    }
}
