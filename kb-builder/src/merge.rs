//! Deduplicating merge of parsed records into final knowledge entries.
//!
//! Records are normalized and keyed by [`dedup_key`]. The first occurrence
//! of a key fixes the entry's category, question and first-seen position;
//! later occurrences add their source, replace the answer when theirs is
//! longer, and re-run the classifier.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::{
    classify::classify_tags,
    core::{
        ids::{IdAllocator, dedup_key},
        normalize::{normalize_answer, normalize_question},
    },
    model::{category::Category, entry::KnowledgeEntry, entry::RawRecord, tag::Tag},
};

#[derive(Debug)]
struct PendingEntry {
    category: Category,
    question: String,
    answer: String,
    sources: BTreeSet<String>,
    tags: Vec<Tag>,
    order: usize,
}

/// Accumulates records from every document of one build run.
#[derive(Debug, Default)]
pub struct KnowledgeMerger {
    entries: HashMap<String, PendingEntry>,
    next_order: usize,
    merged: usize,
    skipped: usize,
}

/// Outcome of [`KnowledgeMerger::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Merged,
    /// Question was empty after normalization.
    Skipped,
}

impl KnowledgeMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `record` and merges it under its dedup key.
    pub fn add(&mut self, record: &RawRecord, source: &str) -> MergeOutcome {
        let question = normalize_question(&record.question);
        let answer = normalize_answer(&record.answer);
        if question.is_empty() {
            self.skipped += 1;
            warn!(%source, raw = %record.question, "skipping record without a question");
            return MergeOutcome::Skipped;
        }
        // May be empty for questions with no Latin/Hangul/digit characters;
        // those share one entry and get a hash id.
        let key = dedup_key(&question);

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.sources.insert(source.to_string());
            if answer.chars().count() > entry.answer.chars().count() {
                entry.answer = answer;
            }
            entry.tags = classify_tags(entry.category, &entry.question, &entry.answer);
            self.merged += 1;
            debug!(%source, %key, "merged duplicate question");
            return MergeOutcome::Merged;
        }

        let tags = classify_tags(record.section, &question, &answer);
        self.entries.insert(
            key,
            PendingEntry {
                category: record.section,
                question,
                answer,
                sources: BTreeSet::from([source.to_string()]),
                tags,
                order: self.next_order,
            },
        );
        self.next_order += 1;
        MergeOutcome::Created
    }

    /// Number of records folded into an existing entry.
    pub fn merged_count(&self) -> usize {
        self.merged
    }

    /// Number of records dropped for lacking a question.
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Orders entries by category rank then first-seen order and assigns ids.
    pub fn finish(self) -> Vec<KnowledgeEntry> {
        let mut pending: Vec<PendingEntry> = self.entries.into_values().collect();
        pending.sort_by_key(|e| (e.category.rank(), e.order));

        let mut ids = IdAllocator::new();
        pending
            .into_iter()
            .map(|e| KnowledgeEntry {
                id: ids.allocate(&e.question),
                category: e.category,
                question: e.question,
                answer: e.answer,
                sources: e.sources.into_iter().collect(),
                tags: e.tags,
            })
            .collect()
    }
}
