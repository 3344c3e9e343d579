//! Dedup keys, slugs and collision-free entry ids.
//!
//! - the dedup key identifies a question regardless of punctuation/spacing;
//! - the slug is the readable id base (`배정은-어떻게-되나요`);
//! - questions without any slug characters fall back to a short SHA-256 prefix.

use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_KEY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-z가-힣]+").expect("static key regex"));

/// Length of the hex hash used when a question yields an empty slug.
const HASH_ID_LEN: usize = 8;

/// Dedup key: lower-cased question with every character outside
/// `[0-9a-z가-힣]` removed.
///
/// # Example
/// ```
/// use kb_builder::core::ids::dedup_key;
///
/// assert_eq!(dedup_key("배정은 어떻게 되나요?"), dedup_key("배정은 어떻게  되나요"));
/// ```
pub fn dedup_key(question: &str) -> String {
    NON_KEY_CHARS
        .replace_all(&question.to_lowercase(), "")
        .into_owned()
}

/// Slug: runs of characters outside `[0-9a-z가-힣]` become a single `-`,
/// leading/trailing dashes are trimmed. May be empty.
pub fn slugify(question: &str) -> String {
    NON_KEY_CHARS
        .replace_all(&question.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Lowercase hex SHA-256 prefix of the question text.
pub fn short_hash(text: &str) -> String {
    let mut h = Sha256::new();
    h.update(text.as_bytes());
    let hex = format!("{:x}", h.finalize());
    hex[..HASH_ID_LEN].to_string()
}

/// Hands out ids that are unique within one build run.
#[derive(Debug, Default)]
pub struct IdAllocator {
    seen: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id for `question`: its slug (or hash fallback), suffixed
    /// with `-1`, `-2`, … when the base was already handed out.
    ///
    /// # Example
    /// ```
    /// use kb_builder::core::ids::IdAllocator;
    ///
    /// let mut ids = IdAllocator::new();
    /// assert_eq!(ids.allocate("급식은?"), "급식은");
    /// assert_eq!(ids.allocate("급식은!"), "급식은-1");
    /// assert_eq!(ids.allocate("급식은…"), "급식은-2");
    /// ```
    pub fn allocate(&mut self, question: &str) -> String {
        let mut base = slugify(question);
        if base.is_empty() {
            base = short_hash(question);
        }

        let mut candidate = base.clone();
        let mut index = 1u32;
        while self.seen.contains(&candidate) {
            candidate = format!("{base}-{index}");
            index += 1;
        }
        self.seen.insert(candidate.clone());
        candidate
    }
}
