//! Line-oriented question/answer extraction.
//!
//! Both document layouts share one finite-state machine ([`machine`]); the
//! layouts differ only in how a line is recognized as a section header, a
//! question start or the first answer line. Those rules live behind the
//! [`DocumentGrammar`] trait.

pub mod ace;
pub mod general;
pub mod machine;

use serde::{Deserialize, Serialize};

use crate::model::{category::Category, entry::RawRecord};
pub use machine::{ParseReport, parse_lines};

/// What a grammar says about a potential header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Not a header; continue with question/answer rules.
    NotHeader,
    /// Header-shaped line that must be dropped without side effects.
    Skip,
    /// Section boundary carrying the raw label (`입시 관련`).
    Section(String),
}

/// Layout-specific line recognizers.
pub trait DocumentGrammar {
    /// Category of records before any section header is seen.
    fn initial_section(&self) -> Category;

    /// Classifies a line as section header.
    fn header(&self, line: &str) -> HeaderMatch;

    /// If the line opens a new question, returns the question text after
    /// the numbering marker.
    fn question_start<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Whether the line is the first line of an answer.
    fn is_answer_start(&self, line: &str) -> bool;
}

/// Layout of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// `1) 질문` numbering with `<섹션>` headers and `◉` answers.
    General,
    /// `가. 질문` numbering with `ü`/`◉` answers, single ACE section.
    Ace,
}

/// Parses already-extracted text lines of one document.
pub fn parse_document(
    kind: DocumentKind,
    source: &str,
    lines: &[String],
) -> (Vec<RawRecord>, ParseReport) {
    match kind {
        DocumentKind::General => parse_lines(&general::GeneralGrammar, source, lines),
        DocumentKind::Ace => parse_lines(&ace::AceGrammar, source, lines),
    }
}
