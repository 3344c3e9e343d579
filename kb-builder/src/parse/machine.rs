//! Shared parsing state machine.
//!
//! States:
//! - `AwaitingQuestion` — before the first question or right after a header;
//!   lines are ignored.
//! - `InQuestion` — a question was opened; non-answer lines extend it.
//! - `InAnswer` — the first answer line was seen; every line is answer body
//!   until the next question or header.
//!
//! Headers and question starts flush the open record; the trailing record
//! is flushed at end of input.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    model::{category::Category, entry::RawRecord},
    parse::{DocumentGrammar, HeaderMatch},
};

/// More continuation lines than this on one question usually means the
/// answer's first line lacked a recognized bullet and was absorbed.
pub const MAX_QUESTION_CONTINUATIONS: usize = 3;

/// Counters collected while parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub lines: usize,
    pub records: usize,
    /// Lines seen while no question was open.
    pub ignored_lines: usize,
    /// Header-shaped lines dropped by the grammar.
    pub skipped_headers: usize,
    /// Headers not present in the section table.
    pub unknown_sections: usize,
    /// Questions that exceeded [`MAX_QUESTION_CONTINUATIONS`].
    pub suspicious_questions: usize,
}

#[derive(Debug)]
struct OpenRecord {
    section: Category,
    question: Vec<String>,
    answer: Vec<String>,
}

impl OpenRecord {
    fn new(section: Category, first_line: &str) -> Self {
        Self {
            section,
            question: vec![first_line.trim().to_string()],
            answer: Vec::new(),
        }
    }

    fn finish(self) -> RawRecord {
        RawRecord {
            section: self.section,
            question: self.question.join(" ").trim().to_string(),
            answer: self.answer.join("\n").trim().to_string(),
        }
    }
}

#[derive(Debug)]
enum ParserState {
    AwaitingQuestion,
    InQuestion(OpenRecord),
    InAnswer(OpenRecord),
}

impl ParserState {
    /// Closes the open record, if any, into `records`.
    fn flush_into(self, records: &mut Vec<RawRecord>) {
        match self {
            ParserState::AwaitingQuestion => {}
            ParserState::InQuestion(open) | ParserState::InAnswer(open) => {
                records.push(open.finish());
            }
        }
    }
}

/// Runs `grammar` over the lines of document `source`.
pub fn parse_lines<G: DocumentGrammar>(
    grammar: &G,
    source: &str,
    lines: &[String],
) -> (Vec<RawRecord>, ParseReport) {
    let mut report = ParseReport {
        lines: lines.len(),
        ..ParseReport::default()
    };
    let mut records: Vec<RawRecord> = Vec::new();
    let mut section = grammar.initial_section();
    let mut state = ParserState::AwaitingQuestion;

    for line in lines {
        match grammar.header(line) {
            HeaderMatch::Skip => {
                report.skipped_headers += 1;
                continue;
            }
            HeaderMatch::Section(label) => {
                std::mem::replace(&mut state, ParserState::AwaitingQuestion)
                    .flush_into(&mut records);
                match Category::from_section_label(&label) {
                    Some(cat) => section = cat,
                    None => {
                        report.unknown_sections += 1;
                        warn!(%source, %label, kept = %section, "unknown section header");
                    }
                }
                continue;
            }
            HeaderMatch::NotHeader => {}
        }

        if let Some(text) = grammar.question_start(line) {
            let next = ParserState::InQuestion(OpenRecord::new(section, text));
            std::mem::replace(&mut state, next).flush_into(&mut records);
            continue;
        }

        state = match state {
            ParserState::AwaitingQuestion => {
                report.ignored_lines += 1;
                ParserState::AwaitingQuestion
            }
            ParserState::InQuestion(mut open) if !grammar.is_answer_start(line) => {
                open.question.push(line.clone());
                // Parts include the opening line.
                if open.question.len() == MAX_QUESTION_CONTINUATIONS + 2 {
                    report.suspicious_questions += 1;
                    warn!(
                        %source,
                        question = %open.question[0],
                        "question kept absorbing lines without an answer marker"
                    );
                }
                ParserState::InQuestion(open)
            }
            ParserState::InQuestion(mut open) | ParserState::InAnswer(mut open) => {
                open.answer.push(line.clone());
                ParserState::InAnswer(open)
            }
        };
    }
    state.flush_into(&mut records);

    report.records = records.len();
    debug!(%source, ?report, "document parsed");
    (records, report)
}
