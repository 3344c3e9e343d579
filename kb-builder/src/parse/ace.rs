//! Grammar of the ACE program Q&A document: `가.` style numbering, a single
//! section, and answers marked with `ü` or `◉`.

use regex::Regex;
use std::sync::LazyLock;

use crate::{
    model::category::Category,
    parse::{DocumentGrammar, HeaderMatch},
};

static LETTERED_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[가-힣]\.\s*(.*)").expect("static lettered question regex"));

pub struct AceGrammar;

impl DocumentGrammar for AceGrammar {
    fn initial_section(&self) -> Category {
        Category::AceProgram
    }

    fn header(&self, _line: &str) -> HeaderMatch {
        HeaderMatch::NotHeader
    }

    fn question_start<'a>(&self, line: &'a str) -> Option<&'a str> {
        LETTERED_QUESTION
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
    }

    fn is_answer_start(&self, line: &str) -> bool {
        line.starts_with('ü') || line.starts_with('◉')
    }
}
