//! Grammar of the two general Q&A documents.
//!
//! ```text
//! <학교 현황 및 배정 관련>
//! 1) 2025학년도 모집 정원과
//! 학급 구성은 어떻게 되나요?
//! ◉ 한 학급당 26명씩 8학급,
//! 총 208명을 모집합니다.
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::{
    model::category::Category,
    parse::{DocumentGrammar, HeaderMatch},
};

static NUMBERED_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\)\s*(.*)").expect("static numbered question regex"));

/// Bracketed lines with this prefix are a reader group's banner, not a section.
const BANNER_PREFIX: &str = "분당맹모";

pub struct GeneralGrammar;

impl DocumentGrammar for GeneralGrammar {
    fn initial_section(&self) -> Category {
        Category::SchoolStatus
    }

    fn header(&self, line: &str) -> HeaderMatch {
        if !(line.starts_with('<') && line.ends_with('>')) {
            return HeaderMatch::NotHeader;
        }
        let label = line.trim_matches(|c: char| c == '<' || c == '>' || c == ' ').trim();
        if label.starts_with(BANNER_PREFIX) {
            HeaderMatch::Skip
        } else {
            HeaderMatch::Section(label.to_string())
        }
    }

    fn question_start<'a>(&self, line: &'a str) -> Option<&'a str> {
        NUMBERED_QUESTION
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
    }

    fn is_answer_start(&self, line: &str) -> bool {
        line.starts_with('◉')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_lines;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(str::to_string).collect()
    }

    #[test]
    fn recognizes_headers_and_banner() {
        let g = GeneralGrammar;
        assert_eq!(
            g.header("< 입시 관련 >"),
            HeaderMatch::Section("입시 관련".into())
        );
        assert_eq!(g.header("<분당맹모 질문 모음>"), HeaderMatch::Skip);
        assert_eq!(g.header("<미완성"), HeaderMatch::NotHeader);
    }

    #[test]
    fn numbered_question_start() {
        let g = GeneralGrammar;
        assert_eq!(g.question_start("12) 질문입니다"), Some("질문입니다"));
        assert_eq!(g.question_start("3)붙은 질문"), Some("붙은 질문"));
        assert_eq!(g.question_start("12 질문"), None);
        assert_eq!(g.question_start("가. 질문"), None);
    }

    #[test]
    fn parses_sections_and_multiline_questions() {
        let input = lines(
            "판교고등학교 Q&A\n\
             <학교 현황 및 배정 관련>\n\
             1) 2025학년도 모집 정원과\n\
             학급 구성은 어떻게 되나요?\n\
             ◉ 한 학급당 26명씩 8학급,\n\
             총 208명을 모집합니다.\n\
             <분당맹모 추가 질문>\n\
             <입시 관련>\n\
             2) 수시 비율은?\n\
             ◉ 약 70%\n\
             - 학생부종합 위주",
        );
        let (records, report) = parse_lines(&GeneralGrammar, "qna.pdf", &input);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].section, Category::SchoolStatus);
        assert_eq!(
            records[0].question,
            "2025학년도 모집 정원과 학급 구성은 어떻게 되나요?"
        );
        assert_eq!(
            records[0].answer,
            "◉ 한 학급당 26명씩 8학급,\n총 208명을 모집합니다."
        );
        assert_eq!(records[1].section, Category::Admissions);
        assert_eq!(records[1].answer, "◉ 약 70%\n- 학생부종합 위주");
        assert_eq!(report.skipped_headers, 1);
        assert_eq!(report.ignored_lines, 1);
    }
}
