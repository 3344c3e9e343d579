//! Document sections the entries are grouped by.
//!
//! Categories have a fixed display rank which drives the final ordering of
//! the generated knowledge base. Raw section headers found in the documents
//! are mapped through [`Category::from_section_label`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Topical section of a knowledge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// School status and student assignment.
    #[serde(rename = "학교 현황 · 배정")]
    SchoolStatus,
    /// Curricular / extra-curricular programs and their operation.
    #[serde(rename = "교과 · 비교과 운영")]
    Curriculum,
    /// University admissions strategy.
    #[serde(rename = "입시 · 진학 전략")]
    Admissions,
    /// ACE program Q&A document.
    #[serde(rename = "ACE 프로그램")]
    AceProgram,
}

impl Category {
    /// All categories in rank order.
    pub const ALL: [Category; 4] = [
        Category::SchoolStatus,
        Category::Curriculum,
        Category::Admissions,
        Category::AceProgram,
    ];

    /// Display label used in the generated files.
    pub fn label(self) -> &'static str {
        match self {
            Category::SchoolStatus => "학교 현황 · 배정",
            Category::Curriculum => "교과 · 비교과 운영",
            Category::Admissions => "입시 · 진학 전략",
            Category::AceProgram => "ACE 프로그램",
        }
    }

    /// Sort rank: lower comes first.
    pub fn rank(self) -> u8 {
        match self {
            Category::SchoolStatus => 0,
            Category::Curriculum => 1,
            Category::Admissions => 2,
            Category::AceProgram => 3,
        }
    }

    /// Maps a section header as written in the source documents
    /// (e.g. `입시 관련`) or an already-normalized display label.
    ///
    /// Returns `None` for headers that are not part of the fixed table.
    ///
    /// # Example
    /// ```
    /// use kb_builder::model::category::Category;
    ///
    /// assert_eq!(Category::from_section_label("입시 관련"), Some(Category::Admissions));
    /// assert_eq!(Category::from_section_label("ACE 프로그램"), Some(Category::AceProgram));
    /// assert_eq!(Category::from_section_label("부록"), None);
    /// ```
    pub fn from_section_label(label: &str) -> Option<Self> {
        match label.trim() {
            "학교 현황 및 배정 관련" => Some(Category::SchoolStatus),
            "학교의 교과 / 비교과 프로그램과 운영 및 관리" => Some(Category::Curriculum),
            "입시 관련" => Some(Category::Admissions),
            other => Category::ALL.into_iter().find(|c| c.label() == other),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_headers_map_to_display_categories() {
        assert_eq!(
            Category::from_section_label("학교 현황 및 배정 관련"),
            Some(Category::SchoolStatus)
        );
        assert_eq!(
            Category::from_section_label(" 학교의 교과 / 비교과 프로그램과 운영 및 관리 "),
            Some(Category::Curriculum)
        );
        assert_eq!(Category::from_section_label("분당맹모 질문"), None);
    }

    #[test]
    fn serializes_as_korean_label() {
        let s = serde_json::to_string(&Category::Curriculum).unwrap();
        assert_eq!(s, "\"교과 · 비교과 운영\"");
    }

    #[test]
    fn ranks_follow_declaration_order() {
        let ranks: Vec<u8> = Category::ALL.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }
}
