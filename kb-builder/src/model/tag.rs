//! Fixed topical tag vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight topical tags. The declaration order **is** the
/// vocabulary order; classifier output is always sorted by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "입학·배정")]
    Admission,
    #[serde(rename = "학생경험·문화")]
    StudentLife,
    #[serde(rename = "학사운영")]
    AcademicOps,
    #[serde(rename = "학업·평가")]
    Assessment,
    #[serde(rename = "비교과·프로그램")]
    Programs,
    #[serde(rename = "진학·상담")]
    Counseling,
    #[serde(rename = "생활지원")]
    CampusSupport,
    #[serde(rename = "ACE특화")]
    Ace,
}

impl Tag {
    /// Whole vocabulary in order.
    pub const VOCABULARY: [Tag; 8] = [
        Tag::Admission,
        Tag::StudentLife,
        Tag::AcademicOps,
        Tag::Assessment,
        Tag::Programs,
        Tag::Counseling,
        Tag::CampusSupport,
        Tag::Ace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tag::Admission => "입학·배정",
            Tag::StudentLife => "학생경험·문화",
            Tag::AcademicOps => "학사운영",
            Tag::Assessment => "학업·평가",
            Tag::Programs => "비교과·프로그램",
            Tag::Counseling => "진학·상담",
            Tag::CampusSupport => "생활지원",
            Tag::Ace => "ACE특화",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
