//! Keyword-based topical tagging.
//!
//! Tags come from substring tests against the lower-cased
//! `question + " " + answer` plus defaults derived from the category.
//! Output is collected into a `BTreeSet<Tag>`, so it always follows the
//! vocabulary order no matter which rule fired first.

use std::collections::BTreeSet;

use crate::model::{category::Category, tag::Tag};

/// Keyword rules evaluated against the combined text.
const KEYWORD_RULES: &[(Tag, &[&str])] = &[
    (Tag::StudentLife, &["사제", "상담", "문화", "관계", "자치", "학생 주도"]),
    (
        Tag::AcademicOps,
        &["시간표", "일과", "자습", "운영", "선택과목", "교육과정", "학점제", "관리", "교과"],
    ),
    (
        Tag::Assessment,
        &["평가", "수능", "모의고사", "시험", "성취", "내신", "학습", "수행평가", "지필"],
    ),
    (
        Tag::Programs,
        &["프로그램", "동아리", "탐구", "멘토링", "런포런", "아카데미", "캠프"],
    ),
    (
        Tag::Counseling,
        &["진학", "입시", "수시", "정시", "면접", "논술", "합격", "전형"],
    ),
    (
        Tag::CampusSupport,
        &["급식", "석식", "시설", "휴대폰", "교복", "생활", "환경", "자습공간", "식사"],
    ),
    (Tag::Ace, &["ace", "pathfinder"]),
];

/// Admission keywords matched against the question only.
const ADMISSION_QUESTION_KEYWORDS: &[&str] = &["배정", "모집"];
/// Admission keywords matched against the combined text.
const ADMISSION_TEXT_KEYWORDS: &[&str] = &["내신", "출신중학교"];

/// Tags implied by the category alone.
fn category_defaults(category: Category) -> &'static [Tag] {
    match category {
        Category::SchoolStatus => &[Tag::Admission],
        Category::Curriculum => &[Tag::AcademicOps, Tag::Programs],
        Category::Admissions => &[Tag::Counseling, Tag::Assessment],
        Category::AceProgram => &[Tag::Ace],
    }
}

/// Classifies an entry into a subset of the tag vocabulary.
///
/// Falls back to `[학사운영]` when nothing matches.
///
/// # Example
/// ```
/// use kb_builder::classify::classify_tags;
/// use kb_builder::model::{category::Category, tag::Tag};
///
/// let tags = classify_tags(Category::AceProgram, "석식은 제공되나요?", "희망자 대상");
/// assert_eq!(tags, vec![Tag::CampusSupport, Tag::Ace]);
/// ```
pub fn classify_tags(category: Category, question: &str, answer: &str) -> Vec<Tag> {
    let text = format!("{question} {answer}").to_lowercase();
    let mut tags: BTreeSet<Tag> = category_defaults(category).iter().copied().collect();

    if ADMISSION_QUESTION_KEYWORDS.iter().any(|k| question.contains(k))
        || ADMISSION_TEXT_KEYWORDS.iter().any(|k| text.contains(k))
    {
        tags.insert(Tag::Admission);
    }

    for (tag, keywords) in KEYWORD_RULES {
        if keywords.iter().any(|k| text.contains(k)) {
            tags.insert(*tag);
        }
    }

    if tags.is_empty() {
        tags.insert(Tag::AcademicOps);
    }
    tags.into_iter().collect()
}
