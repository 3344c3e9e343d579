//! Normalization of scraped question/answer text.
//!
//! The HTML exports carry artifacts from PDF conversion: non-breaking
//! spaces, hard-wrapped lines, bullet glyphs of several shapes, and spaces
//! wrongly inserted between a word and its grammatical particle
//! (`학생 들 이` style). These helpers turn raw line blocks into the clean
//! strings stored in the knowledge base.
//!
//! Every function here is idempotent: feeding its output back in yields the
//! same string.

use regex::Regex;
use std::sync::LazyLock;

/// Korean particles in matching order. Longer variants sharing a suffix
/// with a shorter one must come first (`으로써` before `로써` before `로`).
const PARTICLES: [&str; 32] = [
    "으로써", "으로서", "로써", "로서", "으로", "로", "를", "을", "이", "가", "은", "는", "와",
    "과", "도", "에", "에서", "에게", "께", "까지", "부터", "마다", "만", "처럼", "하며", "하고",
    "라도", "이라도", "밖에", "뿐", "조차", "마저",
];

/// Leading glyphs that always mark a bullet line.
const BULLET_GLYPHS: [char; 3] = ['◉', '•', 'ü'];

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace regex"));

/// `l` / `I` used as a bullet by the PDF converter, followed by whitespace.
static LETTER_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[lI]\s").expect("static letter bullet regex"));

/// `-` bullet followed by whitespace or an opening bracket.
static DASH_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[\s\[]").expect("static dash bullet regex"));

/// One regex per particle: a syllable/digit, the stray whitespace, the
/// particle, and the non-Hangul boundary that must follow it.
static PARTICLE_GAPS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PARTICLES
        .iter()
        .map(|p| {
            Regex::new(&format!(r"([가-힣0-9])\s+({p})([^가-힣]|$)"))
                .expect("static particle regex")
        })
        .collect()
});

static DIGIT_UNIT_GAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9])\s+(명|개|건|학기|학년|반|회|시|분|단위|%)")
        .expect("static unit regex")
});

static NEWLINE_PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("static newline regex"));

/// Joins the `궁 금` token split by the converter. Runs on text whose
/// whitespace is already collapsed, after wrapped lines have been joined.
fn repair_split_tokens(text: &str) -> String {
    text.replace("궁 금", "궁금")
}

/// Normalizes a (possibly multi-line) question into one line.
///
/// # Example
/// ```
/// use kb_builder::core::normalize::normalize_question;
///
/// assert_eq!(
///     normalize_question("  입학 전형이\u{a0}궁 금\n합니다  "),
///     "입학 전형이 궁금 합니다"
/// );
/// ```
pub fn normalize_question(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    repair_split_tokens(collapsed.trim())
}

/// Result of classifying one answer line.
enum LineKind<'a> {
    /// Bullet line; payload is the text after the marker.
    Bullet(&'a str),
    /// `[...]` emphasis line.
    Bracketed(&'a str),
    Plain(&'a str),
}

fn classify_line(line: &str) -> LineKind<'_> {
    if line.starts_with(BULLET_GLYPHS) {
        return LineKind::Bullet(line.trim_start_matches(BULLET_GLYPHS).trim());
    }
    if LETTER_BULLET.is_match(line) || DASH_BULLET.is_match(line) {
        // Both markers are a single ASCII byte.
        return LineKind::Bullet(line[1..].trim());
    }
    if line.starts_with('[') {
        return LineKind::Bracketed(line);
    }
    LineKind::Plain(line)
}

/// Merges hard-wrapped answer lines into paragraphs and cleans spacing.
///
/// - each bullet line (`◉`, `•`, `ü`, `l `/`I `, `- `/`-[`) opens a new
///   `• ` paragraph;
/// - a `[` line while a paragraph is open starts a new paragraph;
/// - everything else is joined to the open paragraph with a single space.
///
/// The joined text is passed through [`fix_spacing`].
///
/// # Example
/// ```
/// use kb_builder::core::normalize::normalize_answer;
///
/// let raw = "한 학급당 26 명씩\n8학급을 운영합니다.\n◉ 남녀 합반\n- [참고] 내신";
/// assert_eq!(
///     normalize_answer(raw),
///     "한 학급당 26명씩 8학급을 운영합니다.\n• 남녀 합반\n• [참고] 내신"
/// );
/// ```
pub fn normalize_answer(text: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for raw in text.split('\n') {
        // `\s` also matches the non-breaking spaces left by the converter.
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let line = repair_split_tokens(&WHITESPACE_RUN.replace_all(trimmed, " "));

        match classify_line(&line) {
            LineKind::Bullet(rest) => {
                if !current.is_empty() {
                    paragraphs.push(std::mem::take(&mut current));
                }
                current = if rest.is_empty() {
                    "•".to_string()
                } else {
                    format!("• {rest}")
                };
            }
            LineKind::Bracketed(line) if !current.is_empty() => {
                paragraphs.push(std::mem::take(&mut current));
                current = line.to_string();
            }
            LineKind::Bracketed(line) | LineKind::Plain(line) => {
                if current.is_empty() {
                    current = line.to_string();
                } else {
                    current.push(' ');
                    current.push_str(line);
                }
            }
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    fix_spacing(&paragraphs.join("\n"))
}

/// Joins the split `궁 금` token, removes stray spaces before particles and
/// between digits and unit words, and trims whitespace around line breaks.
///
/// # Example
/// ```
/// use kb_builder::core::normalize::fix_spacing;
///
/// assert_eq!(fix_spacing("26 명을 모집합니다"), "26명을 모집합니다");
/// assert_eq!(fix_spacing("학교 에서 진행"), "학교에서 진행");
/// ```
pub fn fix_spacing(text: &str) -> String {
    let mut out = repair_split_tokens(text);
    for re in PARTICLE_GAPS.iter() {
        out = replace_until_stable(re, &out, "${1}${2}${3}");
    }
    out = DIGIT_UNIT_GAP.replace_all(&out, "${1}${2}").into_owned();
    NEWLINE_PADDING.replace_all(&out, "\n").into_owned()
}

/// The particle patterns consume their trailing boundary character, so a
/// particle that is itself the left side of the next gap (`가 가 가`) is
/// only caught on a later pass.
fn replace_until_stable(re: &Regex, text: &str, rep: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = re.replace_all(&current, rep);
        if next == current {
            return current;
        }
        current = next.into_owned();
    }
}
