//! Plain-text line extraction from converted HTML documents.
//!
//! The inputs are PDF-to-HTML exports where every visual line of the PDF is
//! its own text node. Markup carries no meaning for us: the document text is
//! the concatenation of its text nodes (entities decoded by the parser),
//! minus `script`/`style` bodies, split into trimmed non-empty lines.

use scraper::{Html, Node};

/// Elements whose text is never document content.
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Returns the trimmed, non-empty text lines of an HTML document, in
/// document order.
///
/// # Example
/// ```
/// use kb_builder::core::html::extract_lines;
///
/// let html = "<html><body>\n<p>&lt;입시 관련&gt;</p>\n<p>1) 질문&nbsp;</p>\n\n</body></html>";
/// assert_eq!(extract_lines(html), vec!["<입시 관련>", "1) 질문"]);
/// ```
pub fn extract_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let mut text = String::with_capacity(html.len() / 2);
    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let skipped = node
            .parent()
            .and_then(|p| p.value().as_element())
            .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()));
        if !skipped {
            text.push_str(chunk);
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
