//! TypeScript module export (`src/data/knowledgeBase.ts`).

use std::path::Path;

use tracing::info;

use crate::{errors::Result, export::write_file, model::entry::KnowledgeEntry};

const HEADER: &str = "\
// ⚠️ 이 파일은 build-knowledge-base 명령으로 생성되었습니다.
// 문서를 갱신한 후에는 명령을 다시 실행해 주세요.

export interface KnowledgeEntry {
  id: string;
  category: string;
  question: string;
  answer: string;
  sources: string[];
  tags: string[];
}

";

/// Renders the module text: header, interface, the entries as 2-space
/// pretty JSON (non-ASCII kept literal), and the default export.
///
/// # Example
/// ```
/// use kb_builder::export::typescript::render_typescript;
///
/// let ts = render_typescript(&[]).unwrap();
/// assert!(ts.contains("const knowledgeEntries: KnowledgeEntry[] = [];"));
/// assert!(ts.ends_with("export default knowledgeEntries;\n"));
/// ```
pub fn render_typescript(entries: &[KnowledgeEntry]) -> Result<String> {
    let data = serde_json::to_string_pretty(entries)?;
    Ok(format!(
        "{HEADER}const knowledgeEntries: KnowledgeEntry[] = {data};\n\nexport default knowledgeEntries;\n"
    ))
}

/// Renders and writes the module to `path`.
pub fn write_typescript(path: &Path, entries: &[KnowledgeEntry]) -> Result<()> {
    let content = render_typescript(entries)?;
    write_file(path, &content)?;
    info!(entries = entries.len(), "typescript: wrote knowledge base -> {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{category::Category, tag::Tag};

    #[test]
    fn module_embeds_pretty_json_with_literal_hangul() {
        let entries = vec![KnowledgeEntry {
            id: "급식은".to_string(),
            category: Category::SchoolStatus,
            question: "급식은?".to_string(),
            answer: "• 제공합니다".to_string(),
            sources: vec!["판교고등학교_QNA.pdf".to_string()],
            tags: vec![Tag::CampusSupport],
        }];
        let ts = render_typescript(&entries).unwrap();

        assert!(ts.starts_with("// ⚠️"));
        assert!(ts.contains("export interface KnowledgeEntry {\n  id: string;"));
        assert!(ts.contains(
            "const knowledgeEntries: KnowledgeEntry[] = [\n  {\n    \"id\": \"급식은\",\n    \"category\": \"학교 현황 · 배정\","
        ));
        assert!(ts.contains("    \"tags\": [\n      \"생활지원\"\n    ]\n  }\n];\n\nexport default knowledgeEntries;\n"));
        assert!(!ts.contains("\\u"));
    }
}
