//! Builder configuration: where documents live and where outputs go.
//!
//! Values come from the environment (`KB_ROOT`, `KB_DOCUMENTS_DIR`,
//! `KB_OUTPUT_TS`, `KB_OUTPUT_JSON`), falling back to the layout of the web
//! project: documents in `<root>/public/documents`, outputs in
//! `<root>/src/data`.

use std::path::PathBuf;

use serde::Serialize;

use crate::parse::DocumentKind;

/// One input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSpec {
    /// HTML export, relative to the documents directory.
    pub html_path: PathBuf,
    /// Name recorded in each entry's `sources` (the published PDF).
    pub source: String,
    pub kind: DocumentKind,
}

impl DocumentSpec {
    pub fn new(html_path: impl Into<PathBuf>, source: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            html_path: html_path.into(),
            source: source.into(),
            kind,
        }
    }
}

/// The three published Q&A documents, in merge priority order.
pub fn default_documents() -> Vec<DocumentSpec> {
    vec![
        DocumentSpec::new(
            "판교고등학교_QNA_HTML형식/Converted.html",
            "판교고등학교_QNA.pdf",
            DocumentKind::General,
        ),
        DocumentSpec::new(
            "2026 맹모가 묻고 학교가 답하다(판교고등학교)_HTML형식/Converted.html",
            "2026 맹모가 묻고 학교가 답하다.pdf",
            DocumentKind::General,
        ),
        DocumentSpec::new(
            "판교고등학교_ACE프로그램_QNA_HTML형식/Converted.html",
            "판교고등학교_ACE프로그램_QNA.pdf",
            DocumentKind::Ace,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    pub documents_dir: PathBuf,
    pub output_ts: PathBuf,
    pub output_json: PathBuf,
    pub documents: Vec<DocumentSpec>,
}

impl BuildConfig {
    /// Default layout below `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data = root.join("src").join("data");
        Self {
            documents_dir: root.join("public").join("documents"),
            output_ts: data.join("knowledgeBase.ts"),
            output_json: data.join("knowledgeBase.json"),
            documents: default_documents(),
        }
    }

    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup; blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut cfg = Self::for_root(get("KB_ROOT").unwrap_or_else(|| ".".to_string()));
        if let Some(dir) = get("KB_DOCUMENTS_DIR") {
            cfg.documents_dir = dir.into();
        }
        if let Some(path) = get("KB_OUTPUT_TS") {
            cfg.output_ts = path.into();
        }
        if let Some(path) = get("KB_OUTPUT_JSON") {
            cfg.output_json = path.into();
        }
        cfg
    }
}
