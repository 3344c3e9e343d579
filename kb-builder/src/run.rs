//! End-to-end build: read the configured documents, parse, merge, export.

use std::{collections::BTreeMap, fs, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::BuildConfig,
    core::html::extract_lines,
    errors::BuildError,
    export::{json::write_json, typescript::write_typescript},
    merge::KnowledgeMerger,
    model::entry::KnowledgeEntry,
    parse::{DocumentKind, ParseReport, parse_document},
};

/// Per-document part of [`BuildSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub source: String,
    pub kind: DocumentKind,
    pub report: ParseReport,
}

/// In-memory result of parsing and merging, before anything is written.
#[derive(Debug, Clone)]
pub struct BuiltKnowledge {
    pub entries: Vec<KnowledgeEntry>,
    pub documents: Vec<DocumentSummary>,
    pub merged_duplicates: usize,
    pub skipped_records: usize,
}

/// What one build produced. Logged in full at debug level at the end of
/// the run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub documents: Vec<DocumentSummary>,
    pub raw_records: usize,
    pub merged_duplicates: usize,
    pub skipped_records: usize,
    pub entries: usize,
    pub entries_by_category: BTreeMap<String, usize>,
    pub entries_by_tag: BTreeMap<String, usize>,
    pub output_ts: PathBuf,
    pub output_json: PathBuf,
    pub elapsed_ms: u64,
}

/// Reads, parses and merges every configured document.
///
/// Documents are processed in configuration order, which is also the
/// first-seen order used for ties inside a category.
pub fn build_entries(config: &BuildConfig) -> Result<BuiltKnowledge> {
    let mut merger = KnowledgeMerger::new();
    let mut documents = Vec::with_capacity(config.documents.len());

    for doc in &config.documents {
        let path = config.documents_dir.join(&doc.html_path);
        let html = fs::read_to_string(&path)
            .map_err(|source| BuildError::ReadDocument {
                path: path.clone(),
                source,
            })
            .with_context(|| format!("reading source document {}", doc.source))?;

        let lines = extract_lines(&html);
        let (records, report) = parse_document(doc.kind, &doc.source, &lines);
        info!(source = %doc.source, lines = report.lines, records = records.len(), "Parsed document");

        for record in &records {
            merger.add(record, &doc.source);
        }
        documents.push(DocumentSummary {
            source: doc.source.clone(),
            kind: doc.kind,
            report,
        });
    }

    let merged_duplicates = merger.merged_count();
    let skipped_records = merger.skipped_count();
    Ok(BuiltKnowledge {
        entries: merger.finish(),
        documents,
        merged_duplicates,
        skipped_records,
    })
}

/// Runs the full build and writes both output files.
///
/// # Steps
/// 1. **Extract** text lines from each HTML export.
/// 2. **Parse** lines into raw records with the document's grammar.
/// 3. **Merge** duplicates, classify, order and assign ids.
/// 4. **Export** the TypeScript module and the JSON array.
#[tracing::instrument(level = "info", skip_all, fields(documents_dir = %config.documents_dir.display()))]
pub fn build_knowledge_base(config: &BuildConfig) -> Result<BuildSummary> {
    let started = Instant::now();

    let built = build_entries(config)?;
    info!(
        entries = built.entries.len(),
        merged = built.merged_duplicates,
        skipped = built.skipped_records,
        "Merged knowledge entries"
    );

    write_typescript(&config.output_ts, &built.entries)
        .with_context(|| format!("writing {}", config.output_ts.display()))?;
    write_json(&config.output_json, &built.entries)
        .with_context(|| format!("writing {}", config.output_json.display()))?;

    let mut entries_by_category = BTreeMap::new();
    let mut entries_by_tag = BTreeMap::new();
    for entry in &built.entries {
        *entries_by_category
            .entry(entry.category.label().to_string())
            .or_insert(0) += 1;
        for tag in &entry.tags {
            *entries_by_tag.entry(tag.label().to_string()).or_insert(0) += 1;
        }
    }

    let summary = BuildSummary {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        raw_records: built.documents.iter().map(|d| d.report.records).sum(),
        entries: built.entries.len(),
        documents: built.documents,
        merged_duplicates: built.merged_duplicates,
        skipped_records: built.skipped_records,
        entries_by_category,
        entries_by_tag,
        output_ts: config.output_ts.clone(),
        output_json: config.output_json.clone(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        entries = summary.entries,
        elapsed_ms = summary.elapsed_ms,
        "Knowledge base written"
    );
    debug!(?summary, "Build summary");
    Ok(summary)
}
