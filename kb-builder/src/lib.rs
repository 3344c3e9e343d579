//! Knowledge-base builder for the school Q&A assistant.
//!
//! Turns HTML exports of the published Q&A documents into a normalized,
//! deduplicated and tagged list of [`KnowledgeEntry`] records, written as a
//! TypeScript module for the front-end and as plain JSON.
//!
//! ```no_run
//! use kb_builder::{config::BuildConfig, run::build_knowledge_base};
//!
//! let summary = build_knowledge_base(&BuildConfig::from_env())?;
//! println!("{} entries", summary.entries);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classify;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod merge;
pub mod model;
pub mod parse;
pub mod run;
pub mod search;

pub use model::entry::KnowledgeEntry;
