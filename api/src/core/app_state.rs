use std::path::Path;

use kb_builder::{export::json::load_json, search::KnowledgeIndex};
use llm_relay::LlmRelay;
use tracing::{info, warn};

use crate::{
    core::app_config::{AppConfig, TempCommand},
    error_handler::AppError,
};

/// Shared state for all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Client for the configured completion provider.
    pub relay: LlmRelay,
    /// Used when a chat request carries no (or a blank) system prompt.
    pub system_prompt: String,
    /// Command run by `/api/temp`.
    pub temp_command: TempCommand,
    /// Read-only knowledge base; empty when none is configured.
    pub knowledge: KnowledgeIndex,
}

impl AppState {
    /// Builds the relay client and loads the optional knowledge base.
    pub fn from_config(cfg: AppConfig) -> Result<Self, AppError> {
        let knowledge = match cfg.knowledge_json.as_deref() {
            Some(path) => load_knowledge(path),
            None => KnowledgeIndex::default(),
        };

        let relay = LlmRelay::new(cfg.llm).map_err(AppError::RelayInit)?;
        info!(
            provider = %relay.provider(),
            model = relay.model(),
            knowledge_entries = knowledge.len(),
            "app state ready"
        );

        Ok(Self {
            relay,
            system_prompt: cfg.system_prompt,
            temp_command: cfg.temp_command,
            knowledge,
        })
    }
}

/// A missing or unreadable file leaves the service up with no entries.
fn load_knowledge(path: &Path) -> KnowledgeIndex {
    match load_json(path) {
        Ok(entries) => {
            info!(path = %path.display(), entries = entries.len(), "knowledge base loaded");
            KnowledgeIndex::new(entries)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "knowledge base not loaded; serving an empty list");
            KnowledgeIndex::default()
        }
    }
}
