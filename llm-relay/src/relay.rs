//! Provider-agnostic chat relay.
//!
//! Construct once at startup, wrap in `Arc`, and share with request handlers.
//! Each call is independent: no history, no retries, no caching.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_relay::LlmRelay;
//!
//! # async fn run() -> llm_relay::error_handler::Result<()> {
//! let relay = Arc::new(LlmRelay::from_env()?);
//! let reply = relay.chat("급식은 어떻게 운영되나요?", Some("학교 안내 도우미")).await?;
//! println!("{reply}");
//! # Ok(()) }
//! ```

use tracing::debug;

use crate::{
    config::{default_config::config_from_env, llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::Result,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

#[derive(Debug)]
enum Backend {
    OpenAI(OpenAiService),
    Ollama(OllamaService),
}

/// Forwards one user message (plus system prompt) to the configured model.
#[derive(Debug)]
pub struct LlmRelay {
    backend: Backend,
    provider: LlmProvider,
    model: String,
}

impl LlmRelay {
    /// Builds the provider client for `cfg`.
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        let provider = cfg.provider;
        let model = cfg.model.clone();
        let backend = match provider {
            LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg)?),
            LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg)?),
        };
        Ok(Self {
            backend,
            provider,
            model,
        })
    }

    /// Reads the config from the environment and builds the client.
    pub fn from_env() -> Result<Self> {
        Self::new(config_from_env()?)
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `message` with an optional `system` prompt and returns the
    /// assistant text verbatim.
    pub async fn chat(&self, message: &str, system: Option<&str>) -> Result<String> {
        debug!(provider = %self.provider, model = %self.model, "relaying chat message");
        match &self.backend {
            Backend::OpenAI(svc) => svc.chat(message, system).await,
            Backend::Ollama(svc) => svc.chat(message, system).await,
        }
    }
}
