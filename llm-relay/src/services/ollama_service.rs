//! Ollama chat client.
//!
//! - `POST {endpoint}/api/chat` with `stream=false`
//!
//! Uses the shared [`LlmModelConfig`] and requires
//! [`LlmProvider::Ollama`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{HttpError, Provider, ProviderError, ProviderErrorKind, Result, make_snippet},
};

#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OllamaService {
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not `Ollama`
    /// - `InvalidEndpoint` if `cfg.endpoint` is not an HTTP URL
    /// - [`crate::error_handler::RelayError::HttpTransport`] if the client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(
                ProviderError::new(Provider::Ollama, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_or_default()))
            .build()?;

        let url_chat = format!("{}/api/chat", endpoint.trim_end_matches('/'));

        info!(model = %cfg.model, endpoint = %cfg.endpoint, "OllamaService initialized");

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs one non-streaming chat request via `/api/chat`.
    ///
    /// Mapped options:
    /// - `num_predict`  ← `max_tokens`
    /// - `temperature`  ← `temperature`
    /// - `top_p`        ← `top_p`
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn chat(&self, message: &str, system: Option<&str>) -> Result<String> {
        let started = Instant::now();
        let body = ChatRequest::from_cfg(&self.cfg, message, system);

        debug!("POST {}", self.url_chat);
        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, %snippet, "Ollama /api/chat returned non-success status");
            return Err(ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: ChatResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `message.content` with `stream=false`"
                )),
            )
        })?;

        info!(
            latency_ms = started.elapsed().as_millis() as u64,
            reply_len = out.message.content.len(),
            "chat completed"
        );
        Ok(out.message.content)
    }
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatOptions>,
}

impl<'a> ChatRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, message: &'a str, system: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system",
                content: sys,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: message,
        });

        let options = ChatOptions {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            num_predict: cfg.max_tokens,
        };

        Self {
            model: &cfg.model,
            messages,
            stream: false,
            options: (!options.is_empty()).then_some(options),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct ChatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl ChatOptions {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.num_predict.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: String,
}
