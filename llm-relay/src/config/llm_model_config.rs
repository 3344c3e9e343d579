use crate::config::llm_provider::LlmProvider;

/// Configuration of the chat model the relay forwards to.
///
/// # Fields
///
/// - `provider`: which backend speaks the wire protocol.
/// - `model`: model identifier (e.g. `"gpt-4o-mini"`, `"llama3.1"`).
/// - `endpoint`: base URL without the API path.
/// - `api_key`: bearer token, required for OpenAI.
/// - `max_tokens`: generation cap, if any.
/// - `temperature`: sampling temperature (`0.0..=2.0`).
/// - `top_p`: nucleus sampling cutoff (`0.0..=1.0`).
/// - `timeout_secs`: whole-request timeout.
///
/// # Examples
///
/// ```
/// use llm_relay::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Ollama,
///     model: "llama3.1".to_string(),
///     endpoint: "http://localhost:11434".to_string(),
///     api_key: None,
///     max_tokens: Some(512),
///     temperature: Some(0.3),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.timeout_or_default(), 60);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}

/// Timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

impl LlmModelConfig {
    pub fn timeout_or_default(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}
