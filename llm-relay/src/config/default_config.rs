//! Relay model config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_PROVIDER`     = `openai` (default) | `ollama`
//! - `LLM_MODEL`        = model name (default `gpt-4o-mini`)
//! - `LLM_ENDPOINT`     = base URL (default per provider)
//! - `OPENAI_API_KEY`   = bearer token (required for `openai`)
//! - `LLM_MAX_TOKENS`   = optional generation cap (u32)
//! - `LLM_TEMPERATURE`  = optional, `0.0..=2.0`
//! - `LLM_TOP_P`        = optional, `0.0..=1.0`
//! - `LLM_TIMEOUT_SECS` = request timeout (default 60)

use crate::{
    config::{
        llm_model_config::{DEFAULT_TIMEOUT_SECS, LlmModelConfig},
        llm_provider::LlmProvider,
    },
    error_handler::{
        ConfigError, must_var, opt_f32, opt_u32, opt_u64, opt_var, validate_http_endpoint,
        validate_range_f32,
    },
};

/// Model used when `LLM_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Reads the config from the process environment.
pub fn config_from_env() -> Result<LlmModelConfig, ConfigError> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds and validates the config from an arbitrary variable lookup.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
/// - [`ConfigError::MissingVar`] when `OPENAI_API_KEY` is absent for `openai`
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for bad numbers
/// - [`ConfigError::InvalidFormat`] for a non-HTTP endpoint
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = match opt_var(&lookup, "LLM_PROVIDER") {
        Some(raw) => raw.parse::<LlmProvider>()?,
        None => LlmProvider::OpenAI,
    };

    let model = opt_var(&lookup, "LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let endpoint = opt_var(&lookup, "LLM_ENDPOINT")
        .unwrap_or_else(|| provider.default_endpoint().to_string());
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let api_key = match provider {
        LlmProvider::OpenAI => Some(must_var(&lookup, "OPENAI_API_KEY")?),
        LlmProvider::Ollama => opt_var(&lookup, "OPENAI_API_KEY"),
    };

    let temperature = opt_f32(&lookup, "LLM_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("LLM_TEMPERATURE", t, 0.0, 2.0)?;
    }
    let top_p = opt_f32(&lookup, "LLM_TOP_P")?;
    if let Some(p) = top_p {
        validate_range_f32("LLM_TOP_P", p, 0.0, 1.0)?;
    }

    let timeout_secs = opt_u64(&lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::OutOfRange {
            field: "LLM_TIMEOUT_SECS",
            detail: "must be greater than 0",
        });
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: opt_u32(&lookup, "LLM_MAX_TOKENS")?,
        temperature,
        top_p,
        timeout_secs: Some(timeout_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn openai_defaults() {
        let cfg = config_from_lookup(env(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(cfg.provider, LlmProvider::OpenAI);
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.endpoint, "https://api.openai.com");
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.timeout_secs, Some(60));
        assert_eq!(cfg.temperature, None);
    }

    #[test]
    fn openai_requires_api_key() {
        assert_eq!(
            config_from_lookup(env(&[])),
            Err(ConfigError::MissingVar("OPENAI_API_KEY"))
        );
    }

    #[test]
    fn ollama_needs_no_key_and_has_local_endpoint() {
        let cfg = config_from_lookup(env(&[
            ("LLM_PROVIDER", "ollama"),
            ("LLM_MODEL", "llama3.1"),
            ("LLM_MAX_TOKENS", "512"),
            ("LLM_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint, "http://localhost:11434");
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.max_tokens, Some(512));
        assert_eq!(cfg.timeout_secs, Some(30));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = [("OPENAI_API_KEY", "sk")];
        let with = |extra: (&'static str, &'static str)| {
            let mut pairs = base.to_vec();
            pairs.push(extra);
            config_from_lookup(env(&pairs))
        };

        assert!(matches!(
            with(("LLM_TEMPERATURE", "2.5")),
            Err(ConfigError::OutOfRange { field: "LLM_TEMPERATURE", .. })
        ));
        assert!(matches!(
            with(("LLM_TEMPERATURE", "warm")),
            Err(ConfigError::InvalidNumber { var: "LLM_TEMPERATURE", .. })
        ));
        assert!(matches!(
            with(("LLM_ENDPOINT", "api.openai.com")),
            Err(ConfigError::InvalidFormat { var: "LLM_ENDPOINT", .. })
        ));
        assert!(matches!(
            with(("LLM_TIMEOUT_SECS", "0")),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            with(("LLM_PROVIDER", "bard")),
            Err(ConfigError::UnsupportedProvider(_))
        ));
    }
}
