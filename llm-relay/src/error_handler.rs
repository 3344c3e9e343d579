//! Unified error handling for `llm-relay`.
//!
//! A single top-level [`RelayError`] wraps configuration errors
//! ([`ConfigError`], raised once at startup) and provider errors
//! ([`ProviderError`], raised per request). Small helpers read and validate
//! variables through a lookup function so configs can be built from the
//! process environment or from a map in tests.
//!
//! All messages carry the `[LLM Relay]` prefix to simplify attribution in logs.

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, RelayError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream provider returned something unusable.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (connect, timeout, body read).
    #[error("[LLM Relay] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Required variable is missing or empty.
    #[error("[LLM Relay] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse.
    #[error("[LLM Relay] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Unsupported value of `LLM_PROVIDER`.
    #[error("[LLM Relay] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[LLM Relay] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[LLM Relay] {field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },

    #[error("[LLM Relay] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Upstream backend that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Ollama,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAI => f.write_str("OpenAI"),
            Provider::Ollama => f.write_str("Ollama"),
        }
    }
}

/// Non-2xx response details.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// Trimmed start of the response body.
    pub snippet: String,
}

#[derive(Debug, Clone)]
pub enum ProviderErrorKind {
    /// Config selected a different provider than the service was built for.
    InvalidProvider,
    MissingApiKey,
    InvalidEndpoint(String),
    HttpStatus(HttpError),
    Decode(String),
    /// Response decoded but carried no assistant message.
    EmptyChoices,
}

#[derive(Debug, Error)]
#[error("[LLM Relay] {provider}: {kind}")]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::InvalidProvider => f.write_str("invalid provider for this service"),
            ProviderErrorKind::MissingApiKey => f.write_str("missing API key"),
            ProviderErrorKind::InvalidEndpoint(e) => write!(f, "invalid endpoint: {e}"),
            ProviderErrorKind::HttpStatus(h) => {
                write!(f, "HTTP {} from {}: {}", h.status, h.url, h.snippet)
            }
            ProviderErrorKind::Decode(msg) => write!(f, "decode error: {msg}"),
            ProviderErrorKind::EmptyChoices => f.write_str("response contained no choices"),
        }
    }
}

/// Maximum number of characters of an upstream body kept in errors/logs.
const SNIPPET_CHARS: usize = 240;

/// Trims and shortens an upstream body for errors and logs.
pub fn make_snippet(body: &str) -> String {
    let trimmed = body.trim();
    let mut out: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    if trimmed.chars().count() > SNIPPET_CHARS {
        out.push('…');
    }
    out
}

/* ------------------------------------------------------------------------- */
/* Variable helpers                                                          */
/* ------------------------------------------------------------------------- */

/// Looks up a variable, treating blank values as unset.
pub fn opt_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fetches a required, non-empty variable.
pub fn must_var<F>(lookup: &F, name: &'static str) -> std::result::Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    opt_var(lookup, name).ok_or(ConfigError::MissingVar(name))
}

/// Parses an optional `u32` (`Ok(None)` if unset/blank).
pub fn opt_u32<F>(lookup: &F, name: &'static str) -> std::result::Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    opt_var(lookup, name)
        .map(|v| {
            v.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        })
        .transpose()
}

/// Parses an optional `u64` (`Ok(None)` if unset/blank).
pub fn opt_u64<F>(lookup: &F, name: &'static str) -> std::result::Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    opt_var(lookup, name)
        .map(|v| {
            v.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        })
        .transpose()
}

/// Parses an optional `f32` (`Ok(None)` if unset/blank).
pub fn opt_f32<F>(lookup: &F, name: &'static str) -> std::result::Result<Option<f32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    opt_var(lookup, name)
        .map(|v| {
            v.parse::<f32>().map_err(|_| ConfigError::InvalidNumber {
                var: name,
                reason: "expected a decimal number",
            })
        })
        .transpose()
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> std::result::Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}

/// Validates that a float lies within an inclusive range.
pub fn validate_range_f32(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        })
    }
}
