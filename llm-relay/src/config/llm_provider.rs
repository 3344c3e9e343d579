use std::{fmt, str::FromStr};

use crate::error_handler::ConfigError;

/// Backend used for chat completions.
///
/// ```
/// use llm_relay::config::llm_provider::LlmProvider;
///
/// assert_eq!("openai".parse::<LlmProvider>(), Ok(LlmProvider::OpenAI));
/// assert_eq!(" Ollama ".parse::<LlmProvider>(), Ok(LlmProvider::Ollama));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// OpenAI API or any server speaking `/v1/chat/completions`.
    OpenAI,
    /// Local Ollama runtime (`/api/chat`).
    Ollama,
}

impl LlmProvider {
    /// Endpoint used when `LLM_ENDPOINT` is not set.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "https://api.openai.com",
            LlmProvider::Ollama => "http://localhost:11434",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAI => f.write_str("openai"),
            LlmProvider::Ollama => f.write_str("ollama"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_rejected() {
        assert_eq!(
            "claude".parse::<LlmProvider>(),
            Err(ConfigError::UnsupportedProvider("claude".into()))
        );
    }
}
