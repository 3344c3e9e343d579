//! Service configuration read once at startup.
//!
//! # Environment variables
//!
//! - `API_ADDRESS`     = listen address (default `0.0.0.0:8000`)
//! - `ALLOWED_ORIGINS` = comma-separated CORS origins (default
//!   `http://localhost:3000`); `*` allows any origin
//! - `SYSTEM_PROMPT`   = default system prompt for `/chat`
//! - `TEMP_COMMAND`    = temperature command line (default `vcgencmd measure_temp`)
//! - `KNOWLEDGE_JSON`  = optional path of the built knowledge base JSON
//! - `LLM_*`, `OPENAI_API_KEY` = see `llm_relay::config::default_config`

use std::path::PathBuf;

use axum::http::HeaderValue;
use llm_relay::config::{default_config::config_from_lookup, llm_model_config::LlmModelConfig};
use thiserror::Error;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_TEMP_COMMAND: &str = "vcgencmd measure_temp";

/// Prompt used when neither the request nor `SYSTEM_PROMPT` provides one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "너는 판교고등학교에 대해 매우 잘 아는 친절한 도우미이며, 학생 혹은 학부모들의 질문에 대한 Q&A를 담당하고 있어. 제공된 학교 공식 문서 발췌 내용만을 근거로 정확하고 도움이 되는 답변을 제공해. 문서에 정보가 없으면 사실대로 모른다고 말하고, 절대로 추측하거나 문서에 없는 내용을 만들어내지 마.";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Llm(#[from] llm_relay::error_handler::ConfigError),

    #[error("invalid API_ADDRESS `{0}`: expected host:port")]
    InvalidAddress(String),

    #[error("invalid origin `{0}` in ALLOWED_ORIGINS")]
    InvalidOrigin(String),

    #[error("TEMP_COMMAND must not be empty")]
    EmptyTempCommand,
}

/// CORS policy.
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Program and arguments of the temperature command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TempCommand {
    /// Splits a command line on whitespace. No shell quoting is supported.
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ConfigError::EmptyTempCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub address: String,
    pub allowed_origins: AllowedOrigins,
    pub system_prompt: String,
    pub temp_command: TempCommand,
    pub knowledge_json: Option<PathBuf>,
    pub llm: LlmModelConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup; blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let address = get("API_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        validate_address(&address)?;

        let allowed_origins = parse_origins(
            &get("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
        )?;

        let system_prompt =
            get("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let temp_command = TempCommand::parse(
            &get("TEMP_COMMAND").unwrap_or_else(|| DEFAULT_TEMP_COMMAND.to_string()),
        )?;

        Ok(Self {
            address,
            allowed_origins,
            system_prompt,
            temp_command,
            knowledge_json: get("KNOWLEDGE_JSON").map(PathBuf::from),
            llm: config_from_lookup(&lookup)?,
        })
    }
}

/// `host:port` with a numeric port; the host is resolved at bind time.
fn validate_address(address: &str) -> Result<(), ConfigError> {
    match address.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => Ok(()),
        _ => Err(ConfigError::InvalidAddress(address.to_string())),
    }
}

fn parse_origins(raw: &str) -> Result<AllowedOrigins, ConfigError> {
    let items: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() || items.contains(&"*") {
        return Ok(AllowedOrigins::Any);
    }

    items
        .into_iter()
        .map(|o| {
            HeaderValue::from_str(o.trim_end_matches('/'))
                .map_err(|_| ConfigError::InvalidOrigin(o.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(AllowedOrigins::List)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        map.entry("OPENAI_API_KEY".into()).or_insert_with(|| "sk-test".into());
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(cfg.address, "0.0.0.0:8000");
        assert_eq!(
            cfg.allowed_origins,
            AllowedOrigins::List(vec![HeaderValue::from_static("http://localhost:3000")])
        );
        assert_eq!(cfg.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(cfg.temp_command.program, "vcgencmd");
        assert_eq!(cfg.temp_command.args, vec!["measure_temp"]);
        assert_eq!(cfg.knowledge_json, None);
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn origins_list_and_wildcard() {
        let cfg = AppConfig::from_lookup(env(&[(
            "ALLOWED_ORIGINS",
            "https://pangyo.example/, http://localhost:5173",
        )]))
        .unwrap();
        assert_eq!(
            cfg.allowed_origins,
            AllowedOrigins::List(vec![
                HeaderValue::from_static("https://pangyo.example"),
                HeaderValue::from_static("http://localhost:5173"),
            ])
        );

        let any = AppConfig::from_lookup(env(&[("ALLOWED_ORIGINS", "http://a.example,*")])).unwrap();
        assert_eq!(any.allowed_origins, AllowedOrigins::Any);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert_eq!(
            AppConfig::from_lookup(env(&[("API_ADDRESS", "8000")])).unwrap_err(),
            ConfigError::InvalidAddress("8000".into())
        );
        assert!(matches!(
            AppConfig::from_lookup(env(&[("ALLOWED_ORIGINS", "http://bad\norigin")])),
            Err(ConfigError::InvalidOrigin(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(env(&[("LLM_TEMPERATURE", "3")])),
            Err(ConfigError::Llm(_))
        ));
    }

    #[test]
    fn temp_command_is_split_on_whitespace() {
        let cmd = TempCommand::parse("  cat   /sys/class/thermal/thermal_zone0/temp ").unwrap();
        assert_eq!(cmd.program, "cat");
        assert_eq!(cmd.args, vec!["/sys/class/thermal/thermal_zone0/temp"]);
        assert_eq!(TempCommand::parse("   "), Err(ConfigError::EmptyTempCommand));
    }
}
