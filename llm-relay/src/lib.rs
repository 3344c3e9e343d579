//! Thin chat relay to an OpenAI-compatible API or a local Ollama runtime.
//!
//! - [`config`]: model config and its environment loader;
//! - [`services`]: one client per provider wire protocol;
//! - [`relay`]: [`LlmRelay`], the provider-agnostic facade;
//! - [`error_handler`]: [`RelayError`] and env/validation helpers.

pub mod config;
pub mod error_handler;
pub mod relay;
pub mod services;

pub use error_handler::RelayError;
pub use relay::LlmRelay;
