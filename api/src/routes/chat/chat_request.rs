use serde::{Deserialize, Serialize};

/// Request payload for /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question.
    pub message: String,
    /// Optional system prompt; blank or absent means the configured default.
    #[serde(default)]
    pub system: Option<String>,
}

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Model answer, verbatim.
    pub reply: String,
}
