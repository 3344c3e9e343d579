//! POST /chat — relays one message to the configured LLM.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat (also mounted at /api/chat)
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"급식은 어떻게 운영되나요?"}'
/// ```
#[tracing::instrument(skip_all)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = body?;

    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".into()));
    }

    let system = body
        .system
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&state.system_prompt);

    debug!(
        message_chars = body.message.chars().count(),
        custom_system = system != state.system_prompt,
        "chat request"
    );

    let reply = state
        .relay
        .chat(&body.message, Some(system))
        .await
        .map_err(|err| {
            error!(error = %err, "llm relay failed");
            AppError::RelayFailed(err)
        })?;

    Ok(Json(ChatResponse { reply }))
}
