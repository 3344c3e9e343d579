//! GET /knowledge — read-only view of the loaded knowledge base.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use kb_builder::search::DEFAULT_LIMIT;
use tracing::debug;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::knowledge::knowledge_request::{KnowledgeQuery, KnowledgeResponse},
};

pub const MAX_LIMIT: usize = 20;

/// Handler: GET /knowledge (also mounted at /api/knowledge)
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8000/knowledge?q=급식&limit=3'
/// ```
#[tracing::instrument(skip_all)]
pub async fn knowledge(
    State(state): State<Arc<AppState>>,
    query: Result<Query<KnowledgeQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let index = &state.knowledge;

    let entries = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
            debug!(q, limit, "knowledge search");
            index.select_relevant(q, limit)
        }
        None => index.entries().collect(),
    };

    Ok(Json(KnowledgeResponse {
        total: index.len(),
        entries,
    })
    .into_response())
}
