use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm_relay::RelayError;
use serde::Serialize;
use thiserror::Error;

use crate::core::app_config::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Relay client could not be built at startup.
    #[error("failed to initialize LLM relay: {0}")]
    RelayInit(#[source] RelayError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    /// Upstream completion call failed; the message is the relay error text.
    #[error(transparent)]
    RelayFailed(RelayError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,

            // 5xx; config/bind only happen at startup
            AppError::Config(_)
            | AppError::RelayInit(_)
            | AppError::Bind { .. }
            | AppError::Server(_)
            | AppError::RelayFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::RelayInit(_) => "RELAY_INIT_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound => "NOT_FOUND",
            AppError::RelayFailed(_) => "LLM_RELAY_FAILED",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(err: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_shape() {
        let (status, body) = body_json(AppError::BadRequest("message must not be empty".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "BAD_REQUEST", "message": "message must not be empty"})
        );
    }

    #[tokio::test]
    async fn relay_failure_carries_underlying_text() {
        let relay_err = RelayError::Config(llm_relay::error_handler::ConfigError::EmptyModel);
        let text = relay_err.to_string();
        let (status, body) = body_json(AppError::RelayFailed(relay_err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "LLM_RELAY_FAILED");
        assert_eq!(body["message"], text.as_str());
    }
}
