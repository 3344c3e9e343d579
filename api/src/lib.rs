//! HTTP front of the school Q&A assistant.
//!
//! Routes:
//! - `POST /chat`, `POST /api/chat`: relay one message to the LLM;
//! - `GET /health`, `GET /api/health`: liveness;
//! - `GET /api/temp`: board temperature;
//! - `GET /knowledge`, `GET /api/knowledge`: read-only knowledge base.

pub mod core;
pub mod error_handler;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    core::{
        app_config::{AllowedOrigins, AppConfig},
        app_state::AppState,
    },
    error_handler::AppError,
    routes::{
        chat::chat_route::chat, health::health_route::health, knowledge::knowledge_route::knowledge,
        temp::temp_route::temp,
    },
};

/// Builds the application router with CORS and request tracing.
pub fn router(state: Arc<AppState>, origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/temp", get(temp))
        .route("/knowledge", get(knowledge))
        .route("/api/knowledge", get(knowledge))
        .fallback(|| async { AppError::NotFound })
        .with_state(state)
        .layer(build_cors_layer(origins))
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(list) => AllowOrigin::list(list.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Loads the config from the environment, binds `API_ADDRESS` and serves
/// until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let cfg = AppConfig::from_env()?;
    let address = cfg.address.clone();
    let origins = cfg.allowed_origins.clone();

    let state = Arc::new(AppState::from_config(cfg)?);
    let app = router(state, &origins);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| AppError::Bind {
            addr: address.clone(),
            source,
        })?;
    info!(%address, "pangyo-qna listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server keeps
/// running until killed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
