//! API module
//!
//! HTTP handlers and the router that wires them together with the request-id
//! and tracing middleware.

pub mod chat;
pub mod pages;
pub mod utils;

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::state::AppState;

#[derive(Serialize)]
#[allow(missing_docs)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
    /// Live in-memory conversations
    pub conversations: usize,
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Health check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "EmotiBot is feeling fine".to_string(),
        conversations: state.conversation_count().await,
    })
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Browser chat page
        .route("/", get(pages::index))
        .route("/api/health", get(health_check))
        .route("/api/chat", post(chat::chat))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // Allow CORS for development
        .with_state(state)
}
