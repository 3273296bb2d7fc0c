//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::DownscaleService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub downscaler: Arc<DownscaleService>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let config = Arc::new(config);
    let downscaler = Arc::new(DownscaleService::new(config.clone()));

    AppState { config, downscaler }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/downscale", post(handle_downscale))
        .route("/api/downscale/batch", post(handle_downscale_batch))
        .route("/api/nodes", get(handle_nodes))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_downscale(
    State(state): State<AppState>,
    query: Query<api::DownscaleQuery>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    api::handle_downscale(State(state.downscaler), query, body).await
}

async fn handle_downscale_batch(
    State(state): State<AppState>,
    request: axum::Json<api::BatchRequest>,
) -> Result<axum::Json<api::BatchResponse>, ApiError> {
    api::handle_downscale_batch(State(state.downscaler), request).await
}

async fn handle_nodes(
    State(state): State<AppState>,
) -> axum::Json<Vec<crate::models::NodeDescriptor>> {
    api::handle_nodes(State(state.downscaler)).await
}
