//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::{JobTracker, TransformWorker};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub worker: Arc<TransformWorker>,
    pub tracker: Arc<JobTracker>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let worker = Arc::new(TransformWorker::new(config.limits.max_concurrent_jobs));
    tracing::debug!(
        max_concurrent_jobs = config.limits.max_concurrent_jobs,
        "Transform worker ready"
    );

    AppState {
        config: Arc::new(config),
        worker,
        tracker: Arc::new(JobTracker::new()),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        // Transform endpoints
        .route("/api/dither", post(api::handle_dither))
        .route("/api/quantize", post(api::handle_quantize))
        .route("/api/palette", post(api::handle_palette))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state, body limit and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
