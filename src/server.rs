//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::NonogramService;

/// Room for the JSON envelope and scalar fields around the base64 image.
const BODY_OVERHEAD: usize = 64 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: NonogramService,
}

impl FromRef<AppState> for NonogramService {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

/// Create application state, loading the configured segmentation model.
pub fn create_app_state(config: AppConfig) -> AppState {
    let service = NonogramService::from_config(Arc::new(config));
    tracing::info!(model = service.model_state(), "Nonogram service ready");
    AppState { service }
}

/// Largest request body accepted for an image of `max_image_bytes`.
pub fn body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(BODY_OVERHEAD)
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let limit = body_limit(state.service.config().max_image_bytes);

    Router::new()
        .route(
            "/api/v1/generate-nonogram",
            post(api::handle_generate_nonogram),
        )
        .layer(DefaultBodyLimit::max(limit))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
