//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cnn_loaded: bool,
    pub tabular_loaded: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Serving is healthy even when a model is missing; the flags say which
    let status = if state.store.is_fully_loaded() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cnn_loaded: state.store.is_image_model_loaded(),
        tabular_loaded: state.store.is_tabular_model_loaded(),
    })
}
