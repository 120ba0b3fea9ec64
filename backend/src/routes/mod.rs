//! Route definitions for the weather classification API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::api_overview))
        // Prediction routes
        .nest("/predict", prediction_routes())
        // Informational routes
        .route("/test", get(handlers::test_api))
        .route("/status", get(handlers::model_status))
        .route("/classes", get(handlers::available_classes))
        .route("/docs", get(handlers::api_docs))
}

/// Prediction routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/image", post(handlers::predict_image))
        .route("/tabular", post(handlers::predict_tabular))
}
