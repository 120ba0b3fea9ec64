//! Weather Classification Service - Backend
//!
//! HTTP API that classifies weather from a photo (CNN) or from a set of
//! meteorological measurements (tabular model) and returns practical advice
//! for agriculture and solar production.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderName, routing::get, Router};
use tower::Layer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod inference;
pub mod routes;
pub mod services;

pub use config::Config;
pub use services::ModelStore;

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ModelStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: ModelStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Create the application with all routes and middleware
///
/// Routes are served under `/api` and again at the root for the web
/// frontend. Trailing slashes are trimmed before routing.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let body_limit = state.config.upload.max_bytes;

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
