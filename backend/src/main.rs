//! Weather Classification Service - Backend Server
//!
//! Loads the image and tabular classifiers once at startup and serves
//! predictions over HTTP.

use axum::{extract::Request, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use weather_classification_backend::{config::Config, create_app, AppState, ModelStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(config.logging.json);

    tracing::info!("Starting Weather Classification Server");
    tracing::info!("Environment: {}", config.environment);

    // Load models before accepting requests
    tracing::info!("Loading models from {}", config.models.dir.display());
    let models = config.models.clone();
    let store = tokio::task::spawn_blocking(move || ModelStore::load(&models)).await?;

    let report = store.report();
    if report.is_fully_loaded() {
        tracing::info!("All models loaded");
    } else if config.models.require_all {
        anyhow::bail!("models.require_all is set but not every model loaded: {:?}", report);
    } else if report.nothing_loaded() {
        tracing::warn!("No model loaded, prediction endpoints will answer 503");
    } else {
        tracing::warn!("Running with a partial model set: {:?}", report);
    }

    // Create application state
    let state = AppState::new(store, config.clone());

    // Build application
    let app = create_app(state);

    // Start server
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "wcs_server=debug,weather_classification_backend=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
