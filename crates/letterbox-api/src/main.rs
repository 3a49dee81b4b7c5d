//! Letterbox API server entry point.

use std::sync::Arc;

use letterbox_api::config::AppConfig;
use letterbox_api::error::AppError;
use letterbox_api::state::AppState;
use letterbox_core::clock::SystemClock;
use letterbox_event_store::in_memory_event_repository::InMemoryEventRepository;
use letterbox_letter::domain::catalog::Catalogs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Letterbox API server");

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;
    tracing::info!(
        pricing = ?config.pricing,
        upload_limit_bytes = config.upload_limit_bytes,
        "loaded configuration"
    );

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(InMemoryEventRepository::new()),
        Catalogs::standard(),
        config.pricing,
    )
    .with_upload_limit(config.upload_limit_bytes);
    let app = letterbox_api::build_router(app_state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
