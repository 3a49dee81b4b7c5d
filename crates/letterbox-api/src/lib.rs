//! Letterbox HTTP API.
//!
//! Exposes the letter wizard, its catalogs and pricing over JSON. The
//! binary in `main.rs` wires this router to configuration and a listener.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the full application router.
pub fn build_router(app_state: AppState) -> Router {
    let upload_limit_bytes = app_state.upload_limit_bytes;
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/catalog", routes::catalog::router())
        .nest("/api/v1/letters", routes::letters::router(upload_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
