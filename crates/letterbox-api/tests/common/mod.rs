//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use letterbox_checkout::pricing::PricingConfig;
use letterbox_core::clock::Clock;
use letterbox_event_store::in_memory_event_repository::InMemoryEventRepository;
use letterbox_letter::domain::catalog::Catalogs;
use letterbox_test_support::FixedClock;
use tower::ServiceExt;

use letterbox_api::build_router;
use letterbox_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 2, 14, 9, 30, 0).unwrap(),
    ))
}

/// Build the full app router over `event_repository` with the standard
/// catalogs and default prices. Uses the same router as `main.rs`.
pub fn build_test_app(event_repository: Arc<InMemoryEventRepository>) -> Router {
    build_test_app_with_pricing(event_repository, PricingConfig::default())
}

/// Build the full app router with a custom photo upload body limit.
pub fn build_test_app_with_upload_limit(
    event_repository: Arc<InMemoryEventRepository>,
    upload_limit_bytes: usize,
) -> Router {
    let app_state = AppState::new(
        fixed_clock(),
        event_repository,
        Catalogs::standard(),
        PricingConfig::default(),
    )
    .with_upload_limit(upload_limit_bytes);
    build_router(app_state)
}

/// Build the full app router with a custom price list.
pub fn build_test_app_with_pricing(
    event_repository: Arc<InMemoryEventRepository>,
    pricing: PricingConfig,
) -> Router {
    let app_state = AppState::new(
        fixed_clock(),
        event_repository,
        Catalogs::standard(),
        pricing,
    );
    build_router(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return only the status, for
/// responses whose body is not JSON.
pub async fn post_json_status(app: Router, uri: &str, body: &serde_json::Value) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Start a letter and return its id as a string.
pub async fn start_letter(app: Router) -> String {
    let (status, json) = post_empty(app, "/api/v1/letters/start").await;
    assert_eq!(status, StatusCode::OK);
    json["letter_id"].as_str().unwrap().to_owned()
}
