//! Read-only listings of the options the wizard offers.

use axum::extract::State;
use axum::{Json, Router, routing::get};

use letterbox_letter::domain::catalog::{Background, Cover, Game, PresetAddress, SamplePhoto};

use crate::state::AppState;

/// GET /covers
async fn list_covers(State(state): State<AppState>) -> Json<Vec<Cover>> {
    Json(state.catalogs.covers.entries().to_vec())
}

/// GET /backgrounds
async fn list_backgrounds(State(state): State<AppState>) -> Json<Vec<Background>> {
    Json(state.catalogs.backgrounds.entries().to_vec())
}

/// GET /games
async fn list_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    Json(state.catalogs.games.entries().to_vec())
}

/// GET /addresses
async fn list_addresses(State(state): State<AppState>) -> Json<Vec<PresetAddress>> {
    Json(state.catalogs.addresses.entries().to_vec())
}

/// GET /photos
async fn list_photos(State(state): State<AppState>) -> Json<Vec<SamplePhoto>> {
    Json(state.catalogs.photos.entries().to_vec())
}

/// Returns the router for the catalogs.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/covers", get(list_covers))
        .route("/backgrounds", get(list_backgrounds))
        .route("/games", get(list_games))
        .route("/addresses", get(list_addresses))
        .route("/photos", get(list_photos))
}
