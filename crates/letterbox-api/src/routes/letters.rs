//! Routes for the Letter Composition context.

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use letterbox_checkout::payment::PaymentMethod;
use letterbox_core::repository::StoredEvent;
use letterbox_letter::application::command_handlers;
use letterbox_letter::application::query_handlers::{self, LetterView, PriceQuote};
use letterbox_letter::domain::catalog::{AddressId, BackgroundId, CoverId, GameId};
use letterbox_letter::domain::commands;
use letterbox_letter::domain::draft::PhotoRef;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for commands that only name the letter.
#[derive(Debug, Deserialize)]
pub struct LetterRequest {
    /// The letter to act on.
    pub letter_id: Uuid,
}

/// Request body for POST /select-cover.
#[derive(Debug, Deserialize)]
pub struct SelectCoverRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Cover catalog id.
    pub cover_id: CoverId,
}

/// Request body for POST /select-background.
#[derive(Debug, Deserialize)]
pub struct SelectBackgroundRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Background catalog id.
    pub background_id: BackgroundId,
}

/// Request body for POST /update-page.
#[derive(Debug, Deserialize)]
pub struct UpdatePageRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Zero-based page index.
    pub page_index: usize,
    /// The new text.
    pub text: String,
}

/// Request body for POST /delete-page.
#[derive(Debug, Deserialize)]
pub struct DeletePageRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Zero-based page index.
    pub page_index: usize,
}

/// Request body for POST /attach-photo.
#[derive(Debug, Deserialize)]
pub struct AttachPhotoRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Sample gallery URL.
    pub url: String,
}

/// Request body for POST /upload-photo.
#[derive(Debug, Deserialize)]
pub struct UploadPhotoRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    /// Image bytes, base64 encoded.
    pub data_base64: String,
}

/// Request body for POST /detach-photo.
#[derive(Debug, Deserialize)]
pub struct DetachPhotoRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The photo, as reported in the letter's draft.
    pub photo: PhotoRef,
}

/// Request body for POST /toggle-game.
#[derive(Debug, Deserialize)]
pub struct ToggleGameRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Game catalog id.
    pub game_id: GameId,
}

/// Request body for POST /select-address.
#[derive(Debug, Deserialize)]
pub struct SelectAddressRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Preset address catalog id.
    pub address_id: AddressId,
}

/// Request body for POST /enter-custom-address.
#[derive(Debug, Deserialize)]
pub struct EnterCustomAddressRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Free-form address text.
    pub address: String,
}

/// Request body for POST /go-to-step.
#[derive(Debug, Deserialize)]
pub struct GoToStepRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// 1-based step number. Numbers that name no reached step are ignored.
    pub step: i64,
}

/// Request body for POST /choose-payment-method.
#[derive(Debug, Deserialize)]
pub struct ChoosePaymentMethodRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// `credit-card`, `e-wallet` or `bank-transfer`.
    pub method: PaymentMethod,
}

/// Request body for POST /enter-contact-details.
#[derive(Debug, Deserialize)]
pub struct EnterContactDetailsRequest {
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Sender e-mail address.
    pub sender_email: String,
    /// Recipient e-mail address.
    pub recipient_email: String,
}

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// IDs of the domain events produced and persisted. Empty when the
    /// command left the letter unchanged.
    pub event_ids: Vec<Uuid>,
}

impl From<Vec<StoredEvent>> for CommandResponse {
    fn from(stored_events: Vec<StoredEvent>) -> Self {
        Self {
            event_ids: stored_events.iter().map(|e| e.event_id).collect(),
        }
    }
}

/// Response body for POST /start.
#[derive(Debug, Serialize)]
pub struct StartLetterResponse {
    /// The new letter's identifier.
    pub letter_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// POST /start
#[instrument(skip(state))]
async fn start_letter(
    State(state): State<AppState>,
) -> Result<Json<StartLetterResponse>, ApiError> {
    let command = commands::StartLetter {
        correlation_id: Uuid::new_v4(),
        letter_id: Uuid::new_v4(),
    };

    info!(
        correlation_id = %command.correlation_id,
        letter_id = %command.letter_id,
        "handling start_letter command"
    );

    let stored_events = command_handlers::handle_start_letter(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let CommandResponse { event_ids } = stored_events.into();

    Ok(Json(StartLetterResponse {
        letter_id: command.letter_id,
        event_ids,
    }))
}

/// GET /{letter_id}
#[instrument(skip(state))]
async fn get_letter(
    State(state): State<AppState>,
    Path(letter_id): Path<Uuid>,
) -> Result<Json<LetterView>, ApiError> {
    let view =
        query_handlers::get_letter_by_id(letter_id, &state.pricing, &*state.event_repository)
            .await?;

    Ok(Json(view))
}

/// GET /{letter_id}/price
#[instrument(skip(state))]
async fn get_price(
    State(state): State<AppState>,
    Path(letter_id): Path<Uuid>,
) -> Result<Json<PriceQuote>, ApiError> {
    let quote =
        query_handlers::get_price_quote(letter_id, &state.pricing, &*state.event_repository)
            .await?;

    Ok(Json(quote))
}

/// POST /select-cover
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn select_cover(
    State(state): State<AppState>,
    Json(request): Json<SelectCoverRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::SelectCover {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        cover_id: request.cover_id,
    };

    info!(correlation_id = %command.correlation_id, "handling select_cover command");

    let stored_events = command_handlers::handle_select_cover(
        &command,
        &state.catalogs,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /select-background
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn select_background(
    State(state): State<AppState>,
    Json(request): Json<SelectBackgroundRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::SelectBackground {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        background_id: request.background_id,
    };

    info!(correlation_id = %command.correlation_id, "handling select_background command");

    let stored_events = command_handlers::handle_select_background(
        &command,
        &state.catalogs,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /add-page
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn add_page(
    State(state): State<AppState>,
    Json(request): Json<LetterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::AddPage {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
    };

    info!(correlation_id = %command.correlation_id, "handling add_page command");

    let stored_events = command_handlers::handle_add_page(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /update-page
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn update_page(
    State(state): State<AppState>,
    Json(request): Json<UpdatePageRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::UpdatePage {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        page_index: request.page_index,
        text: request.text,
    };

    info!(
        correlation_id = %command.correlation_id,
        page_index = command.page_index,
        "handling update_page command"
    );

    let stored_events = command_handlers::handle_update_page(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /delete-page
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn delete_page(
    State(state): State<AppState>,
    Json(request): Json<DeletePageRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::DeletePage {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        page_index: request.page_index,
    };

    info!(
        correlation_id = %command.correlation_id,
        page_index = command.page_index,
        "handling delete_page command"
    );

    let stored_events = command_handlers::handle_delete_page(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /attach-photo
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn attach_photo(
    State(state): State<AppState>,
    Json(request): Json<AttachPhotoRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::AttachCatalogPhoto {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        url: request.url,
    };

    info!(correlation_id = %command.correlation_id, "handling attach_catalog_photo command");

    let stored_events = command_handlers::handle_attach_catalog_photo(
        &command,
        &state.catalogs,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /upload-photo
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn upload_photo(
    State(state): State<AppState>,
    Json(request): Json<UploadPhotoRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::UploadPhoto {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        media_type: request.media_type,
        data_base64: request.data_base64,
    };

    info!(
        correlation_id = %command.correlation_id,
        media_type = %command.media_type,
        "handling upload_photo command"
    );

    let stored_events = command_handlers::handle_upload_photo(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /detach-photo
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn detach_photo(
    State(state): State<AppState>,
    Json(request): Json<DetachPhotoRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::DetachPhoto {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        photo: request.photo,
    };

    info!(correlation_id = %command.correlation_id, "handling detach_photo command");

    let stored_events = command_handlers::handle_detach_photo(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /toggle-game
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn toggle_game(
    State(state): State<AppState>,
    Json(request): Json<ToggleGameRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ToggleGame {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        game_id: request.game_id,
    };

    info!(correlation_id = %command.correlation_id, "handling toggle_game command");

    let stored_events = command_handlers::handle_toggle_game(
        &command,
        &state.catalogs,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /select-address
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn select_address(
    State(state): State<AppState>,
    Json(request): Json<SelectAddressRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::SelectAddress {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        address_id: request.address_id,
    };

    info!(correlation_id = %command.correlation_id, "handling select_address command");

    let stored_events = command_handlers::handle_select_address(
        &command,
        &state.catalogs,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /enter-custom-address
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn enter_custom_address(
    State(state): State<AppState>,
    Json(request): Json<EnterCustomAddressRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::EnterCustomAddress {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        address: request.address,
    };

    info!(correlation_id = %command.correlation_id, "handling enter_custom_address command");

    let stored_events = command_handlers::handle_enter_custom_address(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /next-step
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn next_step(
    State(state): State<AppState>,
    Json(request): Json<LetterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::GoToNextStep {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
    };

    info!(correlation_id = %command.correlation_id, "handling next_step command");

    let stored_events = command_handlers::handle_go_to_next_step(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /previous-step
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn previous_step(
    State(state): State<AppState>,
    Json(request): Json<LetterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::GoToPreviousStep {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
    };

    info!(correlation_id = %command.correlation_id, "handling previous_step command");

    let stored_events = command_handlers::handle_go_to_previous_step(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /go-to-step
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn go_to_step(
    State(state): State<AppState>,
    Json(request): Json<GoToStepRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::GoToStep {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        step: request.step,
    };

    info!(
        correlation_id = %command.correlation_id,
        step = command.step,
        "handling go_to_step command"
    );

    let stored_events = command_handlers::handle_go_to_step(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /choose-payment-method
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn choose_payment_method(
    State(state): State<AppState>,
    Json(request): Json<ChoosePaymentMethodRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ChoosePaymentMethod {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        method: request.method,
    };

    info!(
        correlation_id = %command.correlation_id,
        method = %command.method,
        "handling choose_payment_method command"
    );

    let stored_events = command_handlers::handle_choose_payment_method(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /enter-contact-details
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn enter_contact_details(
    State(state): State<AppState>,
    Json(request): Json<EnterContactDetailsRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::EnterContactDetails {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
        sender_email: request.sender_email,
        recipient_email: request.recipient_email,
    };

    info!(correlation_id = %command.correlation_id, "handling enter_contact_details command");

    let stored_events = command_handlers::handle_enter_contact_details(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// POST /complete-order
#[instrument(skip(state, request), fields(letter_id = %request.letter_id))]
async fn complete_order(
    State(state): State<AppState>,
    Json(request): Json<LetterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CompleteOrder {
        correlation_id: Uuid::new_v4(),
        letter_id: request.letter_id,
    };

    info!(correlation_id = %command.correlation_id, "handling complete_order command");

    let stored_events = command_handlers::handle_complete_order(
        &command,
        &state.pricing,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(stored_events.into()))
}

/// Returns the router for the letters context. Photo uploads may carry up to
/// `upload_limit_bytes`; every other route keeps axum's default limit.
pub fn router(upload_limit_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/start", post(start_letter))
        .route("/{letter_id}", get(get_letter))
        .route("/{letter_id}/price", get(get_price))
        .route("/select-cover", post(select_cover))
        .route("/select-background", post(select_background))
        .route("/add-page", post(add_page))
        .route("/update-page", post(update_page))
        .route("/delete-page", post(delete_page))
        .route("/attach-photo", post(attach_photo))
        .route(
            "/upload-photo",
            post(upload_photo).layer(DefaultBodyLimit::max(upload_limit_bytes)),
        )
        .route("/detach-photo", post(detach_photo))
        .route("/toggle-game", post(toggle_game))
        .route("/select-address", post(select_address))
        .route("/enter-custom-address", post(enter_custom_address))
        .route("/next-step", post(next_step))
        .route("/previous-step", post(previous_step))
        .route("/go-to-step", post(go_to_step))
        .route("/choose-payment-method", post(choose_payment_method))
        .route("/enter-contact-details", post(enter_contact_details))
        .route("/complete-order", post(complete_order))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use letterbox_checkout::pricing::PricingConfig;
    use letterbox_core::clock::Clock;
    use letterbox_core::repository::EventRepository;
    use letterbox_event_store::in_memory_event_repository::InMemoryEventRepository;
    use letterbox_letter::domain::catalog::Catalogs;
    use letterbox_test_support::{
        ConflictingEventRepository, EmptyEventRepository, FailingEventRepository, FixedClock,
    };

    use crate::config::DEFAULT_UPLOAD_LIMIT_BYTES;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state_with(event_repository: Arc<dyn EventRepository>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::default());
        AppState::new(
            clock,
            event_repository,
            Catalogs::standard(),
            PricingConfig::default(),
        )
    }

    fn test_app_state() -> AppState {
        app_state_with(Arc::new(InMemoryEventRepository::new()))
    }

    fn failing_app_state() -> AppState {
        app_state_with(Arc::new(FailingEventRepository))
    }

    async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let app = router(DEFAULT_UPLOAD_LIMIT_BYTES).with_state(state.clone());
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        (status, json)
    }

    async fn start(state: &AppState) -> Uuid {
        let (status, json) = send(state, "POST", "/start", None).await;
        assert_eq!(status, StatusCode::OK);
        Uuid::parse_str(json["letter_id"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_start_returns_letter_id_and_one_event() {
        // Arrange
        let state = test_app_state();

        // Act
        let (status, json) = send(&state, "POST", "/start", None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        Uuid::parse_str(json["letter_id"].as_str().unwrap()).unwrap();
        let event_ids = json["event_ids"].as_array().unwrap();
        assert_eq!(event_ids.len(), 1);
        for id in event_ids {
            Uuid::parse_str(id.as_str().unwrap()).unwrap();
        }
    }

    #[tokio::test]
    async fn test_get_letter_returns_view() {
        // Arrange
        let state = test_app_state();
        let letter_id = start(&state).await;

        // Act
        let (status, json) = send(&state, "GET", &format!("/{letter_id}"), None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["letter_id"], letter_id.to_string());
        assert_eq!(json["current_step"], 1);
        assert_eq!(json["step_count"], 6);
        assert_eq!(json["can_proceed"], false);
        assert_eq!(json["draft"]["pages"].as_array().unwrap().len(), 3);
        assert_eq!(json["price"]["total"], 50_000);
    }

    #[tokio::test]
    async fn test_get_letter_returns_404_for_unknown_letter() {
        let state = test_app_state();

        let (status, json) = send(&state, "GET", &format!("/{}", Uuid::new_v4()), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "aggregate_not_found");
    }

    #[tokio::test]
    async fn test_get_letter_returns_400_for_malformed_id() {
        let state = test_app_state();

        let (status, _) = send(&state, "GET", "/not-a-uuid", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_select_cover_returns_200_with_event_ids() {
        // Arrange
        let state = test_app_state();
        let letter_id = start(&state).await;
        let body = serde_json::json!({ "letter_id": letter_id, "cover_id": "birthday" });

        // Act
        let (status, json) = send(&state, "POST", "/select-cover", Some(body)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["event_ids"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_select_cover_returns_404_for_unknown_cover() {
        let state = test_app_state();
        let letter_id = start(&state).await;
        let body = serde_json::json!({ "letter_id": letter_id, "cover_id": "gothic" });

        let (status, json) = send(&state, "POST", "/select-cover", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "catalog_entry_not_found");
    }

    #[tokio::test]
    async fn test_next_step_is_ignored_until_cover_and_background_are_chosen() {
        let state = test_app_state();
        let letter_id = start(&state).await;
        let body = serde_json::json!({ "letter_id": letter_id });

        let (status, json) = send(&state, "POST", "/next-step", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["event_ids"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_go_to_step_ignores_step_numbers_outside_the_wizard() {
        // Arrange
        let state = test_app_state();
        let letter_id = start(&state).await;

        for step in [-1_i64, 0, 7, 256, i64::from(u32::MAX)] {
            let body = serde_json::json!({ "letter_id": letter_id, "step": step });

            // Act
            let (status, json) = send(&state, "POST", "/go-to-step", Some(body)).await;

            // Assert
            assert_eq!(status, StatusCode::OK, "step {step}");
            assert!(json["event_ids"].as_array().unwrap().is_empty(), "step {step}");
        }
    }

    #[tokio::test]
    async fn test_update_page_returns_400_for_missing_page() {
        let state = test_app_state();
        let letter_id = start(&state).await;
        let body = serde_json::json!({ "letter_id": letter_id, "page_index": 7, "text": "hi" });

        let (status, json) = send(&state, "POST", "/update-page", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_upload_photo_returns_400_for_non_image() {
        let state = test_app_state();
        let letter_id = start(&state).await;
        let body = serde_json::json!({
            "letter_id": letter_id,
            "media_type": "application/pdf",
            "data_base64": "JVBERi0xLjQ=",
        });

        let (status, json) = send(&state, "POST", "/upload-photo", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_choose_payment_method_returns_422_for_unknown_method() {
        let state = test_app_state();
        let letter_id = start(&state).await;
        let body = serde_json::json!({ "letter_id": letter_id, "method": "cash" });

        let (status, _) = send(&state, "POST", "/choose-payment-method", Some(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_complete_order_returns_400_before_payment_step() {
        let state = test_app_state();
        let letter_id = start(&state).await;
        let body = serde_json::json!({ "letter_id": letter_id });

        let (status, json) = send(&state, "POST", "/complete-order", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_add_page_returns_404_for_unknown_letter() {
        let state = app_state_with(Arc::new(EmptyEventRepository));
        let body = serde_json::json!({ "letter_id": Uuid::new_v4() });

        let (status, json) = send(&state, "POST", "/add-page", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "aggregate_not_found");
    }

    #[tokio::test]
    async fn test_add_page_returns_409_on_concurrent_write() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let history = command_handlers::handle_start_letter(
            &commands::StartLetter {
                correlation_id: Uuid::new_v4(),
                letter_id,
            },
            &FixedClock::default(),
            &EmptyEventRepository,
        )
        .await
        .unwrap();
        let state = app_state_with(Arc::new(ConflictingEventRepository::new(history)));
        let body = serde_json::json!({ "letter_id": letter_id });

        // Act
        let (status, json) = send(&state, "POST", "/add-page", Some(body)).await;

        // Assert
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "concurrency_conflict");
    }

    #[tokio::test]
    async fn test_start_returns_500_on_repository_failure() {
        let state = failing_app_state();

        let (status, json) = send(&state, "POST", "/start", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[tokio::test]
    async fn test_select_background_returns_422_for_missing_body() {
        // Arrange
        let state = test_app_state();

        // Act
        let body = serde_json::json!({});
        let (status, _) = send(&state, "POST", "/select-background", Some(body)).await;

        // Assert
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_price_returns_formatted_quote() {
        let state = test_app_state();
        let letter_id = start(&state).await;

        let (status, json) = send(&state, "GET", &format!("/{letter_id}/price"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["formatted_total"], "₩50,000");
        assert_eq!(json["charged"], false);
        assert_eq!(json["lines"][0]["kind"], "base");
    }
}
