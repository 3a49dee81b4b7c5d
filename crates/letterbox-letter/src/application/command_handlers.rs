//! Command handlers for the Letter Composition context.
//!
//! Each handler validates catalog references, reconstitutes the letter from
//! its stream, runs the command on the aggregate and persists whatever
//! events it recorded.

use letterbox_checkout::payment::ContactDetails;
use letterbox_checkout::pricing::PricingConfig;
use letterbox_core::aggregate::AggregateRoot;
use letterbox_core::clock::Clock;
use letterbox_core::command::Command;
use letterbox_core::error::DomainError;
use letterbox_core::event::EventMetadata;
use letterbox_core::repository::{EventRepository, StoredEvent};
use tracing::debug;
use uuid::Uuid;

use crate::domain::aggregates::LetterWizard;
use crate::domain::catalog::Catalogs;
use crate::domain::commands::{
    AddPage, AttachCatalogPhoto, ChoosePaymentMethod, CompleteOrder, DeletePage, DetachPhoto,
    EnterContactDetails, EnterCustomAddress, GoToNextStep, GoToPreviousStep, GoToStep,
    SelectAddress, SelectBackground, SelectCover, StartLetter, ToggleGame, UpdatePage,
    UploadPhoto,
};
use crate::domain::draft::PhotoRef;
use crate::domain::events::{LetterEvent, LetterEventKind};

/// Reconstitutes a `LetterWizard` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    letter_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<LetterWizard, DomainError> {
    let mut letter = LetterWizard::new(letter_id);
    for stored in existing_events {
        let kind: LetterEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!("event deserialization failed: {e}"))
            })?;
        let event = LetterEvent {
            metadata: EventMetadata::from(stored),
            kind,
        };
        letter.apply(&event);
    }
    Ok(letter)
}

/// Loads the letter addressed by `command`, runs `action` on it and appends
/// the recorded events. Commands that change nothing append nothing.
async fn execute<C, F>(
    command: &C,
    repo: &dyn EventRepository,
    action: F,
) -> Result<Vec<StoredEvent>, DomainError>
where
    C: Command,
    F: FnOnce(&mut LetterWizard) -> Result<(), DomainError>,
{
    let letter_id = command.aggregate_id();
    let existing_events = repo.load_events(letter_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(letter_id));
    }
    let mut letter = reconstitute(letter_id, &existing_events)?;

    action(&mut letter)?;

    let stored_events = letter.pending_stored_events();
    if stored_events.is_empty() {
        debug!(
            command_type = command.command_type(),
            %letter_id,
            "command left the letter unchanged"
        );
        return Ok(stored_events);
    }

    repo.append_events(letter_id, letter.version(), &stored_events)
        .await?;

    Ok(stored_events)
}

/// Handles the `StartLetter` command: opens a new wizard and persists the
/// `WizardStarted` event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the letter ID is already in use, or
/// the repository error if loading or appending fails.
pub async fn handle_start_letter(
    command: &StartLetter,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let existing_events = repo.load_events(command.letter_id).await?;
    let mut letter = reconstitute(command.letter_id, &existing_events)?;

    letter.start(command.correlation_id, clock)?;

    let stored_events = letter.pending_stored_events();
    repo.append_events(command.letter_id, letter.version(), &stored_events)
        .await?;

    Ok(stored_events)
}

/// Handles the `SelectCover` command.
///
/// # Errors
///
/// Returns `DomainError::CatalogEntryNotFound` for an unknown cover, or any
/// error from loading, the aggregate or appending.
pub async fn handle_select_cover(
    command: &SelectCover,
    catalogs: &Catalogs,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    catalogs.covers.get(&command.cover_id)?;
    execute(command, repo, |letter| {
        letter.select_cover(command.cover_id.clone(), command.correlation_id, clock)
    })
    .await
}

/// Handles the `SelectBackground` command.
///
/// # Errors
///
/// Returns `DomainError::CatalogEntryNotFound` for an unknown background, or
/// any error from loading, the aggregate or appending.
pub async fn handle_select_background(
    command: &SelectBackground,
    catalogs: &Catalogs,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    catalogs.backgrounds.get(&command.background_id)?;
    execute(command, repo, |letter| {
        letter.select_background(
            command.background_id.clone(),
            command.correlation_id,
            clock,
        )
    })
    .await
}

/// Handles the `AddPage` command.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_add_page(
    command: &AddPage,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.add_page(command.correlation_id, clock)
    })
    .await
}

/// Handles the `UpdatePage` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a page index out of range, or any
/// error from loading or appending.
pub async fn handle_update_page(
    command: &UpdatePage,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.update_page(
            command.page_index,
            command.text.clone(),
            command.correlation_id,
            clock,
        )
    })
    .await
}

/// Handles the `DeletePage` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a page index out of range, or any
/// error from loading or appending.
pub async fn handle_delete_page(
    command: &DeletePage,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.delete_page(command.page_index, command.correlation_id, clock)
    })
    .await
}

/// Handles the `AttachCatalogPhoto` command.
///
/// # Errors
///
/// Returns `DomainError::CatalogEntryNotFound` if the URL is not in the
/// sample gallery, or any error from loading, the aggregate or appending.
pub async fn handle_attach_catalog_photo(
    command: &AttachCatalogPhoto,
    catalogs: &Catalogs,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let photo = catalogs.photos.get(&command.url)?;
    let photo = PhotoRef::Catalog(photo.url.clone());
    execute(command, repo, |letter| {
        letter.attach_photo(photo, command.correlation_id, clock)
    })
    .await
}

/// Handles the `UploadPhoto` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the upload is not a base64 encoded
/// image, or any error from loading, the aggregate or appending.
pub async fn handle_upload_photo(
    command: &UploadPhoto,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let photo = PhotoRef::from_upload(&command.media_type, &command.data_base64)?;
    execute(command, repo, |letter| {
        letter.attach_photo(photo, command.correlation_id, clock)
    })
    .await
}

/// Handles the `DetachPhoto` command.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_detach_photo(
    command: &DetachPhoto,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.detach_photo(command.photo.clone(), command.correlation_id, clock)
    })
    .await
}

/// Handles the `ToggleGame` command.
///
/// # Errors
///
/// Returns `DomainError::CatalogEntryNotFound` for an unknown game, or any
/// error from loading, the aggregate or appending.
pub async fn handle_toggle_game(
    command: &ToggleGame,
    catalogs: &Catalogs,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    catalogs.games.get(&command.game_id)?;
    execute(command, repo, |letter| {
        letter.toggle_game(command.game_id.clone(), command.correlation_id, clock)
    })
    .await
}

/// Handles the `SelectAddress` command.
///
/// # Errors
///
/// Returns `DomainError::CatalogEntryNotFound` for an unknown preset address,
/// or any error from loading, the aggregate or appending.
pub async fn handle_select_address(
    command: &SelectAddress,
    catalogs: &Catalogs,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    catalogs.addresses.get(&command.address_id)?;
    execute(command, repo, |letter| {
        letter.select_catalog_address(command.address_id.clone(), command.correlation_id, clock)
    })
    .await
}

/// Handles the `EnterCustomAddress` command.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_enter_custom_address(
    command: &EnterCustomAddress,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.enter_custom_address(command.address.clone(), command.correlation_id, clock)
    })
    .await
}

/// Handles the `GoToNextStep` command. A blocked advance persists nothing.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_go_to_next_step(
    command: &GoToNextStep,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.go_next(command.correlation_id, clock)
    })
    .await
}

/// Handles the `GoToPreviousStep` command.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_go_to_previous_step(
    command: &GoToPreviousStep,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.go_previous(command.correlation_id, clock)
    })
    .await
}

/// Handles the `GoToStep` command. Forward and out-of-range jumps persist
/// nothing.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_go_to_step(
    command: &GoToStep,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.go_to_step(command.step, command.correlation_id, clock)
    })
    .await
}

/// Handles the `ChoosePaymentMethod` command.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_choose_payment_method(
    command: &ChoosePaymentMethod,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    execute(command, repo, |letter| {
        letter.choose_payment_method(command.method, command.correlation_id, clock)
    })
    .await
}

/// Handles the `EnterContactDetails` command.
///
/// # Errors
///
/// Returns `DomainError` if loading, the aggregate or appending fails.
pub async fn handle_enter_contact_details(
    command: &EnterContactDetails,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let contact = ContactDetails {
        sender_email: command.sender_email.clone(),
        recipient_email: command.recipient_email.clone(),
    };
    execute(command, repo, |letter| {
        letter.enter_contact_details(contact, command.correlation_id, clock)
    })
    .await
}

/// Handles the `CompleteOrder` command: prices the draft with `pricing` and
/// places the order under a fresh order ID.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the letter is not ready to be
/// ordered, or any error from loading or appending.
pub async fn handle_complete_order(
    command: &CompleteOrder,
    pricing: &PricingConfig,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let order_id = Uuid::new_v4();
    execute(command, repo, |letter| {
        letter.complete_order(order_id, pricing, command.correlation_id, clock)
    })
    .await
}

#[cfg(test)]
mod tests {
    use letterbox_checkout::payment::PaymentMethod;
    use letterbox_core::error::DomainError;
    use uuid::Uuid;

    use super::*;
    use crate::application::fixtures::{ready_for_payment, started};
    use crate::domain::catalog::{BackgroundId, CoverId, GameId};
    use crate::domain::events::{
        COVER_SELECTED_EVENT_TYPE, GAME_ATTACHED_EVENT_TYPE, ORDER_COMPLETED_EVENT_TYPE,
        PHOTO_ATTACHED_EVENT_TYPE, WIZARD_STARTED_EVENT_TYPE,
    };
    use letterbox_test_support::{
        ConflictingEventRepository, EmptyEventRepository, FailingEventRepository, FixedClock,
        RecordingEventRepository,
    };

    #[tokio::test]
    async fn test_handle_start_letter_persists_wizard_started_event() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock::default();
        let repo = RecordingEventRepository::new(Vec::new());
        let command = StartLetter {
            correlation_id,
            letter_id,
        };

        // Act
        let stored = handle_start_letter(&command, &clock, &repo).await.unwrap();

        // Assert
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type, WIZARD_STARTED_EVENT_TYPE);
        assert_eq!(stored[0].sequence_number, 1);
        assert_eq!(stored[0].correlation_id, correlation_id);
        assert_eq!(stored[0].occurred_at, clock.0);

        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);
        let (aggregate_id, expected_version, events) = &appended[0];
        assert_eq!(*aggregate_id, letter_id);
        assert_eq!(*expected_version, 0);
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_handle_start_letter_rejects_existing_letter() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = StartLetter {
            correlation_id: Uuid::new_v4(),
            letter_id,
        };

        let result = handle_start_letter(&command, &FixedClock::default(), &repo).await;

        match result.unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("already been started")),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_select_cover_appends_after_history() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = SelectCover {
            correlation_id: Uuid::new_v4(),
            letter_id,
            cover_id: CoverId::from("birthday"),
        };

        // Act
        let stored = handle_select_cover(
            &command,
            &Catalogs::standard(),
            &FixedClock::default(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type, COVER_SELECTED_EVENT_TYPE);
        assert_eq!(stored[0].sequence_number, 2);
        assert_eq!(stored[0].payload["CoverSelected"]["cover_id"], "birthday");
        assert_eq!(repo.appended_events()[0].1, 1);
    }

    #[tokio::test]
    async fn test_handle_select_background_rejects_unknown_background() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = SelectBackground {
            correlation_id: Uuid::new_v4(),
            letter_id,
            background_id: BackgroundId::from("tartan"),
        };

        let result = handle_select_background(
            &command,
            &Catalogs::standard(),
            &FixedClock::default(),
            &repo,
        )
        .await;

        match result.unwrap_err() {
            DomainError::CatalogEntryNotFound { catalog, id } => {
                assert_eq!(catalog, "background");
                assert_eq!(id, "tartan");
            }
            other => panic!("expected CatalogEntryNotFound, got {other:?}"),
        }
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_add_page_returns_aggregate_not_found_for_unknown_letter() {
        let letter_id = Uuid::new_v4();
        let command = AddPage {
            correlation_id: Uuid::new_v4(),
            letter_id,
        };

        let result = handle_add_page(&command, &FixedClock::default(), &EmptyEventRepository).await;

        match result.unwrap_err() {
            DomainError::AggregateNotFound(id) => assert_eq!(id, letter_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_update_page_rejects_out_of_range_index() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = UpdatePage {
            correlation_id: Uuid::new_v4(),
            letter_id,
            page_index: 9,
            text: "hello".to_owned(),
        };

        let result = handle_update_page(&command, &FixedClock::default(), &repo).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_attach_catalog_photo_requires_gallery_url() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let catalogs = Catalogs::standard();
        let repo = RecordingEventRepository::new(started(letter_id));
        let gallery_url = catalogs.photos.entries()[0].url.clone();

        // Act
        let attached = handle_attach_catalog_photo(
            &AttachCatalogPhoto {
                correlation_id: Uuid::new_v4(),
                letter_id,
                url: gallery_url,
            },
            &catalogs,
            &FixedClock::default(),
            &repo,
        )
        .await
        .unwrap();
        let rejected = handle_attach_catalog_photo(
            &AttachCatalogPhoto {
                correlation_id: Uuid::new_v4(),
                letter_id,
                url: "https://example.com/elsewhere.jpg".to_owned(),
            },
            &catalogs,
            &FixedClock::default(),
            &repo,
        )
        .await;

        // Assert
        assert_eq!(attached[0].event_type, PHOTO_ATTACHED_EVENT_TYPE);
        assert!(matches!(
            rejected,
            Err(DomainError::CatalogEntryNotFound { catalog: "photo", .. })
        ));
    }

    #[tokio::test]
    async fn test_handle_upload_photo_stores_data_url() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = UploadPhoto {
            correlation_id: Uuid::new_v4(),
            letter_id,
            media_type: "image/png".to_owned(),
            data_base64: "iVBORw0KGgo=".to_owned(),
        };

        let stored = handle_upload_photo(&command, &FixedClock::default(), &repo)
            .await
            .unwrap();

        let photo = &stored[0].payload["PhotoAttached"]["photo"];
        assert_eq!(photo["kind"], "upload");
        assert_eq!(photo["value"], "data:image/png;base64,iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn test_handle_upload_photo_rejects_non_image_before_loading() {
        let command = UploadPhoto {
            correlation_id: Uuid::new_v4(),
            letter_id: Uuid::new_v4(),
            media_type: "text/plain".to_owned(),
            data_base64: "aGVsbG8=".to_owned(),
        };

        let result =
            handle_upload_photo(&command, &FixedClock::default(), &FailingEventRepository).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_toggle_game_attaches_known_game() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = ToggleGame {
            correlation_id: Uuid::new_v4(),
            letter_id,
            game_id: GameId::from("wordsearch"),
        };

        let stored = handle_toggle_game(
            &command,
            &Catalogs::standard(),
            &FixedClock::default(),
            &repo,
        )
        .await
        .unwrap();

        assert_eq!(stored[0].event_type, GAME_ATTACHED_EVENT_TYPE);
    }

    #[tokio::test]
    async fn test_handle_go_to_next_step_on_unsatisfied_step_appends_nothing() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = GoToNextStep {
            correlation_id: Uuid::new_v4(),
            letter_id,
        };

        // Act
        let stored = handle_go_to_next_step(&command, &FixedClock::default(), &repo)
            .await
            .unwrap();

        // Assert
        assert!(stored.is_empty());
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_go_to_step_ignores_forward_jump() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = GoToStep {
            correlation_id: Uuid::new_v4(),
            letter_id,
            step: 5,
        };

        let stored = handle_go_to_step(&command, &FixedClock::default(), &repo)
            .await
            .unwrap();

        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_handle_complete_order_places_priced_order() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let history = ready_for_payment(letter_id);
        let version = i64::try_from(history.len()).unwrap();
        let repo = RecordingEventRepository::new(history);
        let command = CompleteOrder {
            correlation_id: Uuid::new_v4(),
            letter_id,
        };

        // Act
        let stored = handle_complete_order(
            &command,
            &PricingConfig::default(),
            &FixedClock::default(),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type, ORDER_COMPLETED_EVENT_TYPE);
        assert_eq!(stored[0].sequence_number, version + 1);
        let order = &stored[0].payload["OrderCompleted"];
        assert_eq!(order["price"]["total"], 50_000);
        assert_eq!(order["payment_method"], "bank-transfer");
        assert_eq!(order["recipient_email"], "minji@example.com");
    }

    #[tokio::test]
    async fn test_handle_complete_order_before_payment_step_is_rejected() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));
        let command = CompleteOrder {
            correlation_id: Uuid::new_v4(),
            letter_id,
        };

        let result = handle_complete_order(
            &command,
            &PricingConfig::default(),
            &FixedClock::default(),
            &repo,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_choose_payment_method_surfaces_concurrency_conflict() {
        let letter_id = Uuid::new_v4();
        let repo = ConflictingEventRepository::new(started(letter_id));
        let command = ChoosePaymentMethod {
            correlation_id: Uuid::new_v4(),
            letter_id,
            method: PaymentMethod::EWallet,
        };

        let result = handle_choose_payment_method(&command, &FixedClock::default(), &repo).await;

        match result.unwrap_err() {
            DomainError::ConcurrencyConflict {
                aggregate_id,
                expected,
                ..
            } => {
                assert_eq!(aggregate_id, letter_id);
                assert_eq!(expected, 1);
            }
            other => panic!("expected ConcurrencyConflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_enter_custom_address_propagates_infrastructure_error() {
        let command = EnterCustomAddress {
            correlation_id: Uuid::new_v4(),
            letter_id: Uuid::new_v4(),
            address: "1 Jongno, Seoul".to_owned(),
        };

        let result =
            handle_enter_custom_address(&command, &FixedClock::default(), &FailingEventRepository)
                .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_reconstitute_rejects_corrupt_payload() {
        let letter_id = Uuid::new_v4();
        let mut history = started(letter_id);
        history[0].payload = serde_json::json!({ "NoSuchEvent": {} });

        let result = reconstitute(letter_id, &history);

        match result.unwrap_err() {
            DomainError::Infrastructure(msg) => {
                assert!(msg.contains("event deserialization failed"));
            }
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
