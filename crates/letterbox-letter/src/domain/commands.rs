//! Commands for the Letter Composition context.

use letterbox_checkout::payment::PaymentMethod;
use letterbox_core::command::Command;
use uuid::Uuid;

use super::catalog::{AddressId, BackgroundId, CoverId, GameId};
use super::draft::PhotoRef;

macro_rules! letter_command {
    ($command:ident, $command_type:literal) => {
        impl Command for $command {
            fn command_type(&self) -> &'static str {
                $command_type
            }

            fn correlation_id(&self) -> Uuid {
                self.correlation_id
            }

            fn aggregate_id(&self) -> Uuid {
                self.letter_id
            }
        }
    };
}

/// Command to open a new letter wizard.
#[derive(Debug, Clone)]
pub struct StartLetter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Identifier for the new letter.
    pub letter_id: Uuid,
}

letter_command!(StartLetter, "letter.start");

/// Command to select a cover template.
#[derive(Debug, Clone)]
pub struct SelectCover {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The cover to use.
    pub cover_id: CoverId,
}

letter_command!(SelectCover, "letter.select_cover");

/// Command to select a paper background.
#[derive(Debug, Clone)]
pub struct SelectBackground {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The background to use.
    pub background_id: BackgroundId,
}

letter_command!(SelectBackground, "letter.select_background");

/// Command to append a blank page.
#[derive(Debug, Clone)]
pub struct AddPage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
}

letter_command!(AddPage, "letter.add_page");

/// Command to replace a page's text.
#[derive(Debug, Clone)]
pub struct UpdatePage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Zero-based page index.
    pub page_index: usize,
    /// The new text.
    pub text: String,
}

letter_command!(UpdatePage, "letter.update_page");

/// Command to remove a page.
#[derive(Debug, Clone)]
pub struct DeletePage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Zero-based page index.
    pub page_index: usize,
}

letter_command!(DeletePage, "letter.delete_page");

/// Command to attach a photo from the sample gallery.
#[derive(Debug, Clone)]
pub struct AttachCatalogPhoto {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The gallery photo's URL.
    pub url: String,
}

letter_command!(AttachCatalogPhoto, "letter.attach_catalog_photo");

/// Command to attach an uploaded image.
#[derive(Debug, Clone)]
pub struct UploadPhoto {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// Declared media type, e.g. `image/jpeg`.
    pub media_type: String,
    /// The image bytes, base64 encoded.
    pub data_base64: String,
}

letter_command!(UploadPhoto, "letter.upload_photo");

/// Command to detach a photo.
#[derive(Debug, Clone)]
pub struct DetachPhoto {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The photo to detach.
    pub photo: PhotoRef,
}

letter_command!(DetachPhoto, "letter.detach_photo");

/// Command to attach a game, or detach it if already attached.
#[derive(Debug, Clone)]
pub struct ToggleGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The game to toggle.
    pub game_id: GameId,
}

letter_command!(ToggleGame, "letter.toggle_game");

/// Command to deliver to a preset address.
#[derive(Debug, Clone)]
pub struct SelectAddress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The preset address.
    pub address_id: AddressId,
}

letter_command!(SelectAddress, "letter.select_address");

/// Command to deliver to a typed address.
#[derive(Debug, Clone)]
pub struct EnterCustomAddress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The address text.
    pub address: String,
}

letter_command!(EnterCustomAddress, "letter.enter_custom_address");

/// Command to advance to the next step.
#[derive(Debug, Clone)]
pub struct GoToNextStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
}

letter_command!(GoToNextStep, "letter.next_step");

/// Command to go back one step.
#[derive(Debug, Clone)]
pub struct GoToPreviousStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
}

letter_command!(GoToPreviousStep, "letter.previous_step");

/// Command to jump back to an already reached step.
#[derive(Debug, Clone)]
pub struct GoToStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// 1-based step number, unvalidated.
    pub step: i64,
}

letter_command!(GoToStep, "letter.go_to_step");

/// Command to choose the payment method.
#[derive(Debug, Clone)]
pub struct ChoosePaymentMethod {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The method.
    pub method: PaymentMethod,
}

letter_command!(ChoosePaymentMethod, "letter.choose_payment_method");

/// Command to enter the sender and recipient e-mail addresses.
#[derive(Debug, Clone)]
pub struct EnterContactDetails {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being edited.
    pub letter_id: Uuid,
    /// The sender's address.
    pub sender_email: String,
    /// The recipient's address.
    pub recipient_email: String,
}

letter_command!(EnterContactDetails, "letter.enter_contact_details");

/// Command to place the order.
#[derive(Debug, Clone)]
pub struct CompleteOrder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The letter being ordered.
    pub letter_id: Uuid,
}

letter_command!(CompleteOrder, "letter.complete_order");
