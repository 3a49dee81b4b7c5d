//! Domain events for the Letter Composition context.

use chrono::{DateTime, Utc};
use letterbox_checkout::payment::{ContactDetails, PaymentMethod};
use letterbox_checkout::pricing::PriceBreakdown;
use letterbox_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{BackgroundId, CoverId, GameId};
use super::draft::{DeliveryAddress, PhotoRef};
use super::steps::WizardStep;

/// Emitted when a new letter wizard is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardStarted {
    /// The letter identifier.
    pub letter_id: Uuid,
}

/// Emitted when a cover is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverSelected {
    /// The selected cover.
    pub cover_id: CoverId,
}

/// Emitted when a background is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSelected {
    /// The selected background.
    pub background_id: BackgroundId,
}

/// Emitted when a blank page is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAdded {
    /// Index of the new page.
    pub page_index: usize,
}

/// Emitted when a page's text changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageUpdated {
    /// Index of the page.
    pub page_index: usize,
    /// The new text.
    pub text: String,
}

/// Emitted when a page is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDeleted {
    /// Index the page had.
    pub page_index: usize,
}

/// Emitted when a photo is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAttached {
    /// The photo.
    pub photo: PhotoRef,
}

/// Emitted when a photo is detached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoDetached {
    /// The photo.
    pub photo: PhotoRef,
}

/// Emitted when a game is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAttached {
    /// The game.
    pub game_id: GameId,
}

/// Emitted when a game is detached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetached {
    /// The game.
    pub game_id: GameId,
}

/// Emitted when the delivery address changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSelected {
    /// The new address.
    pub address: DeliveryAddress,
}

/// Emitted when the step cursor moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepChanged {
    /// Step before the move.
    pub from: WizardStep,
    /// Step after the move.
    pub to: WizardStep,
}

/// Emitted when a payment method is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodChosen {
    /// The method.
    pub method: PaymentMethod,
}

/// Emitted when contact e-mail addresses are entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetailsEntered {
    /// The addresses.
    pub contact: ContactDetails,
}

/// Emitted when the order is placed. Also serves as the order
/// confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleted {
    /// The new order's identifier.
    pub order_id: Uuid,
    /// The price charged.
    pub price: PriceBreakdown,
    /// How the sender paid.
    pub payment_method: PaymentMethod,
    /// Where the letter is sent.
    pub recipient_email: String,
    /// Where the confirmation copy goes.
    pub sender_email: String,
    /// When the order was placed.
    pub completed_at: DateTime<Utc>,
}

/// Event type identifier for [`WizardStarted`].
pub const WIZARD_STARTED_EVENT_TYPE: &str = "letter.wizard_started";
/// Event type identifier for [`CoverSelected`].
pub const COVER_SELECTED_EVENT_TYPE: &str = "letter.cover_selected";
/// Event type identifier for [`BackgroundSelected`].
pub const BACKGROUND_SELECTED_EVENT_TYPE: &str = "letter.background_selected";
/// Event type identifier for [`PageAdded`].
pub const PAGE_ADDED_EVENT_TYPE: &str = "letter.page_added";
/// Event type identifier for [`PageUpdated`].
pub const PAGE_UPDATED_EVENT_TYPE: &str = "letter.page_updated";
/// Event type identifier for [`PageDeleted`].
pub const PAGE_DELETED_EVENT_TYPE: &str = "letter.page_deleted";
/// Event type identifier for [`PhotoAttached`].
pub const PHOTO_ATTACHED_EVENT_TYPE: &str = "letter.photo_attached";
/// Event type identifier for [`PhotoDetached`].
pub const PHOTO_DETACHED_EVENT_TYPE: &str = "letter.photo_detached";
/// Event type identifier for [`GameAttached`].
pub const GAME_ATTACHED_EVENT_TYPE: &str = "letter.game_attached";
/// Event type identifier for [`GameDetached`].
pub const GAME_DETACHED_EVENT_TYPE: &str = "letter.game_detached";
/// Event type identifier for [`AddressSelected`].
pub const ADDRESS_SELECTED_EVENT_TYPE: &str = "letter.address_selected";
/// Event type identifier for [`StepChanged`].
pub const STEP_CHANGED_EVENT_TYPE: &str = "letter.step_changed";
/// Event type identifier for [`PaymentMethodChosen`].
pub const PAYMENT_METHOD_CHOSEN_EVENT_TYPE: &str = "letter.payment_method_chosen";
/// Event type identifier for [`ContactDetailsEntered`].
pub const CONTACT_DETAILS_ENTERED_EVENT_TYPE: &str = "letter.contact_details_entered";
/// Event type identifier for [`OrderCompleted`].
pub const ORDER_COMPLETED_EVENT_TYPE: &str = "letter.order_completed";

/// Event payload variants for the Letter Composition context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterEventKind {
    /// A wizard was opened.
    WizardStarted(WizardStarted),
    /// A cover was selected.
    CoverSelected(CoverSelected),
    /// A background was selected.
    BackgroundSelected(BackgroundSelected),
    /// A page was appended.
    PageAdded(PageAdded),
    /// A page's text changed.
    PageUpdated(PageUpdated),
    /// A page was removed.
    PageDeleted(PageDeleted),
    /// A photo was attached.
    PhotoAttached(PhotoAttached),
    /// A photo was detached.
    PhotoDetached(PhotoDetached),
    /// A game was attached.
    GameAttached(GameAttached),
    /// A game was detached.
    GameDetached(GameDetached),
    /// The delivery address changed.
    AddressSelected(AddressSelected),
    /// The step cursor moved.
    StepChanged(StepChanged),
    /// A payment method was chosen.
    PaymentMethodChosen(PaymentMethodChosen),
    /// Contact e-mail addresses were entered.
    ContactDetailsEntered(ContactDetailsEntered),
    /// The order was placed.
    OrderCompleted(OrderCompleted),
}

impl LetterEventKind {
    /// The event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::WizardStarted(_) => WIZARD_STARTED_EVENT_TYPE,
            Self::CoverSelected(_) => COVER_SELECTED_EVENT_TYPE,
            Self::BackgroundSelected(_) => BACKGROUND_SELECTED_EVENT_TYPE,
            Self::PageAdded(_) => PAGE_ADDED_EVENT_TYPE,
            Self::PageUpdated(_) => PAGE_UPDATED_EVENT_TYPE,
            Self::PageDeleted(_) => PAGE_DELETED_EVENT_TYPE,
            Self::PhotoAttached(_) => PHOTO_ATTACHED_EVENT_TYPE,
            Self::PhotoDetached(_) => PHOTO_DETACHED_EVENT_TYPE,
            Self::GameAttached(_) => GAME_ATTACHED_EVENT_TYPE,
            Self::GameDetached(_) => GAME_DETACHED_EVENT_TYPE,
            Self::AddressSelected(_) => ADDRESS_SELECTED_EVENT_TYPE,
            Self::StepChanged(_) => STEP_CHANGED_EVENT_TYPE,
            Self::PaymentMethodChosen(_) => PAYMENT_METHOD_CHOSEN_EVENT_TYPE,
            Self::ContactDetailsEntered(_) => CONTACT_DETAILS_ENTERED_EVENT_TYPE,
            Self::OrderCompleted(_) => ORDER_COMPLETED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Letter Composition context.
#[derive(Debug, Clone)]
pub struct LetterEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: LetterEventKind,
}

impl DomainEvent for LetterEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("LetterEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
