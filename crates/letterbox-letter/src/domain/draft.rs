//! The order draft: every choice the sender has made so far.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use letterbox_checkout::payment::{ContactDetails, PaymentMethod};
use letterbox_checkout::pricing::PricedOrder;
use letterbox_core::error::DomainError;
use serde::{Deserialize, Serialize};

use super::catalog::{AddressId, BackgroundId, CoverId, GameId};

/// Pages a new draft starts with.
pub const INITIAL_PAGE_COUNT: usize = 3;

/// A photo attached to the letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PhotoRef {
    /// A sample gallery photo, by URL.
    Catalog(String),
    /// An uploaded image as a `data:` URL.
    Upload(String),
}

impl PhotoRef {
    /// Builds a reference for an uploaded image from its media type and
    /// base64 payload. The payload is re-encoded so that the same image
    /// always yields the same reference.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the media type is not `image/*`
    /// or the payload is empty or not valid base64.
    pub fn from_upload(media_type: &str, payload_base64: &str) -> Result<Self, DomainError> {
        let media_type = media_type.trim().to_ascii_lowercase();
        let is_image = media_type
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty());
        if !is_image {
            return Err(DomainError::Validation(format!(
                "uploaded photo must be an image, got media type {media_type:?}"
            )));
        }

        let bytes = STANDARD.decode(payload_base64.trim()).map_err(|e| {
            DomainError::Validation(format!("uploaded photo is not valid base64: {e}"))
        })?;
        if bytes.is_empty() {
            return Err(DomainError::Validation("uploaded photo is empty".to_owned()));
        }

        Ok(Self::Upload(format!(
            "data:{media_type};base64,{}",
            STANDARD.encode(&bytes)
        )))
    }
}

/// Where the letter is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DeliveryAddress {
    /// A preset address from the catalog.
    Catalog(AddressId),
    /// A free-form address typed by the sender.
    Custom(String),
}

impl DeliveryAddress {
    /// A catalog address, or custom text that is not blank.
    #[must_use]
    pub fn is_deliverable(&self) -> bool {
        match self {
            Self::Catalog(_) => true,
            Self::Custom(text) => !text.trim().is_empty(),
        }
    }
}

/// Counts shown under the page editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    /// Pages in the letter, blank or not.
    pub page_count: usize,
    /// Pages with non-whitespace text.
    pub written_pages: usize,
    /// Characters across all pages.
    pub character_count: usize,
    /// Whitespace-separated words across all pages.
    pub word_count: usize,
}

/// The in-progress letter order.
///
/// Setters are crate-private: the draft is edited through
/// [`Wizard`](super::wizard::Wizard). Every setter reports whether it
/// changed anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    cover_id: Option<CoverId>,
    background_id: Option<BackgroundId>,
    /// Never empty.
    pages: Vec<String>,
    /// Insertion ordered, no duplicates.
    photos: Vec<PhotoRef>,
    /// Insertion ordered, no duplicates.
    games: Vec<GameId>,
    address: Option<DeliveryAddress>,
    payment_method: PaymentMethod,
    contact: ContactDetails,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderDraft {
    /// An empty draft with [`INITIAL_PAGE_COUNT`] blank pages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cover_id: None,
            background_id: None,
            pages: vec![String::new(); INITIAL_PAGE_COUNT],
            photos: Vec::new(),
            games: Vec::new(),
            address: None,
            payment_method: PaymentMethod::default(),
            contact: ContactDetails::default(),
        }
    }

    /// Selected cover, if any.
    #[must_use]
    pub fn cover_id(&self) -> Option<&CoverId> {
        self.cover_id.as_ref()
    }

    /// Selected background, if any.
    #[must_use]
    pub fn background_id(&self) -> Option<&BackgroundId> {
        self.background_id.as_ref()
    }

    /// Page texts in order. Never empty.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Attached photos in the order they were added.
    #[must_use]
    pub fn photos(&self) -> &[PhotoRef] {
        &self.photos
    }

    /// Attached games in the order they were added.
    #[must_use]
    pub fn games(&self) -> &[GameId] {
        &self.games
    }

    /// Chosen delivery address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&DeliveryAddress> {
        self.address.as_ref()
    }

    /// Chosen payment method.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Sender and recipient e-mail addresses.
    #[must_use]
    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// At least one page has non-whitespace text.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.pages.iter().any(|page| !page.trim().is_empty())
    }

    /// Page, character and word counts for the letter body.
    #[must_use]
    pub fn content_stats(&self) -> ContentStats {
        let pages = self.pages.iter();
        ContentStats {
            page_count: self.pages.len(),
            written_pages: pages.clone().filter(|page| !page.trim().is_empty()).count(),
            character_count: pages.clone().map(|page| page.chars().count()).sum(),
            word_count: pages.map(|page| page.split_whitespace().count()).sum(),
        }
    }

    /// The photo is already attached.
    #[must_use]
    pub fn has_photo(&self, photo: &PhotoRef) -> bool {
        self.photos.contains(photo)
    }

    /// The game is already attached.
    #[must_use]
    pub fn has_game(&self, game_id: &GameId) -> bool {
        self.games.contains(game_id)
    }

    pub(crate) fn set_cover(&mut self, cover_id: CoverId) -> bool {
        replace_if_changed(&mut self.cover_id, Some(cover_id))
    }

    pub(crate) fn set_background(&mut self, background_id: BackgroundId) -> bool {
        replace_if_changed(&mut self.background_id, Some(background_id))
    }

    pub(crate) fn add_page(&mut self) -> bool {
        self.pages.push(String::new());
        true
    }

    /// Out-of-range indexes change nothing.
    pub(crate) fn update_page(&mut self, index: usize, text: String) -> bool {
        match self.pages.get_mut(index) {
            Some(page) if *page != text => {
                *page = text;
                true
            }
            _ => false,
        }
    }

    /// Refuses to remove the last remaining page.
    pub(crate) fn delete_page(&mut self, index: usize) -> bool {
        if self.pages.len() <= 1 || index >= self.pages.len() {
            return false;
        }
        self.pages.remove(index);
        true
    }

    pub(crate) fn add_photo(&mut self, photo: PhotoRef) -> bool {
        if self.has_photo(&photo) {
            return false;
        }
        self.photos.push(photo);
        true
    }

    pub(crate) fn remove_photo(&mut self, photo: &PhotoRef) -> bool {
        let before = self.photos.len();
        self.photos.retain(|attached| attached != photo);
        self.photos.len() != before
    }

    pub(crate) fn attach_game(&mut self, game_id: GameId) -> bool {
        if self.has_game(&game_id) {
            return false;
        }
        self.games.push(game_id);
        true
    }

    pub(crate) fn detach_game(&mut self, game_id: &GameId) -> bool {
        let before = self.games.len();
        self.games.retain(|attached| attached != game_id);
        self.games.len() != before
    }

    /// Returns whether the game is attached afterwards.
    pub(crate) fn toggle_game(&mut self, game_id: GameId) -> bool {
        if self.detach_game(&game_id) {
            false
        } else {
            self.attach_game(game_id)
        }
    }

    /// A catalog address and a custom address are mutually exclusive, so
    /// setting either replaces the other.
    pub(crate) fn set_address(&mut self, address: DeliveryAddress) -> bool {
        replace_if_changed(&mut self.address, Some(address))
    }

    pub(crate) fn set_payment_method(&mut self, method: PaymentMethod) -> bool {
        replace_if_changed(&mut self.payment_method, method)
    }

    pub(crate) fn set_contact(&mut self, contact: ContactDetails) -> bool {
        replace_if_changed(&mut self.contact, contact)
    }
}

impl PricedOrder for OrderDraft {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn photo_count(&self) -> usize {
        self.photos.len()
    }

    fn game_count(&self) -> usize {
        self.games.len()
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
