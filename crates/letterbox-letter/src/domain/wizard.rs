//! The wizard controller.
//!
//! Holds the step cursor and the order draft for one letter. Navigation
//! requests that the rules do not allow are ignored rather than reported:
//! the front end shows them as disabled buttons, so reaching them is not an
//! error.

use letterbox_checkout::payment::{ContactDetails, PaymentMethod};
use serde::Serialize;

use super::catalog::{AddressId, BackgroundId, CoverId, GameId};
use super::draft::{DeliveryAddress, OrderDraft, PhotoRef};
use super::steps::{STEP_COUNT, STEPS, WizardStep};

/// Step cursor plus order draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wizard {
    current_step: WizardStep,
    draft: OrderDraft,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// A wizard on the first step with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_step: WizardStep::CoverAndBackground,
            draft: OrderDraft::new(),
        }
    }

    /// The step being edited.
    #[must_use]
    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// The order draft.
    #[must_use]
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    // --- navigation ---

    /// Whether the current step's rule is satisfied.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.current_step.definition().is_satisfied_by(&self.draft)
    }

    /// Where [`Wizard::go_next`] would move to, if it is allowed.
    #[must_use]
    pub fn next_target(&self) -> Option<WizardStep> {
        if self.can_proceed() {
            self.current_step.next()
        } else {
            None
        }
    }

    /// Where [`Wizard::go_previous`] would move to. Retreating is never gated.
    #[must_use]
    pub fn previous_target(&self) -> Option<WizardStep> {
        self.current_step.previous()
    }

    /// Where [`Wizard::go_to_step`] would move to. Only steps behind the
    /// cursor qualify; jumping ahead would skip validation, and jumping to
    /// the current step changes nothing.
    #[must_use]
    pub fn jump_target(&self, step_number: i64) -> Option<WizardStep> {
        u8::try_from(step_number)
            .ok()
            .and_then(WizardStep::from_number)
            .filter(|&target| target < self.current_step)
    }

    /// Advances one step if the current step is satisfied and is not the
    /// last one. Returns whether the cursor moved.
    pub fn go_next(&mut self) -> bool {
        self.move_to(self.next_target())
    }

    /// Goes back one step unless already on the first. Returns whether the
    /// cursor moved.
    pub fn go_previous(&mut self) -> bool {
        self.move_to(self.previous_target())
    }

    /// Jumps back to an already reached step. Out-of-range and forward
    /// targets are ignored. Returns whether the cursor moved.
    pub fn go_to_step(&mut self, step_number: i64) -> bool {
        self.move_to(self.jump_target(step_number))
    }

    /// Whether a step lies behind the cursor. Display only; navigation does
    /// not consult it.
    #[must_use]
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        step < self.current_step
    }

    /// `current / STEP_COUNT`, in `(0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        f64::from(self.current_step.number()) / f64::from(STEP_COUNT)
    }

    /// Progress as a whole percentage, rounded half up.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        let total = u32::from(STEP_COUNT);
        (u32::from(self.current_step.number()) * 100 + total / 2) / total
    }

    /// Steps whose rule the draft does not currently satisfy, regardless of
    /// where the cursor is.
    #[must_use]
    pub fn incomplete_steps(&self) -> Vec<WizardStep> {
        STEPS
            .iter()
            .filter(|definition| !definition.is_satisfied_by(&self.draft))
            .map(|definition| definition.step)
            .collect()
    }

    pub(crate) fn restore_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    fn move_to(&mut self, target: Option<WizardStep>) -> bool {
        match target {
            Some(step) => {
                self.current_step = step;
                true
            }
            None => false,
        }
    }

    // --- draft editing ---
    //
    // Each setter except `toggle_game` returns whether the draft changed.

    /// Selects the cover template.
    pub fn select_cover(&mut self, cover_id: CoverId) -> bool {
        self.draft.set_cover(cover_id)
    }

    /// Selects the paper background.
    pub fn select_background(&mut self, background_id: BackgroundId) -> bool {
        self.draft.set_background(background_id)
    }

    /// Appends a blank page.
    pub fn add_page(&mut self) -> bool {
        self.draft.add_page()
    }

    /// Replaces a page's text.
    pub fn update_page(&mut self, index: usize, text: String) -> bool {
        self.draft.update_page(index, text)
    }

    /// Removes a page, unless it is the only one left.
    pub fn delete_page(&mut self, index: usize) -> bool {
        self.draft.delete_page(index)
    }

    /// Attaches a photo unless it is already attached.
    pub fn add_photo(&mut self, photo: PhotoRef) -> bool {
        self.draft.add_photo(photo)
    }

    /// Detaches a photo.
    pub fn remove_photo(&mut self, photo: &PhotoRef) -> bool {
        self.draft.remove_photo(photo)
    }

    /// Attaches the game if absent, detaches it if present. Returns whether
    /// the game is attached afterwards; the draft always changes.
    pub fn toggle_game(&mut self, game_id: GameId) -> bool {
        self.draft.toggle_game(game_id)
    }

    /// Attaches a game unless it is already attached.
    pub fn attach_game(&mut self, game_id: GameId) -> bool {
        self.draft.attach_game(game_id)
    }

    /// Detaches a game.
    pub fn detach_game(&mut self, game_id: &GameId) -> bool {
        self.draft.detach_game(game_id)
    }

    /// Delivers to a preset address, discarding any custom address.
    pub fn select_catalog_address(&mut self, address_id: AddressId) -> bool {
        self.draft.set_address(DeliveryAddress::Catalog(address_id))
    }

    /// Delivers to a typed address, discarding any preset selection.
    pub fn enter_custom_address(&mut self, text: String) -> bool {
        self.draft.set_address(DeliveryAddress::Custom(text))
    }

    /// Chooses how to pay.
    pub fn choose_payment_method(&mut self, method: PaymentMethod) -> bool {
        self.draft.set_payment_method(method)
    }

    /// Records the sender and recipient e-mail addresses.
    pub fn enter_contact_details(&mut self, contact: ContactDetails) -> bool {
        self.draft.set_contact(contact)
    }
}
