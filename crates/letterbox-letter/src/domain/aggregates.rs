//! Aggregate roots for the Letter Composition context.

use letterbox_checkout::payment::{ContactDetails, PaymentMethod};
use letterbox_checkout::pricing::{PricingConfig, compute_price};
use letterbox_core::aggregate::AggregateRoot;
use letterbox_core::clock::Clock;
use letterbox_core::error::DomainError;
use letterbox_core::event::EventMetadata;
use uuid::Uuid;

use super::catalog::{AddressId, BackgroundId, CoverId, GameId};
use super::draft::{DeliveryAddress, PhotoRef};
use super::events::{
    AddressSelected, BackgroundSelected, ContactDetailsEntered, CoverSelected, GameAttached,
    GameDetached, LetterEvent, LetterEventKind, OrderCompleted, PageAdded, PageDeleted,
    PageUpdated, PaymentMethodChosen, PhotoAttached, PhotoDetached, StepChanged, WizardStarted,
};
use super::steps::WizardStep;
use super::wizard::Wizard;

/// The aggregate root for one letter being composed.
///
/// Command methods that would leave the wizard unchanged record nothing, so
/// a replayed stream only ever holds real changes.
#[derive(Debug)]
pub struct LetterWizard {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Step cursor and draft as of the last applied event.
    wizard: Wizard,
    /// Set once the order is placed.
    order: Option<OrderCompleted>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<LetterEvent>,
}

impl LetterWizard {
    /// Creates an empty letter.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            wizard: Wizard::new(),
            order: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// The wizard state.
    #[must_use]
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// The placed order, if any.
    #[must_use]
    pub fn order(&self) -> Option<&OrderCompleted> {
        self.order.as_ref()
    }

    /// Opens the wizard, producing a `WizardStarted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the letter already has history.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.version > 0 || !self.uncommitted_events.is_empty() {
            return Err(DomainError::Validation(format!(
                "letter {} has already been started",
                self.id
            )));
        }
        self.record(
            LetterEventKind::WizardStarted(WizardStarted { letter_id: self.id }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Selects a cover template.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn select_cover(
        &mut self,
        cover_id: CoverId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.wizard.draft().cover_id() != Some(&cover_id) {
            self.record(
                LetterEventKind::CoverSelected(CoverSelected { cover_id }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Selects a paper background.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn select_background(
        &mut self,
        background_id: BackgroundId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.wizard.draft().background_id() != Some(&background_id) {
            self.record(
                LetterEventKind::BackgroundSelected(BackgroundSelected { background_id }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Appends a blank page.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn add_page(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        self.ensure_open()?;
        let page_index = self.wizard.draft().pages().len();
        self.record(
            LetterEventKind::PageAdded(PageAdded { page_index }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Replaces a page's text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed or the
    /// page does not exist.
    pub fn update_page(
        &mut self,
        page_index: usize,
        text: String,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        let current = self.page(page_index)?;
        if *current != text {
            self.record(
                LetterEventKind::PageUpdated(PageUpdated { page_index, text }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Removes a page. Deleting the only remaining page is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed or the
    /// page does not exist.
    pub fn delete_page(
        &mut self,
        page_index: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.page(page_index)?;
        if self.wizard.draft().pages().len() > 1 {
            self.record(
                LetterEventKind::PageDeleted(PageDeleted { page_index }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Attaches a photo. Attaching one that is already attached is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn attach_photo(
        &mut self,
        photo: PhotoRef,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if !self.wizard.draft().has_photo(&photo) {
            self.record(
                LetterEventKind::PhotoAttached(PhotoAttached { photo }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Detaches a photo. Detaching one that is not attached is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn detach_photo(
        &mut self,
        photo: PhotoRef,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.wizard.draft().has_photo(&photo) {
            self.record(
                LetterEventKind::PhotoDetached(PhotoDetached { photo }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Attaches the game if it is absent and detaches it otherwise.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn toggle_game(
        &mut self,
        game_id: GameId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        let kind = if self.wizard.draft().has_game(&game_id) {
            LetterEventKind::GameDetached(GameDetached { game_id })
        } else {
            LetterEventKind::GameAttached(GameAttached { game_id })
        };
        self.record(kind, correlation_id, clock);
        Ok(())
    }

    /// Delivers to a preset address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn select_catalog_address(
        &mut self,
        address_id: AddressId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.change_address(DeliveryAddress::Catalog(address_id), correlation_id, clock)
    }

    /// Delivers to a typed address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn enter_custom_address(
        &mut self,
        address: String,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.change_address(DeliveryAddress::Custom(address), correlation_id, clock)
    }

    /// Advances one step when the current step is satisfied.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn go_next(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        self.ensure_open()?;
        let target = self.wizard.next_target();
        self.change_step(target, correlation_id, clock);
        Ok(())
    }

    /// Goes back one step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn go_previous(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        let target = self.wizard.previous_target();
        self.change_step(target, correlation_id, clock);
        Ok(())
    }

    /// Jumps back to a step behind the cursor. Other targets are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn go_to_step(
        &mut self,
        step_number: i64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        let target = self.wizard.jump_target(step_number);
        self.change_step(target, correlation_id, clock);
        Ok(())
    }

    /// Chooses how to pay.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn choose_payment_method(
        &mut self,
        method: PaymentMethod,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.wizard.draft().payment_method() != method {
            self.record(
                LetterEventKind::PaymentMethodChosen(PaymentMethodChosen { method }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Records the sender and recipient e-mail addresses.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has been placed.
    pub fn enter_contact_details(
        &mut self,
        contact: ContactDetails,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if *self.wizard.draft().contact() != contact {
            self.record(
                LetterEventKind::ContactDetailsEntered(ContactDetailsEntered { contact }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    /// Places the order, producing an `OrderCompleted` event priced with
    /// `pricing`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order has already been
    /// placed, the wizard is not on the payment step, a step's rule is not
    /// satisfied, or either e-mail address is blank.
    pub fn complete_order(
        &mut self,
        order_id: Uuid,
        pricing: &PricingConfig,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.wizard.current_step() != WizardStep::Payment {
            return Err(DomainError::Validation(format!(
                "orders are placed from the {} step, letter {} is on {}",
                WizardStep::Payment.definition().name,
                self.id,
                self.wizard.current_step().definition().name
            )));
        }

        let incomplete = self.wizard.incomplete_steps();
        if !incomplete.is_empty() {
            let names: Vec<&str> = incomplete
                .iter()
                .map(|step| step.definition().name)
                .collect();
            return Err(DomainError::Validation(format!(
                "letter {} has incomplete steps: {}",
                self.id,
                names.join(", ")
            )));
        }

        let draft = self.wizard.draft();
        if !draft.contact().is_complete() {
            return Err(DomainError::Validation(
                "sender and recipient e-mail addresses are required".to_owned(),
            ));
        }

        let completed = OrderCompleted {
            order_id,
            price: compute_price(draft, pricing),
            payment_method: draft.payment_method(),
            recipient_email: draft.contact().recipient_email.clone(),
            sender_email: draft.contact().sender_email.clone(),
            completed_at: clock.now(),
        };
        self.record(
            LetterEventKind::OrderCompleted(completed),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        match &self.order {
            Some(order) => Err(DomainError::Validation(format!(
                "letter {} was already ordered as {}",
                self.id, order.order_id
            ))),
            None => Ok(()),
        }
    }

    fn page(&self, page_index: usize) -> Result<&String, DomainError> {
        let pages = self.wizard.draft().pages();
        pages.get(page_index).ok_or_else(|| {
            DomainError::Validation(format!(
                "page {page_index} does not exist, letter {} has {} pages",
                self.id,
                pages.len()
            ))
        })
    }

    fn change_address(
        &mut self,
        address: DeliveryAddress,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if self.wizard.draft().address() != Some(&address) {
            self.record(
                LetterEventKind::AddressSelected(AddressSelected { address }),
                correlation_id,
                clock,
            );
        }
        Ok(())
    }

    fn change_step(&mut self, target: Option<WizardStep>, correlation_id: Uuid, clock: &dyn Clock) {
        if let Some(to) = target {
            let from = self.wizard.current_step();
            self.record(
                LetterEventKind::StepChanged(StepChanged { from, to }),
                correlation_id,
                clock,
            );
        }
    }

    fn record(&mut self, kind: LetterEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let metadata = EventMetadata::caused_by_command(
            kind.event_type(),
            self.id,
            self.next_sequence_number(),
            correlation_id,
            clock.now(),
        );
        self.uncommitted_events.push(LetterEvent { metadata, kind });
    }
}

impl AggregateRoot for LetterWizard {
    type Event = LetterEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            LetterEventKind::WizardStarted(_) => {}
            LetterEventKind::CoverSelected(payload) => {
                self.wizard.select_cover(payload.cover_id.clone());
            }
            LetterEventKind::BackgroundSelected(payload) => {
                self.wizard.select_background(payload.background_id.clone());
            }
            LetterEventKind::PageAdded(_) => {
                self.wizard.add_page();
            }
            LetterEventKind::PageUpdated(payload) => {
                self.wizard.update_page(payload.page_index, payload.text.clone());
            }
            LetterEventKind::PageDeleted(payload) => {
                self.wizard.delete_page(payload.page_index);
            }
            LetterEventKind::PhotoAttached(payload) => {
                self.wizard.add_photo(payload.photo.clone());
            }
            LetterEventKind::PhotoDetached(payload) => {
                self.wizard.remove_photo(&payload.photo);
            }
            LetterEventKind::GameAttached(payload) => {
                self.wizard.attach_game(payload.game_id.clone());
            }
            LetterEventKind::GameDetached(payload) => {
                self.wizard.detach_game(&payload.game_id);
            }
            LetterEventKind::AddressSelected(payload) => match &payload.address {
                DeliveryAddress::Catalog(address_id) => {
                    self.wizard.select_catalog_address(address_id.clone());
                }
                DeliveryAddress::Custom(text) => {
                    self.wizard.enter_custom_address(text.clone());
                }
            },
            LetterEventKind::PaymentMethodChosen(payload) => {
                self.wizard.choose_payment_method(payload.method);
            }
            LetterEventKind::ContactDetailsEntered(payload) => {
                self.wizard.enter_contact_details(payload.contact.clone());
            }
            LetterEventKind::StepChanged(payload) => {
                self.wizard.restore_step(payload.to);
            }
            LetterEventKind::OrderCompleted(payload) => {
                self.order = Some(payload.clone());
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
