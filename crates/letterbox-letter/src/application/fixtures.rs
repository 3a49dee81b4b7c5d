//! Stored letter histories for handler tests.

use letterbox_checkout::payment::{ContactDetails, PaymentMethod};
use letterbox_core::aggregate::AggregateRoot;
use letterbox_core::repository::StoredEvent;
use letterbox_test_support::FixedClock;
use uuid::Uuid;

use crate::domain::aggregates::LetterWizard;
use crate::domain::catalog::{AddressId, BackgroundId, CoverId};
use crate::domain::steps::WizardStep;

/// Moves pending events into `history` and applies them, as a persist and
/// reload would.
fn commit(letter: &mut LetterWizard, history: &mut Vec<StoredEvent>) {
    history.extend(letter.pending_stored_events());
    for event in letter.uncommitted_events().to_vec() {
        letter.apply(&event);
    }
    letter.clear_uncommitted_events();
}

fn start(letter_id: Uuid, history: &mut Vec<StoredEvent>) -> LetterWizard {
    let mut letter = LetterWizard::new(letter_id);
    letter.start(Uuid::new_v4(), &FixedClock::default()).unwrap();
    commit(&mut letter, history);
    letter
}

fn fill(letter: &mut LetterWizard, history: &mut Vec<StoredEvent>) {
    let clock = FixedClock::default();
    let cid = Uuid::new_v4();
    letter.select_cover(CoverId::from("romantic"), cid, &clock).unwrap();
    letter.select_background(BackgroundId::from("lined"), cid, &clock).unwrap();
    letter.update_page(0, "Dear Min-ji,".to_owned(), cid, &clock).unwrap();
    letter
        .select_catalog_address(AddressId::from("busan-haeundae"), cid, &clock)
        .unwrap();
    commit(letter, history);
}

/// A freshly started letter.
pub(crate) fn started(letter_id: Uuid) -> Vec<StoredEvent> {
    let mut history = Vec::new();
    start(letter_id, &mut history);
    history
}

/// Every step rule satisfied, cursor still on the first step.
pub(crate) fn filled(letter_id: Uuid) -> Vec<StoredEvent> {
    let mut history = Vec::new();
    let mut letter = start(letter_id, &mut history);
    fill(&mut letter, &mut history);
    history
}

/// On the payment step with bank transfer chosen and both e-mail addresses
/// entered.
pub(crate) fn ready_for_payment(letter_id: Uuid) -> Vec<StoredEvent> {
    let clock = FixedClock::default();
    let mut history = Vec::new();
    let mut letter = start(letter_id, &mut history);
    fill(&mut letter, &mut history);
    while letter.wizard().current_step() != WizardStep::Payment {
        letter.go_next(Uuid::new_v4(), &clock).unwrap();
        commit(&mut letter, &mut history);
    }
    letter
        .choose_payment_method(PaymentMethod::BankTransfer, Uuid::new_v4(), &clock)
        .unwrap();
    let contact = ContactDetails {
        sender_email: "jae@example.com".to_owned(),
        recipient_email: "minji@example.com".to_owned(),
    };
    letter
        .enter_contact_details(contact, Uuid::new_v4(), &clock)
        .unwrap();
    commit(&mut letter, &mut history);
    history
}
