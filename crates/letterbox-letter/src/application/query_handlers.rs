//! Query handlers for the Letter Composition context.
//!
//! This module contains query handlers that reconstitute letters from stored
//! events and return read-only view DTOs.

use letterbox_checkout::pricing::{
    LineItem, PriceBreakdown, PricingConfig, compute_price, format_krw,
};
use letterbox_core::aggregate::AggregateRoot;
use letterbox_core::error::DomainError;
use letterbox_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::LetterWizard;
use crate::domain::draft::{ContentStats, OrderDraft};
use crate::domain::events::OrderCompleted;
use crate::domain::steps::{STEP_COUNT, STEPS, WizardStep};

/// One entry of the step bar.
#[derive(Debug, Serialize)]
pub struct StepView {
    /// 1-based step number.
    pub number: u8,
    /// Short name.
    pub name: &'static str,
    /// What the sender does on the step.
    pub description: &'static str,
    /// The cursor has moved past this step.
    pub complete: bool,
    /// The cursor is on this step.
    pub current: bool,
}

/// Read-only view of a letter.
#[derive(Debug, Serialize)]
pub struct LetterView {
    /// The letter identifier.
    pub letter_id: Uuid,
    /// Current version (event count).
    pub version: i64,
    /// The step being edited.
    pub current_step: WizardStep,
    /// Number of steps in the wizard.
    pub step_count: u8,
    /// The step bar, in order.
    pub steps: Vec<StepView>,
    /// Whether "next" is enabled on the current step.
    pub can_proceed: bool,
    /// `current_step / step_count`.
    pub progress_fraction: f64,
    /// Progress as a whole percentage.
    pub progress_percent: u32,
    /// Steps whose rule is not satisfied yet.
    pub incomplete_steps: Vec<WizardStep>,
    /// Every choice made so far.
    pub draft: OrderDraft,
    /// Page, character and word counts for the letter body.
    pub content_stats: ContentStats,
    /// What the draft costs right now.
    pub price: PriceBreakdown,
    /// The confirmation, once the order is placed.
    pub order: Option<OrderCompleted>,
}

/// A priced summary row with its display amount.
#[derive(Debug, Serialize)]
pub struct QuoteLine {
    /// The row.
    #[serde(flatten)]
    pub item: LineItem,
    /// `amount` formatted as won.
    pub formatted_amount: String,
}

/// The order summary shown on the payment step.
#[derive(Debug, Serialize)]
pub struct PriceQuote {
    /// The letter identifier.
    pub letter_id: Uuid,
    /// The full breakdown.
    pub breakdown: PriceBreakdown,
    /// Summary rows.
    pub lines: Vec<QuoteLine>,
    /// Subtotal formatted as won.
    pub formatted_subtotal: String,
    /// Discount formatted as won.
    pub formatted_discount: String,
    /// Total formatted as won.
    pub formatted_total: String,
    /// The price was fixed when the order was placed.
    pub charged: bool,
}

async fn load_letter(
    letter_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<LetterWizard, DomainError> {
    let stored_events = repo.load_events(letter_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::AggregateNotFound(letter_id));
    }
    command_handlers::reconstitute(letter_id, &stored_events)
}

/// Retrieves a letter by its aggregate ID, priced with `pricing`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_letter_by_id(
    letter_id: Uuid,
    pricing: &PricingConfig,
    repo: &dyn EventRepository,
) -> Result<LetterView, DomainError> {
    let letter = load_letter(letter_id, repo).await?;
    let wizard = letter.wizard();
    let current_step = wizard.current_step();

    let steps = STEPS
        .iter()
        .map(|definition| StepView {
            number: definition.step.number(),
            name: definition.name,
            description: definition.description,
            complete: wizard.is_step_complete(definition.step),
            current: definition.step == current_step,
        })
        .collect();

    Ok(LetterView {
        letter_id,
        version: letter.version(),
        current_step,
        step_count: STEP_COUNT,
        steps,
        can_proceed: wizard.can_proceed(),
        progress_fraction: wizard.progress_fraction(),
        progress_percent: wizard.progress_percent(),
        incomplete_steps: wizard.incomplete_steps(),
        draft: wizard.draft().clone(),
        content_stats: wizard.draft().content_stats(),
        price: compute_price(wizard.draft(), pricing),
        order: letter.order().cloned(),
    })
}

/// Prices a letter for the order summary. A placed order reports the price
/// it was charged; otherwise the draft is priced with `pricing`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_price_quote(
    letter_id: Uuid,
    pricing: &PricingConfig,
    repo: &dyn EventRepository,
) -> Result<PriceQuote, DomainError> {
    let letter = load_letter(letter_id, repo).await?;
    let (breakdown, charged) = match letter.order() {
        Some(order) => (order.price, true),
        None => (compute_price(letter.wizard().draft(), pricing), false),
    };

    let lines = breakdown
        .line_items()
        .into_iter()
        .map(|item| QuoteLine {
            formatted_amount: format_krw(item.amount),
            item,
        })
        .collect();

    Ok(PriceQuote {
        letter_id,
        breakdown,
        lines,
        formatted_subtotal: format_krw(breakdown.subtotal),
        formatted_discount: format_krw(breakdown.discount),
        formatted_total: format_krw(breakdown.total),
        charged,
    })
}

#[cfg(test)]
mod tests {
    use letterbox_checkout::pricing::{LineItemKind, PricingConfig};
    use letterbox_core::error::DomainError;
    use uuid::Uuid;

    use crate::application::fixtures::{filled, ready_for_payment, started};
    use crate::application::query_handlers::{get_letter_by_id, get_price_quote};
    use crate::domain::steps::WizardStep;
    use letterbox_test_support::{EmptyEventRepository, RecordingEventRepository};

    #[tokio::test]
    async fn test_get_letter_by_id_returns_fresh_wizard() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(started(letter_id));

        // Act
        let view = get_letter_by_id(letter_id, &PricingConfig::default(), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(view.letter_id, letter_id);
        assert_eq!(view.version, 1);
        assert_eq!(view.current_step, WizardStep::CoverAndBackground);
        assert_eq!(view.step_count, 6);
        assert_eq!(view.steps.len(), 6);
        assert!(view.steps[0].current);
        assert!(!view.steps[0].complete);
        assert!(!view.can_proceed);
        assert_eq!(view.progress_percent, 17);
        assert_eq!(view.draft.pages().len(), 3);
        assert_eq!(view.price.total, 50_000);
        assert!(view.order.is_none());
    }

    #[tokio::test]
    async fn test_get_letter_by_id_reflects_payment_step() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(ready_for_payment(letter_id));

        let view = get_letter_by_id(letter_id, &PricingConfig::default(), &repo)
            .await
            .unwrap();

        assert_eq!(view.current_step, WizardStep::Payment);
        assert!(view.steps[..5].iter().all(|step| step.complete));
        assert!(view.steps[5].current);
        assert_eq!(view.progress_percent, 100);
        assert!(view.incomplete_steps.is_empty());
        assert!(view.draft.contact().is_complete());
    }

    #[tokio::test]
    async fn test_get_letter_by_id_prices_with_given_config() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(filled(letter_id));
        let pricing = PricingConfig {
            base_price: 42_000,
            ..PricingConfig::default()
        };

        let view = get_letter_by_id(letter_id, &pricing, &repo).await.unwrap();

        assert_eq!(view.price.total, 42_000);
        assert!(view.can_proceed);
        assert_eq!(view.content_stats.page_count, 3);
        assert_eq!(view.content_stats.written_pages, 1);
        assert_eq!(view.content_stats.word_count, 2);
        assert_eq!(view.content_stats.character_count, 12);
    }

    #[tokio::test]
    async fn test_get_letter_by_id_returns_not_found_when_no_events() {
        // Arrange
        let letter_id = Uuid::new_v4();
        let repo = EmptyEventRepository;

        // Act
        let result = get_letter_by_id(letter_id, &PricingConfig::default(), &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::AggregateNotFound(id) => assert_eq!(id, letter_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_price_quote_formats_lines() {
        let letter_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(filled(letter_id));

        let quote = get_price_quote(letter_id, &PricingConfig::default(), &repo)
            .await
            .unwrap();

        assert!(!quote.charged);
        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.lines[0].item.kind, LineItemKind::Base);
        assert_eq!(quote.lines[0].formatted_amount, "₩50,000");
        assert_eq!(quote.formatted_discount, "₩0");
        assert_eq!(quote.formatted_total, "₩50,000");
    }

    #[tokio::test]
    async fn test_get_price_quote_returns_not_found_when_no_events() {
        let letter_id = Uuid::new_v4();

        let result =
            get_price_quote(letter_id, &PricingConfig::default(), &EmptyEventRepository).await;

        assert!(matches!(result, Err(DomainError::AggregateNotFound(_))));
    }
}
