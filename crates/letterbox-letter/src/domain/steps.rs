//! The wizard's step sequence and the rule that gates leaving each step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::draft::OrderDraft;

/// Number of steps in the wizard.
pub const STEP_COUNT: u8 = 6;

/// One screen of the wizard. Serialized as its 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    /// Pick a cover and a paper background.
    CoverAndBackground = 1,
    /// Write the pages.
    WriteContent = 2,
    /// Attach photos.
    AttachPhotos = 3,
    /// Attach mini-games.
    AttachGames = 4,
    /// Choose where the letter goes.
    DeliveryAddress = 5,
    /// Review the price and pay.
    Payment = 6,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [Self; STEP_COUNT as usize] = [
        Self::CoverAndBackground,
        Self::WriteContent,
        Self::AttachPhotos,
        Self::AttachGames,
        Self::DeliveryAddress,
        Self::Payment,
    ];

    /// The step's 1-based position.
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// The step at a 1-based position, if there is one.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    /// The following step; `None` on the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step; `None` on the first one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    /// The step's entry in [`STEPS`].
    #[must_use]
    pub fn definition(self) -> &'static StepDefinition {
        &STEPS[usize::from(self.number() - 1)]
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

/// A step number outside `1..=STEP_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("step {0} is not between 1 and {STEP_COUNT}")]
pub struct InvalidStepNumber(pub u8);

impl TryFrom<u8> for WizardStep {
    type Error = InvalidStepNumber;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or(InvalidStepNumber(number))
    }
}

/// A step's display data and its validation predicate.
#[derive(Debug)]
pub struct StepDefinition {
    /// The step.
    pub step: WizardStep,
    /// Short name shown in the step bar.
    pub name: &'static str,
    /// What the sender does on this step.
    pub description: &'static str,
    validate: fn(&OrderDraft) -> bool,
}

impl StepDefinition {
    /// Whether the draft satisfies this step, i.e. the sender may move on.
    #[must_use]
    pub fn is_satisfied_by(&self, draft: &OrderDraft) -> bool {
        (self.validate)(draft)
    }
}

/// The step table, in order.
pub static STEPS: [StepDefinition; STEP_COUNT as usize] = [
    StepDefinition {
        step: WizardStep::CoverAndBackground,
        name: "Cover & Background",
        description: "Choose cover and background for your letter",
        validate: cover_and_background_chosen,
    },
    StepDefinition {
        step: WizardStep::WriteContent,
        name: "Write Content",
        description: "Write your letter content",
        validate: OrderDraft::has_content,
    },
    StepDefinition {
        step: WizardStep::AttachPhotos,
        name: "Attach Photos",
        description: "Add photo attachments",
        validate: optional,
    },
    StepDefinition {
        step: WizardStep::AttachGames,
        name: "Attach Games",
        description: "Add game attachments",
        validate: optional,
    },
    StepDefinition {
        step: WizardStep::DeliveryAddress,
        name: "Delivery Address",
        description: "Select delivery address in Korea",
        validate: delivery_address_chosen,
    },
    // Payment fields are checked when the order is placed, not here.
    StepDefinition {
        step: WizardStep::Payment,
        name: "Payment",
        description: "Complete payment and order",
        validate: optional,
    },
];

fn cover_and_background_chosen(draft: &OrderDraft) -> bool {
    draft.cover_id().is_some() && draft.background_id().is_some()
}

fn delivery_address_chosen(draft: &OrderDraft) -> bool {
    draft.address().is_some_and(|address| address.is_deliverable())
}

fn optional(_draft: &OrderDraft) -> bool {
    true
}
