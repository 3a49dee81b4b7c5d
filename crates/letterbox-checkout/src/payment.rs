//! Payment step details.
//!
//! Payment is mocked: the order records how the sender intends to pay and
//! where the letter goes, but no card data is captured and nothing is
//! charged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the sender pays for the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Visa, Mastercard, JCB.
    #[default]
    CreditCard,
    /// PayPal, Apple Pay, Google Pay.
    EWallet,
    /// Direct bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// All methods in display order.
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::EWallet, Self::BankTransfer];

    /// Stable identifier, as used on the wire.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::EWallet => "e-wallet",
            Self::BankTransfer => "bank-transfer",
        }
    }

    /// Display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit/Debit Card",
            Self::EWallet => "E-Wallet",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Sender and recipient e-mail addresses. The letter is delivered to the
/// recipient and a confirmation copy goes to the sender.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    /// The sender's address.
    pub sender_email: String,
    /// The recipient's address.
    pub recipient_email: String,
}

impl ContactDetails {
    /// Both addresses have been filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.sender_email.trim().is_empty() && !self.recipient_email.trim().is_empty()
    }
}
