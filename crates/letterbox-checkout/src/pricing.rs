//! Order pricing.
//!
//! A letter costs a flat base price plus per-item charges for photos, games
//! and pages beyond the free allowance. Orders whose subtotal strictly
//! exceeds the bulk threshold receive a flat discount. All amounts are whole
//! Korean won.

use serde::{Deserialize, Serialize};

/// An amount of Korean won. KRW has no minor unit.
pub type Won = u64;

/// Default flat price of a letter.
pub const DEFAULT_BASE_PRICE: Won = 50_000;
/// Default price per attached photo.
pub const DEFAULT_PHOTO_UNIT_PRICE: Won = 5_000;
/// Default price per attached game.
pub const DEFAULT_GAME_UNIT_PRICE: Won = 10_000;
/// Default number of pages included in the base price.
pub const DEFAULT_FREE_PAGE_ALLOWANCE: u64 = 3;
/// Default price per page beyond the free allowance.
pub const DEFAULT_EXTRA_PAGE_UNIT_PRICE: Won = 3_000;
/// Default subtotal the order must strictly exceed to earn the discount.
pub const DEFAULT_BULK_DISCOUNT_THRESHOLD: Won = 100_000;
/// Default flat bulk discount.
pub const DEFAULT_BULK_DISCOUNT_AMOUNT: Won = 10_000;

/// The order contents that pricing depends on.
pub trait PricedOrder {
    /// Number of written pages, blank ones included.
    fn page_count(&self) -> usize;

    /// Number of attached photos.
    fn photo_count(&self) -> usize;

    /// Number of attached games.
    fn game_count(&self) -> usize;
}

/// Plain item counts, for pricing an order without a draft at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderCounts {
    /// Number of pages.
    pub pages: usize,
    /// Number of photos.
    pub photos: usize,
    /// Number of games.
    pub games: usize,
}

impl PricedOrder for OrderCounts {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn photo_count(&self) -> usize {
        self.photos
    }

    fn game_count(&self) -> usize {
        self.games
    }
}

/// Price list used by [`compute_price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat price of a letter.
    pub base_price: Won,
    /// Price per attached photo.
    pub photo_unit_price: Won,
    /// Price per attached game.
    pub game_unit_price: Won,
    /// Pages included in the base price.
    pub free_page_allowance: u64,
    /// Price per page beyond the allowance.
    pub extra_page_unit_price: Won,
    /// Subtotal that must be strictly exceeded to earn the discount.
    pub bulk_discount_threshold: Won,
    /// Flat discount applied above the threshold.
    pub bulk_discount_amount: Won,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            photo_unit_price: DEFAULT_PHOTO_UNIT_PRICE,
            game_unit_price: DEFAULT_GAME_UNIT_PRICE,
            free_page_allowance: DEFAULT_FREE_PAGE_ALLOWANCE,
            extra_page_unit_price: DEFAULT_EXTRA_PAGE_UNIT_PRICE,
            bulk_discount_threshold: DEFAULT_BULK_DISCOUNT_THRESHOLD,
            bulk_discount_amount: DEFAULT_BULK_DISCOUNT_AMOUNT,
        }
    }
}

/// Itemized price of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Flat base price.
    pub base_price: Won,
    /// Number of photos charged.
    pub photo_count: u64,
    /// Photo line item.
    pub photo_cost: Won,
    /// Number of games charged.
    pub game_count: u64,
    /// Game line item.
    pub game_cost: Won,
    /// Pages beyond the free allowance.
    pub extra_pages: u64,
    /// Extra page line item.
    pub page_cost: Won,
    /// Sum of all line items.
    pub subtotal: Won,
    /// Bulk discount, zero when not earned.
    pub discount: Won,
    /// Amount due.
    pub total: Won,
}

/// What a line item charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// The letter itself.
    Base,
    /// Photo attachments.
    Photos,
    /// Game attachments.
    Games,
    /// Pages beyond the allowance.
    ExtraPages,
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// What is charged.
    pub kind: LineItemKind,
    /// Human-readable label.
    pub label: String,
    /// Quantity charged (1 for the base price).
    pub quantity: u64,
    /// Amount charged.
    pub amount: Won,
}

impl PriceBreakdown {
    /// The summary rows to display. The base row is always present; the
    /// others only when they charge something.
    #[must_use]
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items = vec![LineItem {
            kind: LineItemKind::Base,
            label: "Basic digital letter".to_owned(),
            quantity: 1,
            amount: self.base_price,
        }];
        if self.photo_count > 0 {
            items.push(LineItem {
                kind: LineItemKind::Photos,
                label: format!("Photo attachments ({} photos)", self.photo_count),
                quantity: self.photo_count,
                amount: self.photo_cost,
            });
        }
        if self.game_count > 0 {
            items.push(LineItem {
                kind: LineItemKind::Games,
                label: format!("Games ({} games)", self.game_count),
                quantity: self.game_count,
                amount: self.game_cost,
            });
        }
        if self.extra_pages > 0 {
            items.push(LineItem {
                kind: LineItemKind::ExtraPages,
                label: format!("Additional pages ({} pages)", self.extra_pages),
                quantity: self.extra_pages,
                amount: self.page_cost,
            });
        }
        items
    }
}

/// Prices an order.
///
/// Deterministic and free of side effects, so it is recomputed whenever the
/// order changes rather than cached.
#[must_use]
pub fn compute_price<O: PricedOrder + ?Sized>(
    order: &O,
    config: &PricingConfig,
) -> PriceBreakdown {
    let photo_count = order.photo_count() as u64;
    let game_count = order.game_count() as u64;
    let page_count = order.page_count() as u64;

    let photo_cost = photo_count.saturating_mul(config.photo_unit_price);
    let game_cost = game_count.saturating_mul(config.game_unit_price);
    let extra_pages = page_count.saturating_sub(config.free_page_allowance);
    let page_cost = extra_pages.saturating_mul(config.extra_page_unit_price);

    let subtotal = config
        .base_price
        .saturating_add(photo_cost)
        .saturating_add(game_cost)
        .saturating_add(page_cost);
    let discount = if subtotal > config.bulk_discount_threshold {
        config.bulk_discount_amount
    } else {
        0
    };

    PriceBreakdown {
        base_price: config.base_price,
        photo_count,
        photo_cost,
        game_count,
        game_cost,
        extra_pages,
        page_cost,
        subtotal,
        discount,
        total: subtotal.saturating_sub(discount),
    }
}

/// Formats an amount as Korean won, e.g. `₩76,000`.
#[must_use]
pub fn format_krw(amount: Won) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    grouped.push('₩');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
