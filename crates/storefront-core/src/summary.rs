//! # Order Summary
//!
//! Checkout totals for the *selected* part of a cart.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  selected lines ──► subtotal = Σ price × qty                            │
//! │                        │                                                │
//! │                        ├──► tax      = subtotal × 9%        (unrounded) │
//! │                        ├──► shipping = subtotal < $50 ? $1.99 : free    │
//! │                        ▼                                                │
//! │                  grand_total = subtotal + tax + shipping                │
//! │                                                                         │
//! │  Display rounds each figure to cents: tax 5.3982 shows as $5.40        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The summary is a pure projection of `(lines, selected)`. It holds no
//! state and is recomputed on every read.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::money::Money;
use crate::types::{ProductId, TaxRate};

/// Flat sales tax applied at checkout.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(900);

/// Subtotal at which shipping becomes free, in cents.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5000;

/// Shipping fee below the threshold, in cents.
pub const SHIPPING_FEE_CENTS: i64 = 199;

// =============================================================================
// Policy
// =============================================================================

/// Rates and thresholds used by [`OrderSummary::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryPolicy {
    pub tax_rate: TaxRate,
    pub free_shipping_threshold: Money,
    pub shipping_fee: Money,
}

impl Default for SummaryPolicy {
    /// 9% tax, $1.99 shipping under $50.
    fn default() -> Self {
        SummaryPolicy {
            tax_rate: DEFAULT_TAX_RATE,
            free_shipping_threshold: Money::from_cents(FREE_SHIPPING_THRESHOLD_CENTS),
            shipping_fee: Money::from_cents(SHIPPING_FEE_CENTS),
        }
    }
}

impl SummaryPolicy {
    /// Shipping owed for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal < self.free_shipping_threshold {
            self.shipping_fee
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// One selected line as shown in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Money,
    #[ts(type = "number")]
    pub quantity: u64,
    pub line_subtotal: Money,
}

impl From<&CartLine> for SummaryLine {
    fn from(line: &CartLine) -> Self {
        SummaryLine {
            product_id: line.id(),
            title: line.product.title.clone(),
            unit_price: line.product.price,
            quantity: line.quantity,
            line_subtotal: line.subtotal(),
        }
    }
}

/// Checkout totals over the selected lines. All amounts are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    #[ts(type = "number")]
    pub selected_total_quantity: u64,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping_fee: Money,
    pub grand_total: Money,
}

impl OrderSummary {
    /// Projects the summary for the cart's current selection.
    pub fn compute(cart: &Cart, policy: &SummaryPolicy) -> Self {
        let lines: Vec<SummaryLine> = cart.selected_lines().map(SummaryLine::from).collect();

        let selected_total_quantity = lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.quantity));
        let subtotal: Money = lines.iter().map(|line| line.line_subtotal).sum();
        let tax = subtotal.calculate_tax(policy.tax_rate);
        let shipping_fee = policy.shipping_for(subtotal);

        OrderSummary {
            lines,
            selected_total_quantity,
            subtotal,
            tax,
            shipping_fee,
            grand_total: subtotal + tax + shipping_fee,
        }
    }

    /// Whether anything is selected for checkout.
    pub fn has_selection(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Number of lines that would go to checkout.
    pub fn checkout_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether shipping is waived.
    pub fn is_free_shipping(&self) -> bool {
        self.shipping_fee.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
