//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    29.99 × 2 = 59.980000000000004  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Decimal                                            │
//! │    29.99 × 2 = 59.98                                                    │
//! │    59.98 × 0.09 = 5.3982  (kept unrounded)                              │
//! │                                                                         │
//! │  Rounding to cents happens ONCE, when the value is displayed.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The catalog sends prices as plain JSON numbers, and the persisted cart
//! keeps that shape. `Money` reads and writes JSON numbers while computing
//! in `rust_decimal::Decimal`.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(2999); // $29.99
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.to_string(), "$59.98");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in dollars, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal, not cents**: tax is accumulated unrounded (`5.3982`) and only
///   rounded for display, so sub-cent precision has to survive arithmetic
/// - **Saturating arithmetic**: cart operations never fail, so an absurd
///   quantity saturates instead of overflowing
/// - **Display rounds**: `Display` is the only place rounding happens
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine subtotal ──► Cart.total_price
///                                   └──► OrderSummary.subtotal ──► tax ──► grand_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let fee = Money::from_cents(199);
    /// assert_eq!(fee.to_string(), "$1.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to whole cents, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    ///
    /// let tax = Money::new(Decimal::new(53982, 4)); // 5.3982
    /// assert_eq!(tax.rounded(), Money::from_cents(540));
    /// ```
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Calculates tax at the given rate, without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(5998); // $59.98
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(900));
    /// assert_eq!(tax.amount(), Decimal::new(53982, 4)); // 5.3982
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let factor = Decimal::new(i64::from(rate.bps()), 4);
        Money(self.0.saturating_mul(factor))
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_cents(5998));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money rounded to cents, e.g. `$5.40` for `5.3982`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cents = self.rounded().0;
        cents.rescale(2);
        let sign = if cents.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${}", sign, cents.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Serialized as a JSON number, the shape the catalog uses.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
