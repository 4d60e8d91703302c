//! # Domain Types
//!
//! Catalog-facing types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Rating      │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (integer)   │   │  rate (0-5)     │   │  bps (u32)      │       │
//! │  │  title          │   │  count          │   │  900 = 9.00%    │       │
//! │  │  price (Money)  │   └─────────────────┘   └─────────────────┘       │
//! │  │  category       │                                                   │
//! │  │  image, desc    │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Products are owned by the remote catalog. The storefront never edits
//! them; a cart line simply keeps a copy of the product it was built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product.
///
/// The catalog uses small positive integers (`/products/1`). Wrapping them
/// keeps product ids from being confused with quantities in cart calls.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] pub u64);

impl ProductId {
    /// Returns the raw numeric id.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validation::parse_product_id(s)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 900 bps = 9.00% (the storefront's flat sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Aggregate shopper rating attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average rating, 0.0 to 5.0.
    pub rate: f64,

    /// Number of ratings collected.
    pub count: u32,
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by the catalog.
///
/// Field names match the catalog's JSON so responses deserialize directly:
/// ```json
/// { "id": 1, "title": "Backpack", "price": 109.95, "description": "...",
///   "category": "men's clothing", "image": "https://...",
///   "rating": { "rate": 3.9, "count": 120 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price, never negative.
    pub price: Money,

    /// Long-form description for the detail page.
    pub description: String,

    /// Category label (e.g. "electronics").
    pub category: String,

    /// Image URL.
    pub image: String,

    /// Shopper rating.
    pub rating: Rating,
}

impl Product {
    /// Price for `quantity` units of this product.
    #[inline]
    pub fn price_for(&self, quantity: u64) -> Money {
        self.price.multiply_quantity(quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(900);
        assert_eq!(rate.bps(), 900);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_product_deserializes_catalog_json() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.price.amount(), dec!(109.95));
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn test_product_accepts_integer_price() {
        let json = r#"{"id":7,"title":"Ring","price":25,"description":"",
            "category":"jewelery","image":"","rating":{"rate":4,"count":3}}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.amount(), dec!(25));
    }

    #[test]
    fn test_product_id_parses_from_str() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId(42));
        assert!("abc".parse::<ProductId>().is_err());
    }
}
