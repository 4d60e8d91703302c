//! # Validation Module
//!
//! Input validation for values entering the storefront from outside.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Route / CLI argument  ── parse_product_id ──┐                          │
//! │                                              │                          │
//! │  Catalog response      ── validate_product ──┼──► Cart operations       │
//! │                                              │    (total, never fail)   │
//! │  Persisted snapshot    ── serde shape ───────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::parse_product_id;
//!
//! assert_eq!(parse_product_id("3").unwrap().get(), 3);
//! assert!(parse_product_id("three").is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{Product, ProductId};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// Parses a product id taken from a route segment or CLI argument.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must be a non-negative integer
///
/// A detail page given an id that fails here redirects to the listing
/// instead of asking the catalog.
pub fn parse_product_id(raw: &str) -> ValidationResult<ProductId> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    raw.parse::<u64>()
        .map(ProductId)
        .map_err(|e| ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: e.to_string(),
        })
}

/// Validates a product received from the catalog.
///
/// ## Rules
/// - Title must not be blank
/// - Price must not be negative
/// - Rating must lie within 0..=5
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    let rate = product.rating.rate;
    if !(0.0..=MAX_RATING).contains(&rate) {
        return Err(ValidationError::OutOfRange {
            field: "rating.rate".to_string(),
            min: 0.0,
            max: MAX_RATING,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Rating;

    fn product() -> Product {
        Product {
            id: ProductId(1),
            title: "Test Product 1".to_string(),
            price: Money::from_cents(2999),
            description: "Test description 1".to_string(),
            category: "electronics".to_string(),
            image: "https://example.com/image1.jpg".to_string(),
            rating: Rating {
                rate: 4.5,
                count: 100,
            },
        }
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id(" 12 ").unwrap(), ProductId(12));
        assert!(matches!(
            parse_product_id(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_product_id("NaN"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_product_id("-1").is_err());
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(validate_product(&product()).is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut p = product();
        p.price = Money::from_cents(-1);
        assert!(matches!(
            validate_product(&p),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let mut p = product();
        p.rating.rate = 5.5;
        assert!(validate_product(&p).is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut p = product();
        p.title = "   ".to_string();
        assert!(validate_product(&p).is_err());
    }
}
