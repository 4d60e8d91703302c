//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── PersistError     - A cart snapshot could not be handed off        │
//! │                                                                         │
//! │  storefront-db errors        └── DbError                               │
//! │  storefront-catalog errors   └── CatalogError                          │
//! │  app errors                  └── AppError (what the CLI prints)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves are total and have no error type: unknown ids
//! are no-ops and non-positive quantities become removals.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the edges (route parameters, catalog payloads, configuration)
/// before values reach the cart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. a product id that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Persist Error
// =============================================================================

/// Failure to hand a cart snapshot to durable storage.
///
/// Never returned from a cart operation: the store logs it and carries on
/// with the in-memory state, which stays authoritative.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The storage backend is gone (writer task stopped, file unwritable).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The snapshot could not be encoded or decoded.
    #[error("Snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::OutOfRange {
            field: "rating.rate".to_string(),
            min: 0.0,
            max: 5.0,
        };
        assert_eq!(err.to_string(), "rating.rate must be between 0 and 5");
    }

    #[test]
    fn test_persist_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PersistError = json_err.into();
        assert!(matches!(err, PersistError::Encoding(_)));
    }
}
