//! # Catalog Error Types
//!
//! Errors raised while talking to the remote catalog.
//!
//! "Not found" is not an error: lookups return `Ok(None)` for it.

use storefront_core::ValidationError;
use thiserror::Error;

/// Catalog access errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured base URL is unusable.
    #[error("Invalid catalog URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request could not be sent or the response could not be read.
    ///
    /// ## When This Occurs
    /// - Network unreachable / DNS failure
    /// - Timeout
    /// - Connection reset mid-body
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status other than 404.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The body was not the expected JSON shape.
    #[error("Catalog response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body decoded but the product breaks a domain rule.
    #[error("Catalog returned an invalid product: {0}")]
    Invalid(#[from] ValidationError),
}

impl CatalogError {
    /// Whether the catalog didn't answer within the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CatalogError::Http(e) if e.is_timeout())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
