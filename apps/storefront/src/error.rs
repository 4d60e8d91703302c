//! # App Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  ValidationError (core) ──┐                                             │
//! │  DbError (db) ────────────┤                                             │
//! │  CatalogError (catalog) ──┼──► AppError { code, message }               │
//! │  ConfigError (app) ───────┘          │                                  │
//! │                                      ├── text:  "error: <message>"      │
//! │                                      └── --json: {"code": "...", ...}   │
//! │                                                                         │
//! │  Cart operations never produce errors: persistence failures are        │
//! │  logged where they happen and the command still succeeds.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::state::ConfigError;
use storefront_catalog::CatalogError;
use storefront_core::ValidationError;
use storefront_db::DbError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product (or other resource) not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Local storage failed
    DatabaseError,

    /// Catalog unreachable or returned garbage
    CatalogError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts storage errors; details go to the log, not the user.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Could not open local storage")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Local storage migration failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Local storage is busy")
            }
            other => {
                tracing::error!("Database error: {}", other);
                AppError::new(ErrorCode::DatabaseError, "Local storage operation failed")
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidUrl { .. } => AppError::new(ErrorCode::ConfigError, err.to_string()),
            ref e if e.is_timeout() => {
                tracing::warn!("Catalog timed out: {}", e);
                AppError::new(ErrorCode::CatalogError, "The catalog did not respond in time")
            }
            other => AppError::new(ErrorCode::CatalogError, other.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Failed to encode output: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let err = AppError::not_found("Product", "42");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }

    #[test]
    fn test_conversions() {
        let err: AppError = ValidationError::Required {
            field: "id".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: AppError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));

        let err: AppError = CatalogError::Status {
            status: 503,
            url: "http://catalog/products".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::CatalogError);

        let err: AppError = ConfigError::Invalid("bad".to_string()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
