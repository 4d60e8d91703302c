//! # Local Storage Repository
//!
//! A durable key/value store with the semantics of browser local storage:
//! string keys, string (JSON) values, last write wins.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  local_storage                                                          │
//! │  ┌──────────┬──────────────────────────────────────┬─────────────────┐  │
//! │  │ key      │ value                                │ updated_at      │  │
//! │  ├──────────┼──────────────────────────────────────┼─────────────────┤  │
//! │  │ "cart"   │ {"lines":[..],"lineCount":2,...}     │ 2024-05-01T...  │  │
//! │  └──────────┴──────────────────────────────────────┴─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{PersistedCart, CART_STORAGE_KEY};

/// Repository over the `local_storage` table.
///
/// ## Usage
/// ```rust,ignore
/// let storage = db.local_storage();
///
/// if let Some(saved) = storage.load_cart().await? {
///     let cart = Cart::from_persisted(saved);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LocalStorageRepository {
    pool: SqlitePool,
}

impl LocalStorageRepository {
    /// Creates a new LocalStorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LocalStorageRepository { pool }
    }

    /// Reads the raw value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Stored local storage value");
        Ok(())
    }

    /// Deletes `key`. Returns whether anything was removed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Cart Document
    // =========================================================================

    /// Loads the persisted cart, if one was ever saved.
    ///
    /// A document that no longer decodes is reported as
    /// [`DbError::Serialization`]; callers decide whether to start empty.
    pub async fn load_cart(&self) -> DbResult<Option<PersistedCart>> {
        let Some(json) = self.get(CART_STORAGE_KEY).await? else {
            return Ok(None);
        };

        let cart = serde_json::from_str(&json)
            .map_err(|e| DbError::serialization(CART_STORAGE_KEY, e))?;

        Ok(Some(cart))
    }

    /// Overwrites the persisted cart with `cart`.
    pub async fn save_cart(&self, cart: &PersistedCart) -> DbResult<()> {
        let json =
            serde_json::to_string(cart).map_err(|e| DbError::serialization(CART_STORAGE_KEY, e))?;

        self.set(CART_STORAGE_KEY, &json).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
