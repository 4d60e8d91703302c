//! # Persistence Seam
//!
//! The shape of the cart that survives a restart, and the trait storage
//! backends implement to receive it.
//!
//! ## What Gets Persisted
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart                                   PersistedCart (key "cart")      │
//! │  ────                                   ──────────────────────────      │
//! │  lines          ───────────────────────► lines                          │
//! │  line_count     ───────────────────────► lineCount                      │
//! │  total_quantity ───────────────────────► totalQuantity                  │
//! │  total_price    ───────────────────────► totalPrice                     │
//! │  selected       ──╳ (per-session, never stored)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are best effort. A sink that fails reports a [`PersistError`];
//! callers log it and keep going.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use ts_rs::TS;

use crate::cart::CartLine;
use crate::error::PersistError;
use crate::money::Money;

/// Fixed storage key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Whitelisted subset of the cart written to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PersistedCart {
    pub lines: Vec<CartLine>,
    #[ts(type = "number")]
    pub line_count: usize,
    #[ts(type = "number")]
    pub total_quantity: u64,
    pub total_price: Money,
}

impl PersistedCart {
    /// Encodes the snapshot as the JSON document stored under
    /// [`CART_STORAGE_KEY`].
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored JSON document.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Receives a snapshot after every cart change.
///
/// Implementations must not block for long: the cart calls this inline
/// after each operation. Backends doing real I/O hand the snapshot to a
/// background writer and return immediately.
pub trait CartSink: Send + Sync + std::fmt::Debug {
    /// Stores `snapshot`, replacing whatever was stored before.
    fn persist(&self, snapshot: &PersistedCart) -> Result<(), PersistError>;
}

/// Sink that keeps the last snapshot in memory, encoded as it would be on
/// disk. Used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    stored: Mutex<Option<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Decodes the last stored snapshot, if any.
    pub fn load(&self) -> Result<Option<PersistedCart>, PersistError> {
        let stored = self
            .stored
            .lock()
            .map_err(|_| PersistError::Unavailable("memory sink poisoned".to_string()))?;

        stored.as_deref().map(PersistedCart::from_json).transpose()
    }
}

impl CartSink for MemorySink {
    fn persist(&self, snapshot: &PersistedCart) -> Result<(), PersistError> {
        let json = snapshot.to_json()?;
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| PersistError::Unavailable("memory sink poisoned".to_string()))?;
        *stored = Some(json);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_product;
    use crate::cart::Cart;

    #[test]
    fn test_json_shape_uses_camel_case_and_omits_selection() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 2999));
        cart.select_all_items();

        let json = cart.to_persisted().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["lineCount"], 1);
        assert_eq!(value["totalQuantity"], 1);
        assert_eq!(value["totalPrice"], 29.99);
        assert_eq!(value["lines"][0]["product"]["id"], 1);
        assert!(value.get("selected").is_none());
    }

    #[test]
    fn test_memory_sink_round_trip() {
        let sink = MemorySink::new();
        assert!(sink.load().unwrap().is_none());

        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 2999));
        cart.add_to_cart(&test_product(2, 4999));
        sink.persist(&cart.to_persisted()).unwrap();

        let restored = sink.load().unwrap().unwrap();
        assert_eq!(restored, cart.to_persisted());
    }
}
