//! # Background Cart Writer
//!
//! Bridges the synchronous [`CartSink`] seam to async SQLite writes.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Write-Behind Persistence                             │
//! │                                                                         │
//! │  CartStore op ──► CartWriter::persist(snapshot)                         │
//! │                       │  watch::Sender::send (never blocks)             │
//! │                       ▼                                                 │
//! │               ┌───────────────┐                                         │
//! │               │ watch channel │  holds only the newest snapshot         │
//! │               └───────┬───────┘                                         │
//! │                       ▼                                                 │
//! │  writer task ──► LocalStorageRepository::save_cart ──► SQLite           │
//! │                       │                                                 │
//! │                       └── error? tracing::warn! and wait for the next   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Snapshots that arrive while a write is in flight collapse into one: the
//! store only ever needs the latest cart.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::repository::storage::LocalStorageRepository;
use storefront_core::{CartSink, PersistError, PersistedCart};

/// [`CartSink`] that hands snapshots to a background SQLite writer.
#[derive(Debug)]
pub struct CartWriter {
    tx: watch::Sender<Option<PersistedCart>>,
}

/// Handle to the writer task; await [`WriterTask::finish`] after dropping
/// every [`CartWriter`] to make sure the last snapshot hit the disk.
#[derive(Debug)]
pub struct WriterTask {
    handle: JoinHandle<()>,
}

impl CartWriter {
    /// Spawns the writer task on the current tokio runtime.
    pub fn spawn(storage: LocalStorageRepository) -> (CartWriter, WriterTask) {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(run_writer(storage, rx));

        (CartWriter { tx }, WriterTask { handle })
    }
}

impl CartSink for CartWriter {
    fn persist(&self, snapshot: &PersistedCart) -> Result<(), PersistError> {
        self.tx
            .send(Some(snapshot.clone()))
            .map_err(|_| PersistError::Unavailable("cart writer has stopped".to_string()))
    }
}

impl WriterTask {
    /// Waits until the writer has flushed its final snapshot and exited.
    ///
    /// Only returns once every [`CartWriter`] for this task is dropped.
    pub async fn finish(self) {
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Cart writer task ended abnormally");
        }
    }
}

async fn run_writer(
    storage: LocalStorageRepository,
    mut rx: watch::Receiver<Option<PersistedCart>>,
) {
    debug!("Cart writer started");

    // changed() reports a pending value before reporting a closed channel,
    // so the last snapshot sent before shutdown is still written.
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        let Some(snapshot) = snapshot else {
            continue;
        };

        match storage.save_cart(&snapshot).await {
            Ok(()) => debug!(
                lines = snapshot.line_count,
                quantity = snapshot.total_quantity,
                "Cart persisted"
            ),
            Err(e) => warn!(error = %e, "Failed to persist cart"),
        }
    }

    debug!("Cart writer stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use storefront_core::{Cart, Money, Product, ProductId, Rating};

    fn product(id: u64, cents: i64) -> Product {
        Product {
            id: ProductId(id),
            title: format!("Product {}", id),
            price: Money::from_cents(cents),
            description: String::new(),
            category: "test".to_string(),
            image: String::new(),
            rating: Rating { rate: 3.0, count: 2 },
        }
    }

    #[tokio::test]
    async fn test_last_snapshot_is_written_on_finish() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (writer, task) = CartWriter::spawn(db.local_storage());

        let mut cart = Cart::new();
        for id in 1..=3 {
            cart.add_to_cart(&product(id, 100 * id as i64));
            writer.persist(&cart.to_persisted()).unwrap();
        }

        drop(writer);
        task.finish().await;

        let saved = db.local_storage().load_cart().await.unwrap().unwrap();
        assert_eq!(saved, cart.to_persisted());
        assert_eq!(saved.line_count, 3);
    }

    #[tokio::test]
    async fn test_persist_after_task_stopped_reports_unavailable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (writer, task) = CartWriter::spawn(db.local_storage());
        task.handle.abort();
        let _ = task.handle.await;

        let err = writer.persist(&PersistedCart::default()).unwrap_err();
        assert!(matches!(err, PersistError::Unavailable(_)));
    }
}
