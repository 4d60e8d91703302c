//! # storefront-db: Durable Storage for the Storefront
//!
//! SQLite-backed local storage with sqlx. The cart survives restarts by
//! being written here after every change.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CartStore (add / remove / update / clear)                             │
//! │       │ CartSink::persist(snapshot)                                    │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────────┐   ┌────────────┐  │   │
//! │  │   │  CartWriter   │──►│ LocalStorageRepo   │   │ Migrations │  │   │
//! │  │   │ (writer.rs)   │   │ (storage.rs)       │   │ (embedded) │  │   │
//! │  │   └───────────────┘   └─────────┬──────────┘   └────────────┘  │   │
//! │  │                                 │                               │   │
//! │  │   ┌───────────────┐             │                               │   │
//! │  │   │   Database    │◄────────────┘                               │   │
//! │  │   │   (pool.rs)   │                                             │   │
//! │  │   └───────────────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file in the platform data dir (storefront.db)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key/value local storage
//! - [`writer`] - Background writer implementing `CartSink`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{CartWriter, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/storefront.db")).await?;
//! let saved = db.local_storage().load_cart().await?;
//!
//! let (writer, task) = CartWriter::spawn(db.local_storage());
//! // ... hand `writer` to the CartStore, run, drop the store ...
//! task.finish().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::storage::LocalStorageRepository;
pub use writer::{CartWriter, WriterTask};
