//! # State Module
//!
//! Application state built once at startup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │   CartStore                  │   │   StorefrontConfig           │   │
//! │  │                              │   │                              │   │
//! │  │  Cart (storefront-core)      │   │  [catalog] url, timeout, ttl │   │
//! │  │  Arc<dyn CartSink>           │   │  [storage] database_path     │   │
//! │  │  watch::Sender<Cart>         │   │  [summary] tax, shipping     │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • CartStore: single owner, mutated through &mut self                  │
//! │  • StorefrontConfig: read-only after load                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartStore;
pub use config::{
    CatalogSettings, ConfigError, ConfigResult, StorageSettings, StorefrontConfig,
    SummarySettings,
};
