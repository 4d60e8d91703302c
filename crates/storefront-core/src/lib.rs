//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart and
//! checkout logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (CLI, web via ts-rs types)            │   │
//! │  │    Product list ──► Product detail ──► Cart ──► Order summary   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              CartStore (apps/storefront)                         │   │
//! │  │    operations ──► persist snapshot ──► notify subscribers        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  summary  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Order-   │  │   │
//! │  │   │  Rating   │  │  TaxRate  │  │ CartLine  │  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                 │ CartSink trait                 ▲ Product values       │
//! │  ┌──────────────▼──────────────┐   ┌─────────────┴──────────────────┐  │
//! │  │ storefront-db (SQLite)      │   │ storefront-catalog (HTTP)      │  │
//! │  └─────────────────────────────┘   └────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, ProductId, Rating, TaxRate
//! - [`money`] - Exact decimal money, rounded only for display
//! - [`cart`] - The cart aggregate and its operations
//! - [`quantity`] - +/- stepper and quantity picker helpers
//! - [`summary`] - Checkout totals over the selected lines
//! - [`persist`] - Persisted cart shape and the `CartSink` seam
//! - [`format`] - Text helpers for prices, ratings, titles
//! - [`validation`] - Edge validation (ids, catalog payloads)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, OrderSummary, Product, ProductId, Rating, SummaryPolicy};
//!
//! let backpack = Product {
//!     id: ProductId(1),
//!     title: "Backpack".to_string(),
//!     price: Money::from_cents(2999),
//!     description: String::new(),
//!     category: "bags".to_string(),
//!     image: String::new(),
//!     rating: Rating { rate: 4.5, count: 10 },
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_to_cart(&backpack);
//! cart.add_to_cart(&backpack);
//! cart.select_all_items();
//!
//! let summary = OrderSummary::compute(&cart, &SummaryPolicy::default());
//! assert_eq!(summary.subtotal.to_string(), "$59.98");
//! assert_eq!(summary.tax.to_string(), "$5.40");
//! assert_eq!(summary.grand_total.to_string(), "$65.38");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod format;
pub mod money;
pub mod persist;
pub mod quantity;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{PersistError, ValidationError};
pub use money::Money;
pub use persist::{CartSink, MemorySink, PersistedCart, CART_STORAGE_KEY};
pub use quantity::{QuantityPicker, QuantityStep};
pub use summary::{OrderSummary, SummaryLine, SummaryPolicy};
pub use types::*;
