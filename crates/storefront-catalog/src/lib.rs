//! # storefront-catalog: Remote Product Catalog
//!
//! Everything the storefront knows about products comes through here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  `storefront products` / `storefront product 3`                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_products / load_product_detail  ──► FetchState / ProductDetail   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CachedCatalog (TTL 60 s)                                              │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  HttpCatalog ── GET {base}/products[/{id}] ──► catalog API             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - `Catalog` trait and the reqwest implementation
//! - [`cache`] - TTL cache wrapper
//! - [`state`] - Loading / loaded / failed states for pages
//! - [`error`] - Catalog error types

pub mod cache;
pub mod client;
pub mod error;
pub mod state;

pub use cache::{CachedCatalog, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
pub use client::{Catalog, HttpCatalog, DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT};
pub use error::{CatalogError, CatalogResult};
pub use state::{load_product_detail, load_products, FetchState, ProductDetail};
