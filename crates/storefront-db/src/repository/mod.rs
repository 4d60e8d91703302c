//! # Repositories
//!
//! Data access over the SQLite pool. The storefront keeps a single
//! key/value table mirroring browser local storage; the cart document
//! lives under its fixed key.

pub mod storage;
