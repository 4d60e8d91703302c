//! # Catalog Cache
//!
//! Wraps any [`Catalog`] and remembers answers for a fixed time, so moving
//! between the listing and detail pages doesn't refetch.
//!
//! ```text
//! product(id) ──► in moka cache (younger than ttl)? ──yes──► cached answer
//!                          │ no
//!                          ▼
//!                  inner.product(id) ──► insert (including "not found")
//! ```
//!
//! Errors are never cached. A fresh listing also seeds the detail entries.
//! Expired entries are evicted by moka, and the detail cache is bounded by
//! its capacity.

use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::client::Catalog;
use crate::error::CatalogResult;
use storefront_core::{Product, ProductId};

/// Default lifetime of a cached answer.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Default number of product detail answers kept.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// TTL cache in front of another catalog.
#[derive(Debug)]
pub struct CachedCatalog<C> {
    inner: C,
    listing: Cache<(), Vec<Product>>,
    details: Cache<ProductId, Option<Product>>,
}

impl<C: Catalog> CachedCatalog<C> {
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self::with_capacity(inner, ttl, DEFAULT_CACHE_CAPACITY)
    }

    /// Same as [`CachedCatalog::new`] with an explicit bound on detail entries.
    pub fn with_capacity(inner: C, ttl: Duration, max_details: u64) -> Self {
        CachedCatalog {
            inner,
            listing: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            details: Cache::builder()
                .max_capacity(max_details)
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<C: Catalog> Catalog for CachedCatalog<C> {
    async fn all_products(&self) -> CatalogResult<Vec<Product>> {
        if let Some(products) = self.listing.get(&()).await {
            debug!("Product list served from cache");
            return Ok(products);
        }

        let products = self.inner.all_products().await?;

        for product in &products {
            self.details.insert(product.id, Some(product.clone())).await;
        }
        self.listing.insert((), products.clone()).await;

        Ok(products)
    }

    async fn product(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        if let Some(answer) = self.details.get(&id).await {
            debug!(product_id = %id, "Product served from cache");
            return Ok(answer);
        }

        let product = self.inner.product(id).await?;
        self.details.insert(id, product.clone()).await;

        Ok(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
