//! # Fetch States
//!
//! What a page shows while catalog data is in flight. Failures and misses
//! are ordinary states, never panics.
//!
//! ## Product Detail Flow
//! ```text
//! raw route id ──► parse_product_id ──✗──► InvalidId  (redirect to listing)
//!                        │
//!                        ✓
//!                        ▼
//!                  Catalog::product ──► Ok(Some) ──► Found(product)
//!                                   ──► Ok(None) ──► NotFound
//!                                   ──► Err(e)   ──► Failed(e)
//! ```

use tracing::warn;

use crate::client::Catalog;
use crate::error::{CatalogError, CatalogResult};
use storefront_core::validation::parse_product_id;
use storefront_core::Product;

/// Lifecycle of an asynchronous catalog read.
#[derive(Debug)]
pub enum FetchState<T> {
    /// Request in flight.
    Loading,
    /// Data arrived.
    Loaded(T),
    /// Request failed.
    Failed(CatalogError),
}

impl<T> FetchState<T> {
    /// Maps a finished request onto a state.
    pub fn from_result(result: CatalogResult<T>) -> Self {
        match result {
            Ok(value) => FetchState::Loaded(value),
            Err(e) => {
                warn!(error = %e, timeout = e.is_timeout(), "Catalog request failed");
                FetchState::Failed(e)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Loaded(value) => FetchState::Loaded(f(value)),
            FetchState::Failed(e) => FetchState::Failed(e),
        }
    }
}

/// State of the product detail page.
#[derive(Debug)]
pub enum ProductDetail {
    /// The route id wasn't a product id; the page redirects to the listing.
    InvalidId(String),
    Loading,
    Found(Product),
    NotFound,
    Failed(CatalogError),
}

impl ProductDetail {
    /// Maps a finished lookup onto a detail state.
    pub fn from_lookup(state: FetchState<Option<Product>>) -> Self {
        match state {
            FetchState::Loading => ProductDetail::Loading,
            FetchState::Loaded(Some(product)) => ProductDetail::Found(product),
            FetchState::Loaded(None) => ProductDetail::NotFound,
            FetchState::Failed(e) => ProductDetail::Failed(e),
        }
    }

    /// The product, when one was found.
    pub fn product(&self) -> Option<&Product> {
        match self {
            ProductDetail::Found(product) => Some(product),
            _ => None,
        }
    }
}

/// Loads the home page listing.
pub async fn load_products(catalog: &dyn Catalog) -> FetchState<Vec<Product>> {
    FetchState::from_result(catalog.all_products().await)
}

/// Loads the detail page for a raw route id.
///
/// An id that doesn't parse never reaches the catalog.
pub async fn load_product_detail(catalog: &dyn Catalog, raw_id: &str) -> ProductDetail {
    let id = match parse_product_id(raw_id) {
        Ok(id) => id,
        Err(_) => return ProductDetail::InvalidId(raw_id.to_string()),
    };

    ProductDetail::from_lookup(FetchState::from_result(catalog.product(id).await))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::spawn_fake_catalog;
    use crate::client::HttpCatalog;
    use std::time::Duration;

    #[test]
    fn test_fetch_state_helpers() {
        let loading: FetchState<u32> = FetchState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.loaded(), None);

        let loaded = FetchState::Loaded(2).map(|n| n * 10);
        assert_eq!(loaded.loaded(), Some(&20));

        let failed: FetchState<u32> = FetchState::from_result(Err(CatalogError::Status {
            status: 503,
            url: "http://x/products".to_string(),
        }));
        assert!(matches!(
            failed,
            FetchState::Failed(CatalogError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_detail_states() {
        let base = spawn_fake_catalog().await;
        let catalog = HttpCatalog::new(&base, Duration::from_secs(5)).unwrap();

        let found = load_product_detail(&catalog, "1").await;
        assert_eq!(found.product().map(|p| p.title.as_str()), Some("Backpack"));

        assert!(matches!(
            load_product_detail(&catalog, "3").await,
            ProductDetail::NotFound
        ));
        assert!(matches!(
            load_product_detail(&catalog, "5").await,
            ProductDetail::Failed(CatalogError::Status { status: 500, .. })
        ));
        assert!(matches!(
            load_product_detail(&catalog, "abc").await,
            ProductDetail::InvalidId(id) if id == "abc"
        ));
    }

    #[tokio::test]
    async fn test_detail_keeps_timeout_error() {
        let base = spawn_fake_catalog().await;
        let catalog = HttpCatalog::new(&base, Duration::from_millis(200)).unwrap();

        match load_product_detail(&catalog, "8").await {
            ProductDetail::Failed(e) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_products() {
        let base = spawn_fake_catalog().await;
        let catalog = HttpCatalog::new(&base, Duration::from_secs(5)).unwrap();

        let state = load_products(&catalog).await;
        assert_eq!(state.loaded().map(Vec::len), Some(2));
    }
}
