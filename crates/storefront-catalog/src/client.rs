//! # Catalog Client
//!
//! The [`Catalog`] trait is the seam between the app and wherever products
//! come from. [`HttpCatalog`] is the production implementation.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {base}/products        → 200 [Product, ...]                        │
//! │  GET {base}/products/{id}   → 200 Product                               │
//! │                             → 200 null / empty body  ─┐                 │
//! │                             → 404                    ─┴► Ok(None)       │
//! │                             → other non-2xx          ──► Err(Status)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};
use storefront_core::validation::validate_product;
use storefront_core::{Product, ProductId};

/// Public demo catalog the storefront talks to by default.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read access to the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every product, in catalog order.
    async fn all_products(&self) -> CatalogResult<Vec<Product>>;

    /// One product; `Ok(None)` when the catalog has no such id.
    async fn product(&self, id: ProductId) -> CatalogResult<Option<Product>>;
}

// =============================================================================
// HTTP Catalog
// =============================================================================

/// [`Catalog`] backed by the catalog's JSON HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a client for `base_url` with the given request timeout.
    ///
    /// Only `http` and `https` URLs are accepted.
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base = parse_base_url(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(HttpCatalog {
            http,
            base_url: base,
        })
    }

    /// The base URL requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn all_products(&self) -> CatalogResult<Vec<Product>> {
        let url = self.endpoint("products");
        debug!(url = %url, "Fetching product list");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let products: Vec<Product> = serde_json::from_slice(&body)?;

        // One bad entry shouldn't take the whole listing down
        let total = products.len();
        let valid: Vec<Product> = products
            .into_iter()
            .filter(|product| match validate_product(product) {
                Ok(()) => true,
                Err(e) => {
                    warn!(product_id = %product.id, error = %e, "Skipping invalid catalog product");
                    false
                }
            })
            .collect();

        debug!(total, valid = valid.len(), "Product list fetched");
        Ok(valid)
    }

    async fn product(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        let url = self.endpoint(&format!("products/{}", id));
        debug!(product_id = %id, url = %url, "Fetching product");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(product_id = %id, "Product not found (404)");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!(product_id = %id, "Product not found (empty body)");
            return Ok(None);
        }

        // `null` decodes to None
        let product: Option<Product> = serde_json::from_slice(&body)?;
        if let Some(product) = &product {
            validate_product(product)?;
        }

        Ok(product)
    }
}

fn parse_base_url(raw: &str) -> CatalogResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| CatalogError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CatalogError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
