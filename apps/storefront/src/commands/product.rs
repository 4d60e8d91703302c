//! # Product Commands
//!
//! Listing and detail views over the catalog.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{AppError, AppResult};
use storefront_catalog::{load_product_detail, load_products, Catalog, FetchState, ProductDetail};
use storefront_core::format::{
    capitalize_first_letter, format_price, format_rating, star_bar, truncate_text,
};
use storefront_core::Product;

/// Titles longer than this are cut in the listing.
const LIST_TITLE_WIDTH: usize = 30;

/// Home page listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

impl fmt::Display for ProductListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for product in &self.products {
            writeln!(
                f,
                "{:>4}  {:<33}  {:>9}  {} {}  {}",
                product.id,
                truncate_text(&product.title, LIST_TITLE_WIDTH),
                format_price(product.price),
                star_bar(product.rating.rate),
                format_rating(product.rating.rate),
                capitalize_first_letter(&product.category),
            )?;
        }
        write!(f, "Showing {} products", self.products.len())
    }
}

/// Detail page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: Product,
}

impl fmt::Display for ProductDetailResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.product;
        writeln!(f, "{}", p.title)?;
        writeln!(f, "{}", capitalize_first_letter(&p.category))?;
        writeln!(f, "{}", format_price(p.price))?;
        writeln!(
            f,
            "{} {} ({} reviews)",
            star_bar(p.rating.rate),
            format_rating(p.rating.rate),
            p.rating.count
        )?;
        if !p.description.is_empty() {
            writeln!(f)?;
            write!(f, "{}", p.description)?;
        }
        Ok(())
    }
}

/// `storefront products`
pub async fn list_products(catalog: &dyn Catalog) -> AppResult<ProductListResponse> {
    match load_products(catalog).await {
        FetchState::Loaded(products) => {
            debug!(count = products.len(), "Listing products");
            Ok(ProductListResponse { products })
        }
        FetchState::Failed(e) => Err(e.into()),
        FetchState::Loading => Err(AppError::internal("Catalog request did not complete")),
    }
}

/// `storefront product <id>`
pub async fn product_detail(catalog: &dyn Catalog, raw_id: &str) -> AppResult<ProductDetailResponse> {
    match load_product_detail(catalog, raw_id).await {
        ProductDetail::Found(product) => Ok(ProductDetailResponse { product }),
        ProductDetail::NotFound => Err(AppError::not_found("Product", raw_id.trim())),
        ProductDetail::InvalidId(id) => {
            Err(AppError::validation(format!("Invalid product id '{}'", id)))
        }
        ProductDetail::Failed(e) => Err(e.into()),
        ProductDetail::Loading => Err(AppError::internal("Catalog request did not complete")),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use std::time::Duration;
    use storefront_catalog::{CatalogError, CatalogResult, HttpCatalog};
    use storefront_core::{Money, ProductId, Rating};

    pub(crate) fn product(id: u64, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId(id),
            title: title.to_string(),
            price: Money::from_cents(cents),
            description: "Fits 15 inch laptops".to_string(),
            category: "men's clothing".to_string(),
            image: String::new(),
            rating: Rating { rate: 3.9, count: 120 },
        }
    }

    /// In-process catalog with two products; id 99 fails.
    #[derive(Debug)]
    pub(crate) struct FakeCatalog;

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn all_products(&self) -> CatalogResult<Vec<Product>> {
            Ok(vec![
                product(1, "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops", 10995),
                product(2, "Mens Casual Premium Slim Fit T-Shirts", 2230),
            ])
        }

        async fn product(&self, id: ProductId) -> CatalogResult<Option<Product>> {
            if id.get() == 99 {
                return Err(CatalogError::Status {
                    status: 500,
                    url: "fake".to_string(),
                });
            }
            Ok(self
                .all_products()
                .await?
                .into_iter()
                .find(|p| p.id == id))
        }
    }

    #[tokio::test]
    async fn test_list_products_text() {
        let response = list_products(&FakeCatalog).await.unwrap();
        let text = response.to_string();

        assert!(text.contains("Fjallraven - Foldsack No. 1 Ba..."));
        assert!(text.contains("$109.95"));
        assert!(text.contains("★★★☆☆ 3.9"));
        assert!(text.contains("Men's clothing"));
        assert!(text.ends_with("Showing 2 products"));
    }

    #[tokio::test]
    async fn test_product_detail_outcomes() {
        let found = product_detail(&FakeCatalog, "2").await.unwrap();
        assert!(found.to_string().contains("(120 reviews)"));

        let err = product_detail(&FakeCatalog, "7").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = product_detail(&FakeCatalog, "seven").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = product_detail(&FakeCatalog, "99").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(err.message.contains("500"));
    }

    #[tokio::test]
    async fn test_unresponsive_catalog_reports_timeout() {
        // accepts connections but never answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let catalog = HttpCatalog::new(&base, Duration::from_millis(200)).unwrap();

        let err = product_detail(&catalog, "1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert_eq!(err.message, "The catalog did not respond in time");

        let err = list_products(&catalog).await.unwrap_err();
        assert_eq!(err.message, "The catalog did not respond in time");
        drop(listener);
    }
}
