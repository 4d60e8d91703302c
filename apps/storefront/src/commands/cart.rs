//! # Cart Commands
//!
//! Cart manipulation and the order summary.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  cart add   ┌──────────┐  summary --select  ┌──────────┐  │
//! │  │  Empty   │────────────►│ In Cart  │───────────────────►│ Summary  │  │
//! │  │  Cart    │             │          │   summary --all    │ (totals) │  │
//! │  └──────────┘             └──────────┘                    └──────────┘  │
//! │       ▲                    │  cart set / inc / dec / remove             │
//! │       │                    ▼                                            │
//! │       └──────────────── cart clear                                      │
//! │                                                                         │
//! │  Lines survive between runs; the selection lives for one command.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::state::CartStore;
use storefront_catalog::Catalog;
use storefront_core::format::{format_price, truncate_text};
use storefront_core::validation::parse_product_id;
use storefront_core::{Cart, CartLine, CartTotals, OrderSummary, QuantityPicker, QuantityStep};

const CART_TITLE_WIDTH: usize = 30;

// =============================================================================
// Responses
// =============================================================================

/// Cart lines plus totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: cart.totals(),
        }
    }
}

impl fmt::Display for CartResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return write!(f, "Your cart is empty.");
        }

        for line in &self.lines {
            writeln!(
                f,
                "{:>4}  {:<33}  {:>9} x {:<4} {:>10}",
                line.id(),
                truncate_text(&line.product.title, CART_TITLE_WIDTH),
                format_price(line.product.price),
                line.quantity,
                format_price(line.subtotal()),
            )?;
        }
        write!(
            f,
            "{} items ({} units)  Total: {}",
            self.totals.line_count,
            self.totals.total_quantity,
            format_price(self.totals.total_price)
        )
    }
}

/// Order summary over the selected lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub checkout_count: usize,
    pub free_shipping: bool,
}

impl From<OrderSummary> for SummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        SummaryResponse {
            checkout_count: summary.checkout_count(),
            free_shipping: summary.is_free_shipping(),
            summary,
        }
    }
}

impl fmt::Display for SummaryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        if !s.has_selection() {
            return write!(
                f,
                "No items selected. Use --select <id> or --all to pick items for checkout."
            );
        }

        writeln!(f, "Order Summary")?;
        for line in &s.lines {
            writeln!(
                f,
                "  {:<33} x {:<4} {:>10}",
                truncate_text(&line.title, CART_TITLE_WIDTH),
                line.quantity,
                format_price(line.line_subtotal)
            )?;
        }
        writeln!(
            f,
            "  Items ({}):{:>30}",
            s.selected_total_quantity,
            format_price(s.subtotal)
        )?;
        writeln!(f, "  Tax:{:>38}", format_price(s.tax))?;
        let shipping = if self.free_shipping {
            "FREE".to_string()
        } else {
            format_price(s.shipping_fee)
        };
        writeln!(f, "  Shipping:{:>33}", shipping)?;
        writeln!(f, "  Total:{:>36}", format_price(s.grand_total))?;
        write!(f, "Checkout ({})", self.checkout_count)
    }
}

// =============================================================================
// Commands
// =============================================================================

/// `storefront cart show`
pub fn show_cart(store: &CartStore) -> CartResponse {
    CartResponse::from(store.cart())
}

/// `storefront cart add <id> [--quantity N]`
///
/// ## Behavior
/// - The product is looked up in the catalog first
/// - `N` goes through the quantity picker: values below one become one
/// - `N == 1` adds one unit; any other `N` sets the line to `N`
pub async fn add_to_cart(
    store: &mut CartStore,
    catalog: &dyn Catalog,
    raw_id: &str,
    quantity: i64,
) -> AppResult<CartResponse> {
    let id = parse_product_id(raw_id)?;
    let product = catalog
        .product(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", &id.to_string()))?;

    let mut picker = QuantityPicker::default();
    picker.set(quantity);

    debug!(product_id = %id, quantity = picker.value(), "add_to_cart command");
    store.add_with_quantity(&product, picker.value());

    Ok(show_cart(store))
}

/// `storefront cart remove <id>`
pub fn remove_from_cart(store: &mut CartStore, raw_id: &str) -> AppResult<CartResponse> {
    let id = parse_product_id(raw_id)?;
    store.remove_from_cart(id);
    Ok(show_cart(store))
}

/// `storefront cart set <id> <qty>`; zero or less removes the line.
pub fn set_quantity(store: &mut CartStore, raw_id: &str, quantity: i64) -> AppResult<CartResponse> {
    let id = parse_product_id(raw_id)?;
    store.update_quantity(id, quantity);
    Ok(show_cart(store))
}

/// `storefront cart inc <id>` / `storefront cart dec <id>`
pub fn step_quantity(
    store: &mut CartStore,
    raw_id: &str,
    step: QuantityStep,
) -> AppResult<CartResponse> {
    let id = parse_product_id(raw_id)?;
    store.step_quantity(id, step);
    Ok(show_cart(store))
}

/// `storefront cart clear`
pub fn clear_cart(store: &mut CartStore) -> CartResponse {
    store.clear_cart();
    show_cart(store)
}

/// `storefront summary [--select <id>...] [--all]`
///
/// Selection only lasts for this command; it is never stored.
pub fn summary(store: &mut CartStore, select: &[String], all: bool) -> AppResult<SummaryResponse> {
    let ids = select
        .iter()
        .map(|raw| parse_product_id(raw))
        .collect::<Result<Vec<_>, _>>()?;

    if all {
        store.select_all_items();
    }
    for id in ids {
        store.select_item(id);
    }

    Ok(SummaryResponse::from(store.summary()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::tests::FakeCatalog;
    use crate::error::ErrorCode;
    use std::sync::Arc;
    use storefront_core::{MemorySink, Money, ProductId, SummaryPolicy};

    fn store() -> CartStore {
        CartStore::new(Arc::new(MemorySink::new()), SummaryPolicy::default())
    }

    #[tokio::test]
    async fn test_add_with_quantity_sets_line() {
        let mut store = store();

        add_to_cart(&mut store, &FakeCatalog, "1", 1).await.unwrap();
        add_to_cart(&mut store, &FakeCatalog, "1", 1).await.unwrap();
        let response = add_to_cart(&mut store, &FakeCatalog, "2", 3).await.unwrap();

        assert_eq!(response.totals.line_count, 2);
        assert_eq!(response.totals.total_quantity, 5);
        assert_eq!(store.cart().line(ProductId(1)).unwrap().quantity, 2);
        assert_eq!(store.cart().line(ProductId(2)).unwrap().quantity, 3);

        // picker clamps non-positive quantities to one
        add_to_cart(&mut store, &FakeCatalog, "2", 0).await.unwrap();
        assert_eq!(store.cart().line(ProductId(2)).unwrap().quantity, 4);
    }

    #[tokio::test]
    async fn test_add_errors() {
        let mut store = store();

        let err = add_to_cart(&mut store, &FakeCatalog, "x1", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_to_cart(&mut store, &FakeCatalog, "42", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&mut store, &FakeCatalog, "99", 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);

        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_line_edits() {
        let mut store = store();
        add_to_cart(&mut store, &FakeCatalog, "1", 1).await.unwrap();
        add_to_cart(&mut store, &FakeCatalog, "2", 1).await.unwrap();

        step_quantity(&mut store, "1", QuantityStep::Increment).unwrap();
        assert_eq!(store.cart().line(ProductId(1)).unwrap().quantity, 2);

        step_quantity(&mut store, "2", QuantityStep::Decrement).unwrap();
        assert!(store.cart().line(ProductId(2)).is_none());

        set_quantity(&mut store, "1", -3).unwrap();
        assert!(store.cart().is_empty());

        add_to_cart(&mut store, &FakeCatalog, "1", 1).await.unwrap();
        let response = remove_from_cart(&mut store, "1").unwrap();
        assert_eq!(response.to_string(), "Your cart is empty.");

        assert!(remove_from_cart(&mut store, "").is_err());
    }

    #[tokio::test]
    async fn test_cart_text() {
        let mut store = store();
        add_to_cart(&mut store, &FakeCatalog, "1", 2).await.unwrap();

        let text = show_cart(&store).to_string();
        assert!(text.contains("$219.90"));
        assert!(text.ends_with("1 items (2 units)  Total: $219.90"));

        let cleared = clear_cart(&mut store);
        assert!(cleared.lines.is_empty());
        assert_eq!(cleared.totals.total_price, Money::zero());
    }

    #[tokio::test]
    async fn test_summary_selection() {
        let mut store = store();
        add_to_cart(&mut store, &FakeCatalog, "2", 1).await.unwrap();
        add_to_cart(&mut store, &FakeCatalog, "1", 1).await.unwrap();

        let none = summary(&mut store, &[], false).unwrap();
        assert_eq!(none.checkout_count, 0);
        assert!(none.to_string().starts_with("No items selected"));

        // T-shirt only: 22.30 + 2.007 tax + 1.99 shipping
        let one = summary(&mut store, &["2".to_string()], false).unwrap();
        assert_eq!(one.checkout_count, 1);
        assert!(!one.free_shipping);
        assert_eq!(one.summary.grand_total.to_string(), "$26.30");
        assert!(one.to_string().ends_with("Checkout (1)"));

        let all = summary(&mut store, &[], true).unwrap();
        assert_eq!(all.checkout_count, 2);
        assert!(all.free_shipping);
        assert!(all.to_string().contains("FREE"));

        assert!(summary(&mut store, &["two".to_string()], false).is_err());
    }

    #[tokio::test]
    async fn test_summary_json_is_flat() {
        let mut store = store();
        add_to_cart(&mut store, &FakeCatalog, "1", 1).await.unwrap();

        let response = summary(&mut store, &[], true).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["checkoutCount"], 1);
        assert_eq!(json["freeShipping"], true);
        assert!(json["grandTotal"].is_number());
    }
}
