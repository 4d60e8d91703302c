//! # Cart Store
//!
//! The single owner of the shopper's cart for the lifetime of the process.
//!
//! ## Operation Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every CartStore Operation                            │
//! │                                                                         │
//! │  store.add_to_cart(&product)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::add_to_cart ──► totals recomputed (storefront-core)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sink.persist(cart.to_persisted())  ── Err? warn!, carry on            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  watch::Sender::send_replace(cart.clone()) ──► subscribers             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Operations take `&mut self`: one owner, no interior locking. The store
//! is built once at startup from whatever local storage held and passed
//! explicitly to the command that needs it.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use storefront_core::{
    Cart, CartSink, OrderSummary, PersistedCart, Product, ProductId, QuantityStep, SummaryPolicy,
};

/// Cart container wiring the pure [`Cart`] to persistence and observers.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    policy: SummaryPolicy,
    sink: Arc<dyn CartSink>,
    updates: watch::Sender<Cart>,
}

impl CartStore {
    /// Creates a store around an empty cart.
    pub fn new(sink: Arc<dyn CartSink>, policy: SummaryPolicy) -> Self {
        Self::with_cart(Cart::new(), sink, policy)
    }

    /// Creates a store from the snapshot found in local storage, if any.
    ///
    /// Selection always starts empty.
    pub fn rehydrate(
        snapshot: Option<PersistedCart>,
        sink: Arc<dyn CartSink>,
        policy: SummaryPolicy,
    ) -> Self {
        let cart = snapshot.map(Cart::from_persisted).unwrap_or_default();
        debug!(
            lines = cart.line_count(),
            quantity = cart.total_quantity(),
            "Cart rehydrated"
        );
        Self::with_cart(cart, sink, policy)
    }

    fn with_cart(cart: Cart, sink: Arc<dyn CartSink>, policy: SummaryPolicy) -> Self {
        let (updates, _) = watch::channel(cart.clone());
        CartStore {
            cart,
            policy,
            sink,
            updates,
        }
    }

    // =========================================================================
    // Read Views
    // =========================================================================

    /// Current cart state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Checkout totals over the current selection.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::compute(&self.cart, &self.policy)
    }

    /// Receiver that sees the cart after every completed operation.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.updates.subscribe()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add_to_cart(product);
        debug!(product_id = %product.id, "Added to cart");
        self.commit();
    }

    /// Adds with a picked quantity (sets the line to `quantity` unless it is 1).
    pub fn add_with_quantity(&mut self, product: &Product, quantity: i64) {
        self.cart.add_with_quantity(product, quantity);
        debug!(product_id = %product.id, quantity, "Added to cart with quantity");
        self.commit();
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove_from_cart(id);
        debug!(product_id = %id, "Removed from cart");
        self.commit();
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        self.cart.update_quantity(id, quantity);
        debug!(product_id = %id, quantity, "Quantity updated");
        self.commit();
    }

    /// +/- on a line.
    pub fn step_quantity(&mut self, id: ProductId, step: QuantityStep) {
        self.cart.step_quantity(id, step);
        debug!(product_id = %id, ?step, "Quantity stepped");
        self.commit();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
        debug!("Cart cleared");
        self.commit();
    }

    pub fn select_item(&mut self, id: ProductId) {
        self.cart.select_item(id);
        self.commit();
    }

    pub fn deselect_item(&mut self, id: ProductId) {
        self.cart.deselect_item(id);
        self.commit();
    }

    pub fn select_all_items(&mut self) {
        self.cart.select_all_items();
        self.commit();
    }

    pub fn clear_selection(&mut self) {
        self.cart.clear_selection();
        self.commit();
    }

    pub fn toggle_item_selection(&mut self, id: ProductId) {
        self.cart.toggle_item_selection(id);
        self.commit();
    }

    /// Persists the new state (best effort) and notifies subscribers.
    fn commit(&mut self) {
        if let Err(e) = self.sink.persist(&self.cart.to_persisted()) {
            warn!(error = %e, "Cart change not persisted");
        }
        self.updates.send_replace(self.cart.clone());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
