//! # Cart Aggregate
//!
//! The shopping cart: an ordered list of (product, quantity) lines, a
//! selection set used for checkout, and three derived totals.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Operation                 State Change        │
//! │  ──────────────           ─────────                 ────────────        │
//! │  Click "Add to cart" ───► add_to_cart()        ──► qty+1 or push line   │
//! │  +/- on a line ─────────► update_quantity()    ──► qty = n (≤0 removes) │
//! │  Click Remove ──────────► remove_from_cart()   ──► drop line + select   │
//! │  Empty cart ────────────► clear_cart()         ──► everything empty     │
//! │  Tick checkbox ─────────► toggle_item_selection()                       │
//! │  "Select all" ──────────► select_all_items()                            │
//! │                                                                         │
//! │  Every line-changing operation ends with recalculate()                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id and keep first-add order
//! - Every line has quantity ≥ 1 (a quantity of 0 or less removes the line)
//! - `line_count`, `total_quantity`, `total_price` always equal the fold over
//!   `lines`; nothing outside `recalculate()` writes them
//! - Removal-class operations prune the selection of the removed id

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::money::Money;
use crate::persist::PersistedCart;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart together with how many units the shopper wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Copy of the product as it was when first added.
    pub product: Product,

    /// Units in the cart, always ≥ 1.
    #[ts(type = "number")]
    pub quantity: u64,
}

impl CartLine {
    /// Product id of this line.
    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price × quantity.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.product.price_for(self.quantity)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// The derived aggregates of a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,

    /// Sum of quantities over all lines.
    pub total_quantity: u64,

    /// Sum of price × quantity over all lines.
    pub total_price: Money,
}

impl CartTotals {
    /// Folds the totals from scratch over `lines`.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        CartTotals {
            line_count: lines.len(),
            total_quantity: lines
                .iter()
                .fold(0u64, |acc, line| acc.saturating_add(line.quantity)),
            total_price: lines.iter().map(CartLine::subtotal).sum(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate.
///
/// Fields are private: the only way to change a cart is through the
/// operations below, which keeps the derived totals honest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    selected: BTreeSet<ProductId>,
    totals: CartTotals,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from a persisted snapshot.
    ///
    /// Selection always starts empty. Totals are folded again from the lines
    /// rather than trusted from storage; any line that somehow carries a
    /// zero quantity or a duplicate id is dropped on the way in.
    pub fn from_persisted(snapshot: PersistedCart) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(snapshot.lines.len());
        for line in snapshot.lines {
            if line.quantity == 0 || lines.iter().any(|l| l.id() == line.id()) {
                continue;
            }
            lines.push(line);
        }

        let mut cart = Cart {
            lines,
            selected: BTreeSet::new(),
            totals: CartTotals::default(),
        };
        cart.recalculate();
        cart
    }

    /// Returns the whitelisted, persistable part of the cart.
    pub fn to_persisted(&self) -> PersistedCart {
        PersistedCart {
            lines: self.lines.clone(),
            line_count: self.totals.line_count,
            total_quantity: self.totals.total_quantity,
            total_price: self.totals.total_price,
        }
    }

    // -------------------------------------------------------------------------
    // Line operations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity goes up by one
    /// - Product not in cart: appended at the end with quantity 1
    pub fn add_to_cart(&mut self, product: &Product) {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
        self.recalculate();
    }

    /// Removes the line for `id` and deselects it. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.lines.retain(|line| line.id() != id);
        self.selected.remove(&id);
        self.recalculate();
    }

    /// Sets the quantity of the line for `id`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_from_cart`]
    /// - line exists: quantity replaced (no upper bound)
    /// - line missing: no-op
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }

        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity.unsigned_abs();
        }
        self.recalculate();
    }

    /// Empties lines and selection.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.selected.clear();
        self.recalculate();
    }

    // -------------------------------------------------------------------------
    // Selection operations
    // -------------------------------------------------------------------------

    /// Marks `id` for checkout. Idempotent.
    ///
    /// The id is not checked against the lines. A selected id without a line
    /// contributes nothing to the order summary, and the next removal-class
    /// operation or `select_all_items` drops it.
    pub fn select_item(&mut self, id: ProductId) {
        self.selected.insert(id);
    }

    /// Unmarks `id`. Idempotent.
    pub fn deselect_item(&mut self, id: ProductId) {
        self.selected.remove(&id);
    }

    /// Selects exactly the ids currently in the cart, replacing any prior
    /// selection.
    pub fn select_all_items(&mut self) {
        self.selected = self.lines.iter().map(CartLine::id).collect();
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Flips the selection state of `id`.
    pub fn toggle_item_selection(&mut self, id: ProductId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    // -------------------------------------------------------------------------
    // Read views
    // -------------------------------------------------------------------------

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if any.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Selected ids.
    pub fn selected(&self) -> &BTreeSet<ProductId> {
        &self.selected
    }

    /// Whether `id` is marked for checkout.
    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected lines, in cart order.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> + '_ {
        self.lines
            .iter()
            .filter(move |line| self.selected.contains(&line.id()))
    }

    /// All derived totals at once.
    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.totals.line_count
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> u64 {
        self.totals.total_quantity
    }

    /// Sum of price × quantity.
    pub fn total_price(&self) -> Money {
        self.totals.total_price
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }

    fn recalculate(&mut self) {
        self.totals = CartTotals::from_lines(&self.lines);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::Rating;
    use rust_decimal_macros::dec;

    pub(crate) fn test_product(id: u64, price_cents: i64) -> Product {
        Product {
            id: ProductId(id),
            title: format!("Test Product {}", id),
            price: Money::from_cents(price_cents),
            description: format!("Test description {}", id),
            category: "electronics".to_string(),
            image: format!("https://example.com/image{}.jpg", id),
            rating: Rating {
                rate: 4.5,
                count: 100,
            },
        }
    }

    fn assert_totals_consistent(cart: &Cart) {
        assert_eq!(cart.totals(), CartTotals::from_lines(cart.lines()));
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_add_same_product_twice_increments_quantity() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 2999);

        cart.add_to_cart(&p1);
        cart.add_to_cart(&p1);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(p1.id).unwrap().quantity, 2);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_price().amount(), dec!(59.98));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_update_quantity_to_zero_empties_cart() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 2999);
        cart.add_to_cart(&p1);
        cart.add_to_cart(&p1);
        cart.select_item(p1.id);

        cart.update_quantity(p1.id, 0);

        assert!(cart.is_empty());
        assert!(cart.selected().is_empty());
        assert_eq!(cart.totals(), CartTotals::default());
    }

    #[test]
    fn test_update_quantity_negative_behaves_as_remove() {
        let mut a = Cart::new();
        let mut b = Cart::new();
        for cart in [&mut a, &mut b] {
            cart.add_to_cart(&test_product(1, 100));
            cart.add_to_cart(&test_product(2, 200));
            cart.select_all_items();
        }

        a.update_quantity(ProductId(1), -3);
        b.remove_from_cart(ProductId(1));

        assert_eq!(a, b);
    }

    #[test]
    fn test_update_quantity_accepts_large_values() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));

        cart.update_quantity(ProductId(1), 1_000_000);

        assert_eq!(cart.total_quantity(), 1_000_000);
        assert_eq!(cart.total_price().amount(), dec!(1000000.00));
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));
        let before = cart.clone();

        cart.update_quantity(ProductId(99), 5);

        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));
        cart.add_to_cart(&test_product(2, 200));
        cart.select_item(ProductId(2));
        let before = cart.clone();

        cart.remove_from_cart(ProductId(3));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut cart = Cart::new();
        for id in [3, 1, 2] {
            cart.add_to_cart(&test_product(id, 100));
        }
        cart.add_to_cart(&test_product(1, 100));
        cart.update_quantity(ProductId(3), 7);
        cart.remove_from_cart(ProductId(1));

        let ids: Vec<u64> = cart.lines().iter().map(|l| l.id().get()).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_removal_prunes_selection() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));
        cart.add_to_cart(&test_product(2, 200));
        cart.select_all_items();

        cart.remove_from_cart(ProductId(1));
        assert!(!cart.is_selected(ProductId(1)));
        assert!(cart.is_selected(ProductId(2)));

        cart.toggle_item_selection(ProductId(2));
        cart.toggle_item_selection(ProductId(2));
        cart.clear_cart();
        assert!(cart.selected().is_empty());
    }

    #[test]
    fn test_clear_cart_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));
        cart.select_all_items();

        cart.clear_cart();
        let once = cart.clone();
        cart.clear_cart();

        assert_eq!(cart, once);
        assert_eq!(cart, Cart::new());
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));
        cart.add_to_cart(&test_product(2, 100));
        cart.select_item(ProductId(1));

        for id in [ProductId(1), ProductId(2)] {
            let before = cart.selected().clone();
            cart.toggle_item_selection(id);
            assert_ne!(cart.selected(), &before);
            cart.toggle_item_selection(id);
            assert_eq!(cart.selected(), &before);
        }
    }

    #[test]
    fn test_select_all_overwrites_partial_selection() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));
        cart.add_to_cart(&test_product(2, 100));
        cart.select_item(ProductId(2));
        cart.select_item(ProductId(42));

        cart.select_all_items();

        let selected: Vec<u64> = cart.selected().iter().map(|id| id.get()).collect();
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn test_select_and_deselect_are_idempotent() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 100));

        cart.select_item(ProductId(1));
        cart.select_item(ProductId(1));
        assert_eq!(cart.selected().len(), 1);

        cart.deselect_item(ProductId(1));
        cart.deselect_item(ProductId(1));
        assert!(cart.selected().is_empty());

        cart.select_item(ProductId(1));
        cart.clear_selection();
        assert!(cart.selected().is_empty());
    }

    #[test]
    fn test_select_item_accepts_unknown_id() {
        let mut cart = Cart::new();
        cart.select_item(ProductId(9));

        assert!(cart.is_selected(ProductId(9)));
        assert_eq!(cart.selected_lines().count(), 0);
    }

    #[test]
    fn test_persisted_round_trip_drops_selection() {
        let mut cart = Cart::new();
        let p1 = test_product(1, 2999);
        cart.add_to_cart(&p1);
        cart.add_to_cart(&p1);
        cart.add_to_cart(&test_product(2, 4999));
        cart.select_all_items();

        let restored = Cart::from_persisted(cart.to_persisted());

        assert_eq!(restored.lines(), cart.lines());
        assert_eq!(restored.totals(), cart.totals());
        assert!(restored.selected().is_empty());
    }

    #[test]
    fn test_from_persisted_recomputes_totals() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 2999));
        let mut snapshot = cart.to_persisted();
        snapshot.total_quantity = 99;
        snapshot.total_price = Money::zero();
        snapshot.lines.push(CartLine {
            product: test_product(5, 100),
            quantity: 0,
        });

        let restored = Cart::from_persisted(snapshot);

        assert_eq!(restored.line_count(), 1);
        assert_eq!(restored.total_quantity(), 1);
        assert_eq!(restored.total_price().amount(), dec!(29.99));
    }
}
