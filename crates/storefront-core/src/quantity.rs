//! # Quantity Helpers
//!
//! Small helpers the presentation layer uses before calling the cart.
//!
//! ## Stepper Flow
//! ```text
//! [-] 2 [+]
//!  │     └──► increment_quantity(2) = 3 ──► update_quantity(id, 3)
//!  └────────► decrement_quantity(2) = 1 ──► update_quantity(id, 1)
//!             decrement_quantity(1) = 0 ──► remove_from_cart(id)
//! ```

use crate::cart::Cart;
use crate::types::{Product, ProductId};

/// `n + 1`.
#[inline]
pub const fn increment_quantity(current: i64) -> i64 {
    current.saturating_add(1)
}

/// `n - 1`. Callers route a result below 1 to removal.
#[inline]
pub const fn decrement_quantity(current: i64) -> i64 {
    current.saturating_sub(1)
}

/// Direction of a +/- click on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityStep {
    Increment,
    Decrement,
}

impl Cart {
    /// Applies a +/- click to the line for `id`.
    ///
    /// A decrement that would leave the line below one unit removes it.
    /// Unknown ids are a no-op.
    pub fn step_quantity(&mut self, id: ProductId, step: QuantityStep) {
        let Some(current) = self.line(id).map(|line| line.quantity) else {
            return;
        };
        let current = i64::try_from(current).unwrap_or(i64::MAX);

        match step {
            QuantityStep::Increment => self.update_quantity(id, increment_quantity(current)),
            QuantityStep::Decrement => {
                let next = decrement_quantity(current);
                if next < 1 {
                    self.remove_from_cart(id);
                } else {
                    self.update_quantity(id, next);
                }
            }
        }
    }

    /// Adds `product` with a chosen quantity, as the product page does.
    ///
    /// ## Behavior
    /// - `quantity == 1`: plain [`Cart::add_to_cart`]
    /// - otherwise: add, then *set* the line to `quantity` (any quantity
    ///   already in the cart is replaced, not added to)
    pub fn add_with_quantity(&mut self, product: &Product, quantity: i64) {
        self.add_to_cart(product);
        if quantity != 1 {
            self.update_quantity(product.id, quantity);
        }
    }
}

// =============================================================================
// Quantity Picker
// =============================================================================

/// State of the quantity picker next to an "Add to cart" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityPicker {
    initial: i64,
    value: i64,
}

impl Default for QuantityPicker {
    fn default() -> Self {
        QuantityPicker::new(1)
    }
}

impl QuantityPicker {
    /// Picker starting at `initial`.
    pub fn new(initial: i64) -> Self {
        QuantityPicker {
            initial,
            value: initial,
        }
    }

    /// Current value.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value = increment_quantity(self.value);
    }

    /// Steps down, never below one.
    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.value = decrement_quantity(self.value);
        }
    }

    /// Sets a typed value; anything below one becomes one.
    pub fn set(&mut self, value: i64) {
        self.value = if value > 0 { value } else { 1 };
    }

    /// Back to the initial value.
    pub fn reset(&mut self) {
        self.value = self.initial;
    }

    /// The "-" button is enabled only above one.
    pub fn can_decrement(&self) -> bool {
        self.value > 1
    }

    /// Adds the picked quantity of `product` to `cart` and resets the picker.
    pub fn add_to(&mut self, cart: &mut Cart, product: &Product) {
        cart.add_with_quantity(product, self.value);
        self.reset();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_product;

    #[test]
    fn test_increment_decrement() {
        assert_eq!(increment_quantity(1), 2);
        assert_eq!(decrement_quantity(1), 0);
    }

    #[test]
    fn test_step_decrement_below_one_removes() {
        let mut cart = Cart::new();
        let p = test_product(1, 100);
        cart.add_to_cart(&p);
        cart.select_item(p.id);

        cart.step_quantity(p.id, QuantityStep::Increment);
        assert_eq!(cart.line(p.id).unwrap().quantity, 2);

        cart.step_quantity(p.id, QuantityStep::Decrement);
        cart.step_quantity(p.id, QuantityStep::Decrement);
        assert!(cart.is_empty());
        assert!(cart.selected().is_empty());
    }

    #[test]
    fn test_step_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.step_quantity(ProductId(3), QuantityStep::Increment);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_with_quantity_sets_rather_than_adds() {
        let mut cart = Cart::new();
        let p = test_product(1, 100);
        cart.add_to_cart(&p);
        cart.add_to_cart(&p);

        cart.add_with_quantity(&p, 5);
        assert_eq!(cart.line(p.id).unwrap().quantity, 5);

        cart.add_with_quantity(&p, 1);
        assert_eq!(cart.line(p.id).unwrap().quantity, 6);
    }

    #[test]
    fn test_picker_bounds_and_reset() {
        let mut picker = QuantityPicker::default();
        assert!(!picker.can_decrement());
        picker.decrement();
        assert_eq!(picker.value(), 1);

        picker.increment();
        picker.increment();
        assert_eq!(picker.value(), 3);

        picker.set(-4);
        assert_eq!(picker.value(), 1);

        picker.set(4);
        let mut cart = Cart::new();
        let p = test_product(2, 250);
        picker.add_to(&mut cart, &p);
        assert_eq!(cart.line(p.id).unwrap().quantity, 4);
        assert_eq!(picker.value(), 1);
    }
}
