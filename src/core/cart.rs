//! Client-side cart.
//!
//! The cart lives with a single guest and is never stored; checkout flattens it
//! into a [`NewOrder`] for [`crate::core::order::create_order`]. Totals are plain
//! `f64` arithmetic, rounded only when displayed.

use crate::core::{
    menu::MenuProduct,
    order::{NewOrder, NewOrderItem},
};
use serde::{Deserialize, Serialize};

/// One cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product as it was shown on the menu
    pub product: MenuProduct,
    /// Number of units, always at least one
    pub quantity: i32,
}

/// Ordered collection of cart lines, at most one per product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of `product_id` in the cart, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &str) -> i32 {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Adds one unit of `product`, incrementing the existing line if there is one.
    ///
    /// Availability is not checked here; the menu only offers the button for
    /// products that can be ordered.
    pub fn add(&mut self, product: MenuProduct) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Removes the line for `product_id`. No-op if it is not in the cart.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|item| item.product.id != product_id);
    }

    /// Overwrites the quantity of `product_id`; zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price x quantity over all lines, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price * f64::from(item.quantity))
            .sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Turns the cart into an order request and empties it.
    ///
    /// Each line's unit price is the product price at the time it was shown,
    /// which is the price the guest agreed to.
    pub fn checkout(&mut self, table_number: &str, notes: Option<String>) -> NewOrder {
        let items = self
            .items
            .drain(..)
            .map(|item| NewOrderItem {
                product_id: item.product.id,
                quantity: item.quantity,
                unit_price: item.product.price,
            })
            .collect();

        NewOrder {
            table_number: table_number.to_string(),
            items,
            notes,
        }
    }
}

/// Formats a price with two decimals and the lira sign, e.g. `"25.50 ₺"`.
#[must_use]
pub fn format_price(price: f64) -> String {
    if price.is_finite() {
        format!("{price:.2} ₺")
    } else {
        "0.00 ₺".to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::menu::Translation;

    fn product(id: &str, price: f64) -> MenuProduct {
        MenuProduct {
            id: id.to_string(),
            name: Translation::new(id, id),
            description: Translation::new("", ""),
            price,
            image: String::new(),
            is_available: true,
            related_products: Vec::new(),
        }
    }

    #[test]
    fn test_add_same_product_twice_increments() {
        let mut cart = Cart::new();
        cart.add(product("p1", 10.0));
        cart.add(product("p1", 10.0));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_total_reflects_contents() {
        let mut cart = Cart::new();
        cart.add(product("p1", 10.0));
        cart.add(product("p1", 10.0));
        cart.add(product("p2", 5.5));

        assert_eq!(cart.total(), 25.5);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(format_price(cart.total()), "25.50 ₺");

        cart.remove("p1");
        assert_eq!(cart.total(), 5.5);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(product("p1", 10.0));
        cart.add(product("p2", 3.0));

        cart.update_quantity("p1", 0);
        assert_eq!(cart.quantity_of("p1"), 0);
        assert_eq!(cart.items().len(), 1);

        // Same result as remove, and repeating it changes nothing
        let mut other = cart.clone();
        other.remove("p1");
        cart.update_quantity("p1", -3);
        assert_eq!(cart, other);
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(product("p1", 2.0));
        cart.update_quantity("p1", 5);
        assert_eq!(cart.quantity_of("p1"), 5);

        // Unknown product is ignored rather than inserted
        cart.update_quantity("missing", 4);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("p1", 2.0));
        cart.remove("nope");
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_float_totals_are_only_rounded_for_display() {
        let mut cart = Cart::new();
        cart.add(product("a", 0.1));
        cart.add(product("b", 0.2));

        // Binary floating point: the raw sum is not exactly 0.3
        assert_ne!(cart.total(), 0.3);
        assert!((cart.total() - 0.3).abs() < 1e-9);
        assert_eq!(format_price(cart.total()), "0.30 ₺");
    }

    #[test]
    fn test_checkout_snaps_prices_and_clears() {
        let mut cart = Cart::new();
        cart.add(product("p1", 100.0));
        cart.add(product("p1", 100.0));
        cart.add(product("p2", 7.25));

        let order = cart.checkout("5", Some("no onions".to_string()));

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
        assert_eq!(order.table_number, "5");
        assert_eq!(order.notes.as_deref(), Some("no onions"));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].product_id, "p1");
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].unit_price, 100.0);
        assert_eq!(order.total(), 207.25);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(product("p1", 1.0));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_format_price_non_finite() {
        assert_eq!(format_price(f64::NAN), "0.00 ₺");
    }
}
