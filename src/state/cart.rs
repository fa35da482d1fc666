#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use crate::net::types::Cart;

/// State for the cart page and the navbar badge.
///
/// Reset wholesale whenever the authenticated identity changes so no
/// cart data from a previous user can be rendered.
#[derive(Clone, Debug, Default)]
pub struct CartState {
    pub cart: Cart,
    pub loading: bool,
    pub checkout_open: bool,
    pub checkout_pending: bool,
}

impl CartState {
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.items.is_empty()
    }
}
