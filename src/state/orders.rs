#[cfg(test)]
#[path = "orders_test.rs"]
mod orders_test;

use crate::net::types::Order;

/// State for the order-history page.
#[derive(Clone, Debug, Default)]
pub struct OrdersState {
    pub orders: Vec<Order>,
    pub loading: bool,
    /// Order id with a cancel request outstanding, if any.
    pub cancel_pending: Option<i64>,
}

impl OrdersState {
    /// Whether an order may still be cancelled by the customer.
    pub fn is_cancellable(order: &Order) -> bool {
        matches!(order.status.as_str(), "pending" | "confirmed")
    }
}
