//! # Cart Store
//!
//! Reactive holder for the in-progress [`Order`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action               Store method            Order change           │
//! │  ─────────               ────────────            ────────────           │
//! │                                                                         │
//! │  Pick drink ───────────► add_order() ──────────► merge or push          │
//! │  Edit line ────────────► update_order_item() ──► shallow merge          │
//! │  Remove line ──────────► remove_order() ───────► retain                 │
//! │  Contact fields ───────► update_order_info() ──► header merge           │
//! │  After confirmation ───► reset_order() ────────► empty                  │
//! │                                                                         │
//! │  Subscribers get a new snapshot only when something changed.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart store is independent of the overlay store. Nothing here knows
//! about toasts or modals.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use juice_core::{Money, NewOrderItem, Order, OrderInfoPatch, OrderItemPatch};

/// Reactive cart. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct CartStore {
    order: Arc<watch::Sender<Order>>,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        let (order, _) = watch::channel(Order::new());
        CartStore {
            order: Arc::new(order),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Order> {
        self.order.subscribe()
    }

    pub fn snapshot(&self) -> Order {
        self.order.borrow().clone()
    }

    /// Executes a function with read access to the order.
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Order) -> R,
    {
        f(&self.order.borrow())
    }

    /// Adds an item, folding quantity into an existing line with the same
    /// name. Returns the id of the line holding it.
    pub fn add_order(&self, item: NewOrderItem) -> String {
        debug!(name = %item.name, quantity = item.quantity, "add_order");
        let mut id = String::new();
        self.order.send_modify(|order| id = order.add_item(item));
        id
    }

    /// Removes a line. Unknown ids leave the order untouched.
    pub fn remove_order(&self, id: &str) {
        debug!(item_id = %id, "remove_order");
        self.order.send_if_modified(|order| order.remove_item(id));
    }

    pub fn update_order_info(&self, patch: OrderInfoPatch) {
        debug!("update_order_info");
        self.order.send_modify(|order| order.update_info(patch));
    }

    /// Merges `patch` into a line. Unknown ids leave the order untouched.
    pub fn update_order_item(&self, id: &str, patch: OrderItemPatch) {
        debug!(item_id = %id, "update_order_item");
        self.order
            .send_if_modified(|order| order.update_item(id, patch));
    }

    pub fn reset_order(&self) {
        debug!("reset_order");
        self.order.send_modify(Order::reset);
    }

    pub fn item_count(&self) -> usize {
        self.with_order(Order::item_count)
    }

    pub fn total_quantity(&self) -> u64 {
        self.with_order(Order::total_quantity)
    }

    pub fn total(&self) -> Money {
        self.with_order(Order::total)
    }

    pub fn is_empty(&self) -> bool {
        self.with_order(Order::is_empty)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn juice(name: &str, quantity: u32, price: i64) -> NewOrderItem {
        NewOrderItem::new(name, quantity, Money::from_dong(price))
    }

    #[test]
    fn test_add_same_name_twice() {
        let cart = CartStore::new();
        let first = cart.add_order(juice("Apple", 1, 20_000));
        let second = cart.add_order(juice("Apple", 2, 99_999));

        assert_eq!(first, second);
        let order = cart.snapshot();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 3);
        assert_eq!(order.items[0].price, Money::from_dong(20_000));
        assert_eq!(cart.total(), Money::from_dong(60_000));
    }

    #[test]
    fn test_remove_unknown_does_not_notify() {
        let cart = CartStore::new();
        cart.add_order(juice("Apple", 1, 20_000));
        let mut rx = cart.subscribe();
        rx.borrow_and_update();

        cart.remove_order("missing");
        assert!(!rx.has_changed().unwrap());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_unknown_item_does_not_notify() {
        let cart = CartStore::new();
        let mut rx = cart.subscribe();
        rx.borrow_and_update();

        cart.update_order_item(
            "missing",
            OrderItemPatch {
                quantity: Some(9),
                ..Default::default()
            },
        );
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_update_item_and_info() {
        let cart = CartStore::new();
        let id = cart.add_order(juice("Orange", 1, 25_000));

        cart.update_order_item(
            &id,
            OrderItemPatch {
                quantity: Some(2),
                ..Default::default()
            },
        );
        cart.update_order_info(OrderInfoPatch {
            contact: Some("0901234567".to_string()),
            ordered_by: Some("Lan".to_string()),
        });

        let order = cart.snapshot();
        assert_eq!(order.contact, "0901234567");
        assert_eq!(order.ordered_by, "Lan");
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_reset_order() {
        let cart = CartStore::new();
        cart.add_order(juice("Apple", 1, 20_000));
        let mut rx = cart.subscribe();

        cart.reset_order();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
        assert!(cart.is_empty());
    }
}
