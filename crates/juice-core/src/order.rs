//! # Order
//!
//! The in-progress order: a contact header plus line items.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Operations                                     │
//! │                                                                         │
//! │  Form Action              Order method            State Change          │
//! │  ───────────              ────────────            ────────────          │
//! │                                                                         │
//! │  Add drink ──────────────► add_item() ──────────► merge by name or push │
//! │                                                                         │
//! │  Edit line ──────────────► update_item() ───────► shallow merge         │
//! │                                                                         │
//! │  Remove line ────────────► remove_item() ───────► retain(id != ...)     │
//! │                                                                         │
//! │  Contact fields ─────────► update_info() ───────► header merge          │
//! │                                                                         │
//! │  Start over ─────────────► reset() ─────────────► empty                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No validation happens here. Required contact fields and item shape are
//! checked by the form before submission.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{NewOrderItem, OrderInfoPatch, OrderItem, OrderItemPatch};

/// The customer's order before submission.
///
/// ## Invariants
/// - `add_item` never creates a second line for a name it can find; adding an
///   existing name only folds quantity into the first line with that name
/// - `update_item` may rename a line onto an existing name, so names are not
///   unique in general
/// - An item's `id` never changes after first insertion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub contact: String,
    pub ordered_by: String,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, merging by name.
    ///
    /// ## Behavior
    /// - Name already present: the existing row's quantity grows by
    ///   `item.quantity`. Price, date, note and the rest of the incoming item
    ///   are dropped.
    /// - Otherwise: appended with a fresh UUID.
    ///
    /// Returns the id of the row that now holds the quantity.
    pub fn add_item(&mut self, item: NewOrderItem) -> String {
        if let Some(existing) = self.items.iter_mut().find(|i| i.name == item.name) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return existing.id.clone();
        }

        let id = Uuid::new_v4().to_string();
        self.items.push(item.into_item(id.clone()));
        id
    }

    /// Removes the item with `id`. Returns false (and changes nothing) if
    /// there is no such item.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Shallow-merges `patch` into the header.
    pub fn update_info(&mut self, patch: OrderInfoPatch) {
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(ordered_by) = patch.ordered_by {
            self.ordered_by = ordered_by;
        }
    }

    /// Shallow-merges `patch` into the item with `id`. Returns false if the
    /// id is unknown.
    pub fn update_item(&mut self, id: &str, patch: OrderItemPatch) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                patch.apply(item);
                true
            }
            None => false,
        }
    }

    /// Back to an empty header and no items.
    pub fn reset(&mut self) {
        *self = Order::new();
    }

    pub fn item(&self, id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_by_name(&self, name: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
