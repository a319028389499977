//! # juice-core: Pure Ordering & Overlay Logic
//!
//! The rules of the juice shop's client state, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Juice Shop Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI tree (components)                         │   │
//! │  │    Menu ──► Order form ──► Cart list ──► Confirm modal          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ subscribe / dispatch                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              juice-shop (stores, timers, storage)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ juice-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   order   │  │  overlay  │   │   │
//! │  │   │ Toast     │  │   Money   │  │   Order   │  │ Overlay-  │   │   │
//! │  │   │ Modal     │  │   (đồng)  │  │   merge   │  │  State    │   │   │
//! │  │   │ Sheet     │  │           │  │   by name │  │  tickets  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO TIMERS • NO FILES • NO NETWORK • DETERMINISTIC             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Overlay and order data types
//! - [`money`] - Integer đồng amounts
//! - [`order`] - The in-progress order and its merge rules
//! - [`overlay`] - Toast/loader/modal/sheet state machine
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use juice_core::{Money, NewOrderItem, Order};
//!
//! let mut order = Order::new();
//! let id = order.add_item(NewOrderItem::new("Apple", 1, Money::from_dong(20_000)));
//! order.add_item(NewOrderItem::new("Apple", 2, Money::from_dong(99_999)));
//!
//! let item = order.item(&id).unwrap();
//! assert_eq!(item.quantity, 3);
//! assert_eq!(item.price, Money::from_dong(20_000));
//! ```

pub mod error;
pub mod money;
pub mod order;
pub mod overlay;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use order::Order;
pub use overlay::{OverlayState, PurgeTicket};
pub use types::*;

/// Local storage key holding the submitted-order history.
pub const ORDER_HISTORY_KEY: &str = "orders";
