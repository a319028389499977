//! # State Module
//!
//! Process-wide state for one shop session.
//!
//! ## Why Separate Stores?
//! The overlay store and the cart store never reference each other. A
//! component subscribes to the one it renders, and an action that touches
//! both (submitting an order) sequences the calls itself.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  OverlayStore    │  │   CartStore      │  │  OrderHistory        │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  watch<Overlay-  │  │  watch<Order>    │  │  LocalStorage        │  │
//! │  │   State>         │  │                  │  │  (storage.json)      │  │
//! │  │  + tokio timers  │  │                  │  │                      │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │           ▲                                                             │
//! │           │ mount()                                                     │
//! │  ┌────────┴─────────┐                                                   │
//! │  │ OverlayService   │  non-UI callers (fetch client, submit flow)       │
//! │  └──────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod overlay;
mod storage;

pub use cart::CartStore;
pub use overlay::{OverlayStore, OverlayTimings};
pub use storage::{HistoryEntry, LocalStorage, OrderHistory};
