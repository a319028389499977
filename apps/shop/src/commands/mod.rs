//! # Commands Module
//!
//! Actions that span more than one store.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop Commands                                    │
//! │                                                                         │
//! │  ORDER                                                                  │
//! │  ─────                                                                  │
//! │  submit_order      Cart ──► submitter ──► history + confirm modal      │
//! │  build_submission  Order ──► flattened rows (payload)                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-store actions are methods on the stores themselves.

pub mod order;

pub use order::{build_submission, submit_order, DryRunSubmitter, OrderSubmitter, SubmissionRow};
