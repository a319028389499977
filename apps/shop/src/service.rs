//! # Overlay Service Bridge
//!
//! Lets code outside the UI tree (the fetch client, the submission flow)
//! raise toasts and the loading veil without holding a store reference.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  OverlayStore::mount(service) ──► service.register(handlers)            │
//! │                                         │                               │
//! │  fetch client ──► service.show_loader() ┘──► handlers.show_loader()     │
//! │                                                                         │
//! │  before any mount: every call is a no-op                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service always forwards to the handlers registered last, so a store
//! that is re-created and re-mounted takes over from the previous one.

use std::sync::{Arc, PoisonError, RwLock};

use juice_core::ToastRequest;
use tracing::debug;

/// Callbacks a store exposes to non-UI callers.
pub trait OverlayHandlers: Send + Sync {
    fn show_toast(&self, request: ToastRequest);
    fn show_loader(&self);
    fn hide_loader(&self);
}

/// Indirection between non-UI callers and the live overlay store.
pub struct OverlayService {
    handlers: RwLock<Option<Arc<dyn OverlayHandlers>>>,
}

static GLOBAL: OverlayService = OverlayService::new();

impl OverlayService {
    pub const fn new() -> Self {
        OverlayService {
            handlers: RwLock::new(None),
        }
    }

    /// The process-wide bridge.
    pub fn global() -> &'static OverlayService {
        &GLOBAL
    }

    /// Replaces the current handlers.
    pub fn register(&self, handlers: Arc<dyn OverlayHandlers>) {
        *self.handlers.write().unwrap_or_else(PoisonError::into_inner) = Some(handlers);
        debug!("Overlay handlers registered");
    }

    /// Drops the current handlers; later calls become no-ops again.
    pub fn unregister(&self) {
        *self.handlers.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.current().is_some()
    }

    fn current(&self) -> Option<Arc<dyn OverlayHandlers>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn show_toast(&self, request: ToastRequest) {
        match self.current() {
            Some(handlers) => handlers.show_toast(request),
            None => debug!(message = %request.message, "show_toast before mount, ignored"),
        }
    }

    pub fn show_loader(&self) {
        match self.current() {
            Some(handlers) => handlers.show_loader(),
            None => debug!("show_loader before mount, ignored"),
        }
    }

    pub fn hide_loader(&self) {
        match self.current() {
            Some(handlers) => handlers.hide_loader(),
            None => debug!("hide_loader before mount, ignored"),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show_toast(ToastRequest::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show_toast(ToastRequest::error(message));
    }
}

impl Default for OverlayService {
    fn default() -> Self {
        Self::new()
    }
}
