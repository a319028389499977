//! # Overlay Store
//!
//! The single source of truth for toasts, the loading veil, modals and
//! sheets. Wraps the pure [`OverlayState`] and adds what it cannot do itself:
//! change notification and real-time timers.
//!
//! ## Timers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  show_toast ──► push ──► spawn(sleep toast_ttl) ──► close_toast(id)     │
//! │                                                                         │
//! │  close_modal ─┐                                                         │
//! │  close_sheet ─┼─► PurgeTicket ──► spawn(sleep purge_delay) ──► purge    │
//! │  close_all_* ─┘                                                         │
//! │                                                                         │
//! │  Timers hold a Weak reference: once the store is dropped they do        │
//! │  nothing. A ticket from before a re-open no longer matches and the      │
//! │  purge is discarded.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every action is one `send_modify`/`send_if_modified` on a watch channel,
//! so subscribers never observe a half-applied transition.

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, warn};

use juice_core::{
    ModalInstance, ModalName, ModalRequest, OverlayState, PurgeTicket, SheetInstance, SheetName,
    SheetRequest, ToastMessage, ToastRequest,
};

use crate::config::OverlaySettings;
use crate::service::{OverlayHandlers, OverlayService};

/// Delays applied by the store's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTimings {
    pub toast_ttl: Duration,
    pub purge_delay: Duration,
}

impl Default for OverlayTimings {
    fn default() -> Self {
        OverlayTimings {
            toast_ttl: Duration::from_millis(3000),
            purge_delay: Duration::from_millis(200),
        }
    }
}

impl From<&OverlaySettings> for OverlayTimings {
    fn from(settings: &OverlaySettings) -> Self {
        OverlayTimings {
            toast_ttl: settings.toast_ttl(),
            purge_delay: settings.purge_delay(),
        }
    }
}

struct Inner {
    state: watch::Sender<OverlayState>,
    timings: OverlayTimings,
}

/// Reactive overlay store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct OverlayStore {
    inner: Arc<Inner>,
}

impl OverlayStore {
    pub fn new(timings: OverlayTimings) -> Self {
        let (state, _) = watch::channel(OverlayState::new());
        OverlayStore {
            inner: Arc::new(Inner { state, timings }),
        }
    }

    /// Registers this store as the target of `service`.
    pub fn mount(&self, service: &OverlayService) {
        service.register(Arc::new(self.clone()));
    }

    /// Receives a fresh snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> OverlayState {
        self.inner.state.borrow().clone()
    }

    /// Runs `f` against the current state without cloning it.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OverlayState) -> R,
    {
        f(&self.inner.state.borrow())
    }

    // =========================================================================
    // Toasts
    // =========================================================================

    /// Queues a toast and schedules its auto-dismiss. Returns the toast id.
    pub fn show_toast(&self, request: ToastRequest) -> String {
        let mut id = String::new();
        self.inner
            .state
            .send_modify(|state| id = state.show_toast(request, Utc::now()).id);
        debug!(toast_id = %id, "Toast shown");

        let toast_id = id.clone();
        self.after(self.inner.timings.toast_ttl, move |inner| {
            if inner.state.send_if_modified(|state| state.close_toast(&toast_id)) {
                debug!(toast_id = %toast_id, "Toast auto-dismissed");
            }
        });

        id
    }

    /// Removes a toast. Unknown ids are ignored.
    pub fn close_toast(&self, id: &str) {
        self.inner
            .state
            .send_if_modified(|state| state.close_toast(id));
    }

    pub fn toasts(&self) -> Vec<ToastMessage> {
        self.with_state(|state| state.toasts().to_vec())
    }

    // =========================================================================
    // Loader
    // =========================================================================

    pub fn show_loader(&self) {
        self.inner.state.send_modify(OverlayState::show_loader);
    }

    pub fn hide_loader(&self) {
        self.inner.state.send_modify(OverlayState::hide_loader);
    }

    pub fn is_loading(&self) -> bool {
        self.with_state(OverlayState::is_loading)
    }

    // =========================================================================
    // Modals
    // =========================================================================

    pub fn open_modal(&self, request: ModalRequest) {
        let name = request.name;
        if !name.is_rendered() {
            warn!(modal = %name, "Opening a modal with no renderer registered");
        }
        self.inner
            .state
            .send_modify(|state| state.open_modal(request));
        debug!(modal = %name, "Modal opened");
    }

    /// Starts closing a modal; it is purged after the purge delay.
    pub fn close_modal(&self, name: ModalName) {
        let mut ticket = None;
        self.inner.state.send_if_modified(|state| {
            ticket = state.close_modal(name);
            ticket.is_some()
        });

        if let Some(ticket) = ticket {
            debug!(modal = %name, "Modal closing");
            self.schedule_purge(ticket);
        }
    }

    pub fn close_all_modals(&self) {
        let mut tickets = Vec::new();
        self.inner
            .state
            .send_modify(|state| tickets = state.close_all_modals());
        debug!(count = tickets.len(), "All modals closing");

        for ticket in tickets {
            self.schedule_purge(ticket);
        }
    }

    pub fn modal(&self, name: ModalName) -> Option<ModalInstance> {
        self.with_state(|state| state.modal(name).cloned())
    }

    pub fn active_modals(&self) -> Vec<ModalName> {
        self.with_state(|state| state.active_modals().to_vec())
    }

    // =========================================================================
    // Sheets
    // =========================================================================

    pub fn open_sheet(&self, request: SheetRequest) {
        let name = request.name;
        if !name.is_rendered() {
            warn!(sheet = %name, "Opening a sheet with no renderer registered");
        }
        self.inner
            .state
            .send_modify(|state| state.open_sheet(request));
        debug!(sheet = %name, "Sheet opened");
    }

    /// Starts closing a sheet; it is purged after the purge delay.
    pub fn close_sheet(&self, name: SheetName) {
        let mut ticket = None;
        self.inner.state.send_if_modified(|state| {
            ticket = state.close_sheet(name);
            ticket.is_some()
        });

        if let Some(ticket) = ticket {
            debug!(sheet = %name, "Sheet closing");
            self.schedule_purge(ticket);
        }
    }

    pub fn close_all_sheets(&self) {
        let mut tickets = Vec::new();
        self.inner
            .state
            .send_modify(|state| tickets = state.close_all_sheets());
        debug!(count = tickets.len(), "All sheets closing");

        for ticket in tickets {
            self.schedule_purge(ticket);
        }
    }

    pub fn sheet(&self, name: SheetName) -> Option<SheetInstance> {
        self.with_state(|state| state.sheet(name).cloned())
    }

    /// Visible sheets, topmost first.
    pub fn active_sheets(&self) -> Vec<SheetName> {
        self.with_state(OverlayState::active_sheets)
    }

    pub fn top_sheet(&self) -> Option<SheetName> {
        self.with_state(OverlayState::top_sheet)
    }

    // =========================================================================
    // Timers
    // =========================================================================

    fn schedule_purge(&self, ticket: PurgeTicket) {
        self.after(self.inner.timings.purge_delay, move |inner| {
            if inner.state.send_if_modified(|state| state.purge(ticket)) {
                debug!(?ticket, "Overlay purged");
            }
        });
    }

    /// Runs `f` once `delay` has elapsed, if the store still exists.
    fn after<F>(&self, delay: Duration, f: F)
    where
        F: FnOnce(&Inner) + Send + 'static,
    {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Some(inner) = weak.upgrade() {
                        f(&inner);
                    }
                });
            }
            Err(e) => error!("No tokio runtime, overlay timer dropped: {}", e),
        }
    }
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new(OverlayTimings::default())
    }
}

impl OverlayHandlers for OverlayStore {
    fn show_toast(&self, request: ToastRequest) {
        OverlayStore::show_toast(self, request);
    }

    fn show_loader(&self) {
        OverlayStore::show_loader(self);
    }

    fn hide_loader(&self) {
        OverlayStore::hide_loader(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juice_core::ToastKind;
    use serde_json::json;
    use tokio::time::sleep;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_auto_dismisses_after_ttl() {
        let store = OverlayStore::default();
        let id = store.show_toast(ToastRequest::success("Đã thêm vào giỏ"));

        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
        assert_eq!(toasts[0].kind, ToastKind::Success);

        sleep(ms(2999)).await;
        assert_eq!(store.toasts().len(), 1);

        sleep(ms(2)).await;
        assert!(store.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_toast_early_then_timer_is_harmless() {
        let store = OverlayStore::default();
        let first = store.show_toast(ToastRequest::info("one"));
        store.close_toast(&first);
        store.close_toast("unknown");
        assert!(store.toasts().is_empty());

        let second = store.show_toast(ToastRequest::info("two"));
        sleep(ms(3001)).await;
        assert!(store.toasts().iter().all(|t| t.id != second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_modal_closed_but_queryable_until_purge() {
        let store = OverlayStore::default();
        store.open_modal(ModalRequest::new(ModalName::OrderConfirm).with_data(json!({"n": 1})));
        store.close_modal(ModalName::OrderConfirm);

        let modal = store.modal(ModalName::OrderConfirm).unwrap();
        assert!(!modal.is_open);
        assert!(store.active_modals().is_empty());

        sleep(ms(199)).await;
        assert!(store.modal(ModalName::OrderConfirm).is_some());

        sleep(ms(2)).await;
        assert!(store.modal(ModalName::OrderConfirm).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopen_within_purge_delay_survives() {
        let store = OverlayStore::default();
        store.open_modal(ModalRequest::new(ModalName::OrderConfirm));
        store.close_modal(ModalName::OrderConfirm);

        sleep(ms(100)).await;
        store.open_modal(ModalRequest::new(ModalName::OrderConfirm));

        sleep(ms(300)).await;
        let modal = store.modal(ModalName::OrderConfirm).unwrap();
        assert!(modal.is_open);
        assert_eq!(store.active_modals(), [ModalName::OrderConfirm]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_all_modals_purges() {
        let store = OverlayStore::default();
        store.open_modal(ModalRequest::new(ModalName::OrderConfirm));
        store.close_all_modals();

        assert!(store.active_modals().is_empty());
        assert!(!store.modal(ModalName::OrderConfirm).unwrap().is_open);

        sleep(ms(201)).await;
        assert!(store.modal(ModalName::OrderConfirm).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sheet_scenario_close_top_sheet() {
        let store = OverlayStore::default();
        store.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        store.open_sheet(SheetRequest::new(SheetName::OrderForm));
        assert_eq!(store.sheet(SheetName::OrderFormMobile).unwrap().order, 1);

        // Close the sheet on top (order 0); the other one moves up to 0.
        store.close_sheet(SheetName::OrderForm);
        assert_eq!(store.sheet(SheetName::OrderFormMobile).unwrap().order, 0);
        assert_eq!(store.active_sheets(), [SheetName::OrderFormMobile]);
        assert!(!store.sheet(SheetName::OrderForm).unwrap().is_open);

        sleep(ms(201)).await;
        assert!(store.sheet(SheetName::OrderForm).is_none());
        assert_eq!(store.top_sheet(), Some(SheetName::OrderFormMobile));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sheet_scenario_close_lower_sheet() {
        let store = OverlayStore::default();
        store.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        store.open_sheet(SheetRequest::new(SheetName::OrderForm));

        // The first sheet opened now sits below (order 1); the top one keeps 0.
        store.close_sheet(SheetName::OrderFormMobile);
        assert_eq!(store.sheet(SheetName::OrderForm).unwrap().order, 0);
        assert_eq!(store.active_sheets(), [SheetName::OrderForm]);
        assert!(!store.sheet(SheetName::OrderFormMobile).unwrap().is_open);

        sleep(ms(199)).await;
        assert!(store.sheet(SheetName::OrderFormMobile).is_some());

        sleep(ms(2)).await;
        assert!(store.sheet(SheetName::OrderFormMobile).is_none());
        assert_eq!(store.sheet(SheetName::OrderForm).unwrap().order, 0);
        assert_eq!(store.top_sheet(), Some(SheetName::OrderForm));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_all_sheets_purges() {
        let store = OverlayStore::default();
        store.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        store.open_sheet(SheetRequest::new(SheetName::OrderForm));
        store.close_all_sheets();
        assert!(store.active_sheets().is_empty());

        sleep(ms(201)).await;
        assert!(store.snapshot().sheets().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_transitions() {
        let store = OverlayStore::default();
        let mut rx = store.subscribe();

        store.show_loader();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        store.close_modal(ModalName::OrderConfirm);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_store_timers_do_nothing() {
        let store = OverlayStore::default();
        let rx = store.subscribe();
        store.show_toast(ToastRequest::warning("bye"));
        drop(store);

        sleep(ms(3001)).await;
        assert_eq!(rx.borrow().toasts().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mounted_store_serves_bridge() {
        let service = OverlayService::new();
        let store = OverlayStore::default();
        store.mount(&service);

        service.show_loader();
        assert!(store.is_loading());
        service.error("Không gửi được đơn");
        assert_eq!(store.toasts()[0].kind, ToastKind::Error);
        service.hide_loader();
        assert!(!store.is_loading());
    }
}
