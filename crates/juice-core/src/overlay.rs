//! # Overlay State
//!
//! Pure state machine behind the global overlay store: toast queue, loading
//! veil, modal registry and the stacked-sheet registry.
//!
//! ## Lifecycle of a Modal or Sheet
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   open ──► registered, isOpen=true, in active list                      │
//! │                 │                                                       │
//! │               close                                                     │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            registered, isOpen=false, NOT in active list   (exit anim)   │
//! │                 │                                                       │
//! │         purge ticket redeemed after the purge delay                     │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            removed from registry                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this module sleeps. Closing hands back a [`PurgeTicket`]; the
//! caller redeems it with [`OverlayState::purge`] once the delay has elapsed.
//! Every open bumps the instance generation, so a ticket issued before a
//! re-open no longer matches and is discarded.
//!
//! ## Sheet Ordering
//! `order` is a dense recency rank over active sheets. The sheet opened last
//! sits at 0.
//! ```text
//!   open A          A:0
//!   open B          A:1  B:0
//!   open C          A:2  B:1  C:0
//!   close B (k=1)   A:1       C:0      (ranks above k shift down)
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{
    ModalInstance, ModalName, ModalRequest, SheetInstance, SheetName, SheetRequest, ToastMessage,
    ToastRequest,
};

/// Deferred removal of a closed modal or sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeTicket {
    Modal { name: ModalName, generation: u64 },
    Sheet { name: SheetName, generation: u64 },
}

/// Snapshot of every transient overlay surface.
///
/// This is the value UI trees subscribe to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    toasts: Vec<ToastMessage>,

    loading: bool,

    modals: BTreeMap<ModalName, ModalInstance>,

    active_modals: Vec<ModalName>,

    sheets: BTreeMap<SheetName, SheetInstance>,

    active_sheets: Vec<SheetName>,

    #[serde(skip)]
    generation: u64,

    #[serde(skip)]
    toast_seq: u64,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    // =========================================================================
    // Toasts
    // =========================================================================

    /// Appends a toast and returns it.
    ///
    /// The id is the creation time in milliseconds, suffixed with a sequence
    /// number so two toasts created in the same millisecond stay distinct.
    /// The queue is unbounded.
    pub fn show_toast(&mut self, request: ToastRequest, now: DateTime<Utc>) -> ToastMessage {
        self.toast_seq += 1;
        let toast = ToastMessage {
            id: format!("{}-{}", now.timestamp_millis(), self.toast_seq),
            kind: request.kind,
            message: request.message,
            show_icon: request.show_icon,
        };
        self.toasts.push(toast.clone());
        toast
    }

    /// Removes a toast. Unknown ids are ignored.
    pub fn close_toast(&mut self, id: &str) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[ToastMessage] {
        &self.toasts
    }

    // =========================================================================
    // Loader
    // =========================================================================

    /// Not reference counted: any `hide_loader` clears every `show_loader`.
    pub fn show_loader(&mut self) {
        self.loading = true;
    }

    pub fn hide_loader(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // =========================================================================
    // Modals
    // =========================================================================

    /// Upserts the modal as open. Re-opening an open modal replaces its data
    /// and size but does not duplicate it in the active list.
    pub fn open_modal(&mut self, request: ModalRequest) {
        let generation = self.next_generation();
        self.modals.insert(
            request.name,
            ModalInstance {
                data: request.data,
                size: request.size,
                is_open: true,
                generation,
            },
        );
        if !self.active_modals.contains(&request.name) {
            self.active_modals.push(request.name);
        }
    }

    /// Starts closing a modal. Returns `None` for an unknown name.
    pub fn close_modal(&mut self, name: ModalName) -> Option<PurgeTicket> {
        let modal = self.modals.get_mut(&name)?;
        modal.is_open = false;
        let generation = modal.generation;
        self.active_modals.retain(|n| *n != name);
        Some(PurgeTicket::Modal { name, generation })
    }

    /// Closes every registered modal in one transition.
    pub fn close_all_modals(&mut self) -> Vec<PurgeTicket> {
        self.active_modals.clear();
        self.modals
            .iter_mut()
            .map(|(name, modal)| {
                modal.is_open = false;
                PurgeTicket::Modal {
                    name: *name,
                    generation: modal.generation,
                }
            })
            .collect()
    }

    pub fn modal(&self, name: ModalName) -> Option<&ModalInstance> {
        self.modals.get(&name)
    }

    pub fn modals(&self) -> &BTreeMap<ModalName, ModalInstance> {
        &self.modals
    }

    /// Names of visible modals, in the order they were opened.
    pub fn active_modals(&self) -> &[ModalName] {
        &self.active_modals
    }

    // =========================================================================
    // Sheets
    // =========================================================================

    /// Opens a sheet on top of the stack.
    ///
    /// ## Ranking
    /// - New name, or a name still registered but closing: every other
    ///   registered sheet moves down one rank.
    /// - Name already open at rank k: only sheets above it (rank < k) move
    ///   down, so the active ranks stay `0..N`.
    pub fn open_sheet(&mut self, request: SheetRequest) {
        let generation = self.next_generation();
        let name = request.name;

        let open_rank = self
            .sheets
            .get(&name)
            .filter(|sheet| sheet.is_open)
            .map(|sheet| sheet.order);

        for (other, sheet) in self.sheets.iter_mut() {
            if *other == name {
                continue;
            }
            match open_rank {
                Some(rank) if sheet.order >= rank => {}
                _ => sheet.order += 1,
            }
        }

        self.sheets.insert(
            name,
            SheetInstance {
                data: request.data,
                side: request.side,
                is_open: true,
                order: 0,
                generation,
            },
        );
        if !self.active_sheets.contains(&name) {
            self.active_sheets.push(name);
        }
    }

    /// Starts closing a sheet.
    ///
    /// Sheets ranked above the closing one keep their rank; sheets ranked
    /// below it move up by one. Returns `None` if the sheet is unknown or
    /// already closing.
    pub fn close_sheet(&mut self, name: SheetName) -> Option<PurgeTicket> {
        let sheet = self.sheets.get(&name).filter(|sheet| sheet.is_open)?;
        let closing_rank = sheet.order;

        self.active_sheets.retain(|n| *n != name);
        for (other, sheet) in self.sheets.iter_mut() {
            if *other != name && sheet.order > closing_rank {
                sheet.order -= 1;
            }
        }

        let sheet = self.sheets.get_mut(&name)?;
        sheet.is_open = false;
        Some(PurgeTicket::Sheet {
            name,
            generation: sheet.generation,
        })
    }

    /// Closes every registered sheet in one transition.
    pub fn close_all_sheets(&mut self) -> Vec<PurgeTicket> {
        self.active_sheets.clear();
        self.sheets
            .iter_mut()
            .map(|(name, sheet)| {
                sheet.is_open = false;
                PurgeTicket::Sheet {
                    name: *name,
                    generation: sheet.generation,
                }
            })
            .collect()
    }

    pub fn sheet(&self, name: SheetName) -> Option<&SheetInstance> {
        self.sheets.get(&name)
    }

    pub fn sheets(&self) -> &BTreeMap<SheetName, SheetInstance> {
        &self.sheets
    }

    /// Names of visible sheets, topmost first.
    pub fn active_sheets(&self) -> Vec<SheetName> {
        let mut active = self.active_sheets.clone();
        active.sort_by_key(|name| self.sheets.get(name).map_or(u32::MAX, |s| s.order));
        active
    }

    /// The visible sheet with rank 0.
    pub fn top_sheet(&self) -> Option<SheetName> {
        self.active_sheets
            .iter()
            .copied()
            .find(|name| self.sheets.get(name).is_some_and(|s| s.order == 0))
    }

    // =========================================================================
    // Purge
    // =========================================================================

    /// Redeems a purge ticket.
    ///
    /// The instance is removed only if it is still closed and has not been
    /// re-opened since the ticket was issued. Returns whether anything was
    /// removed.
    pub fn purge(&mut self, ticket: PurgeTicket) -> bool {
        match ticket {
            PurgeTicket::Modal { name, generation } => {
                let stale = self
                    .modals
                    .get(&name)
                    .map_or(true, |m| m.is_open || m.generation != generation);
                if stale {
                    return false;
                }
                self.modals.remove(&name);
                self.active_modals.retain(|n| *n != name);
                true
            }
            PurgeTicket::Sheet { name, generation } => {
                let stale = self
                    .sheets
                    .get(&name)
                    .map_or(true, |s| s.is_open || s.generation != generation);
                if stale {
                    return false;
                }
                self.sheets.remove(&name);
                self.active_sheets.retain(|n| *n != name);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SheetSide, ToastKind};
    use serde_json::json;

    fn ranks(state: &OverlayState) -> Vec<(SheetName, u32)> {
        state
            .active_sheets()
            .into_iter()
            .map(|name| (name, state.sheet(name).unwrap().order))
            .collect()
    }

    fn assert_dense(state: &OverlayState) {
        let mut orders: Vec<u32> = ranks(state).into_iter().map(|(_, o)| o).collect();
        orders.sort_unstable();
        let expected: Vec<u32> = (0..orders.len() as u32).collect();
        assert_eq!(orders, expected);
    }

    #[test]
    fn test_toasts_keep_insertion_order() {
        let mut state = OverlayState::new();
        let now = Utc::now();
        let a = state.show_toast(ToastRequest::success("Đã thêm"), now);
        let b = state.show_toast(ToastRequest::error("Lỗi").without_icon(), now);

        assert_ne!(a.id, b.id);
        assert_eq!(state.toasts().len(), 2);
        assert_eq!(state.toasts()[0].kind, ToastKind::Success);
        assert!(!state.toasts()[1].show_icon);
        assert!(a.id.starts_with(&now.timestamp_millis().to_string()));
    }

    #[test]
    fn test_close_toast_unknown_is_noop() {
        let mut state = OverlayState::new();
        state.show_toast(ToastRequest::info("hi"), Utc::now());
        assert!(!state.close_toast("nope"));
        assert_eq!(state.toasts().len(), 1);
    }

    #[test]
    fn test_loader_does_not_nest() {
        let mut state = OverlayState::new();
        state.show_loader();
        state.show_loader();
        state.hide_loader();
        assert!(!state.is_loading());
    }

    #[test]
    fn test_modal_close_keeps_instance_until_purge() {
        let mut state = OverlayState::new();
        state.open_modal(ModalRequest::new(ModalName::OrderConfirm).with_data(json!({"id": 1})));
        assert_eq!(state.active_modals(), [ModalName::OrderConfirm]);

        let ticket = state.close_modal(ModalName::OrderConfirm).unwrap();
        let modal = state.modal(ModalName::OrderConfirm).unwrap();
        assert!(!modal.is_open);
        assert_eq!(modal.data, Some(json!({"id": 1})));
        assert!(state.active_modals().is_empty());

        assert!(state.purge(ticket));
        assert!(state.modal(ModalName::OrderConfirm).is_none());
    }

    #[test]
    fn test_modal_reopen_is_idempotent_in_active_list() {
        let mut state = OverlayState::new();
        state.open_modal(ModalRequest::new(ModalName::OrderConfirm));
        state.open_modal(ModalRequest::new(ModalName::OrderConfirm));
        assert_eq!(state.active_modals().len(), 1);
    }

    #[test]
    fn test_close_unknown_modal_is_noop() {
        let mut state = OverlayState::new();
        assert!(state.close_modal(ModalName::OrderConfirm).is_none());
    }

    #[test]
    fn test_stale_modal_purge_after_reopen_is_discarded() {
        let mut state = OverlayState::new();
        state.open_modal(ModalRequest::new(ModalName::OrderConfirm));
        let ticket = state.close_modal(ModalName::OrderConfirm).unwrap();
        state.open_modal(ModalRequest::new(ModalName::OrderConfirm));

        assert!(!state.purge(ticket));
        assert!(state.modal(ModalName::OrderConfirm).unwrap().is_open);
        assert_eq!(state.active_modals(), [ModalName::OrderConfirm]);
    }

    #[test]
    fn test_close_all_modals() {
        let mut state = OverlayState::new();
        state.open_modal(ModalRequest::new(ModalName::OrderConfirm));
        let tickets = state.close_all_modals();

        assert!(state.active_modals().is_empty());
        assert!(!state.modal(ModalName::OrderConfirm).unwrap().is_open);
        assert_eq!(tickets.len(), 1);
        for ticket in tickets {
            state.purge(ticket);
        }
        assert!(state.modals().is_empty());
    }

    #[test]
    fn test_open_sheets_stack_by_recency() {
        let mut state = OverlayState::new();
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        state.open_sheet(SheetRequest::new(SheetName::OrderForm).with_side(SheetSide::Right));

        assert_eq!(
            ranks(&state),
            [(SheetName::OrderForm, 0), (SheetName::OrderFormMobile, 1)]
        );
        assert_eq!(state.top_sheet(), Some(SheetName::OrderForm));
        assert_dense(&state);
    }

    #[test]
    fn test_close_bottom_sheet_shifts_nothing_above() {
        // A opened first (rank 1), B on top (rank 0). Closing A leaves B at 0.
        let mut state = OverlayState::new();
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        state.open_sheet(SheetRequest::new(SheetName::OrderForm));

        state.close_sheet(SheetName::OrderFormMobile).unwrap();
        assert_eq!(ranks(&state), [(SheetName::OrderForm, 0)]);
    }

    #[test]
    fn test_close_top_sheet_promotes_next() {
        let mut state = OverlayState::new();
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        state.open_sheet(SheetRequest::new(SheetName::OrderForm));

        let ticket = state.close_sheet(SheetName::OrderForm).unwrap();
        assert_eq!(ranks(&state), [(SheetName::OrderFormMobile, 0)]);
        assert!(!state.sheet(SheetName::OrderForm).unwrap().is_open);

        assert!(state.purge(ticket));
        assert!(state.sheet(SheetName::OrderForm).is_none());
        assert_eq!(state.active_sheets(), [SheetName::OrderFormMobile]);
    }

    #[test]
    fn test_reopen_open_sheet_moves_to_top_and_stays_dense() {
        let mut state = OverlayState::new();
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        state.open_sheet(SheetRequest::new(SheetName::OrderForm));
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));

        assert_eq!(state.top_sheet(), Some(SheetName::OrderFormMobile));
        assert_eq!(state.active_sheets().len(), 2);
        assert_dense(&state);
    }

    #[test]
    fn test_reopen_closing_sheet_discards_stale_purge() {
        let mut state = OverlayState::new();
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        state.open_sheet(SheetRequest::new(SheetName::OrderForm));
        let ticket = state.close_sheet(SheetName::OrderForm).unwrap();
        state.open_sheet(SheetRequest::new(SheetName::OrderForm));

        assert!(!state.purge(ticket));
        assert_eq!(state.top_sheet(), Some(SheetName::OrderForm));
        assert_dense(&state);
    }

    #[test]
    fn test_close_closing_sheet_is_noop() {
        let mut state = OverlayState::new();
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        state.open_sheet(SheetRequest::new(SheetName::OrderForm));
        state.close_sheet(SheetName::OrderForm).unwrap();

        assert!(state.close_sheet(SheetName::OrderForm).is_none());
        assert_eq!(ranks(&state), [(SheetName::OrderFormMobile, 0)]);
    }

    #[test]
    fn test_close_all_sheets() {
        let mut state = OverlayState::new();
        state.open_sheet(SheetRequest::new(SheetName::OrderFormMobile));
        state.open_sheet(SheetRequest::new(SheetName::OrderForm));

        let tickets = state.close_all_sheets();
        assert_eq!(tickets.len(), 2);
        assert!(state.active_sheets().is_empty());
        assert!(state.sheets().values().all(|s| !s.is_open));

        for ticket in tickets {
            assert!(state.purge(ticket));
        }
        assert!(state.sheets().is_empty());
    }

    #[test]
    fn test_density_holds_over_mixed_sequence() {
        let mut state = OverlayState::new();
        let ops: [(bool, SheetName); 8] = [
            (true, SheetName::OrderFormMobile),
            (true, SheetName::OrderForm),
            (false, SheetName::OrderFormMobile),
            (true, SheetName::OrderFormMobile),
            (true, SheetName::OrderForm),
            (false, SheetName::OrderForm),
            (false, SheetName::OrderForm),
            (true, SheetName::OrderForm),
        ];
        for (open, name) in ops {
            if open {
                state.open_sheet(SheetRequest::new(name));
                assert_eq!(state.top_sheet(), Some(name));
            } else {
                state.close_sheet(name);
            }
            assert_dense(&state);
        }
    }
}
