//! # Domain Types
//!
//! Types shared by the overlay store, the cart store and the UI tree.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Overlay                               Order                            │
//! │  ───────                               ─────                            │
//! │  ToastMessage ◄── ToastRequest         Order { contact, orderedBy }     │
//! │  ModalInstance ◄── ModalRequest          └── OrderItem[] ◄── NewOrderItem│
//! │  SheetInstance ◄── SheetRequest                 ▲                       │
//! │                                                 └── OrderItemPatch      │
//! │  Registry keys: ModalName, SheetName   Header: OrderInfoPatch           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Everything serializes camelCase because the UI tree reads these shapes
//! as-is (`showIcon`, `isOpen`, `orderedBy`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Toasts
// =============================================================================

/// Visual flavour of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl FromStr for ToastKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(ToastKind::Success),
            "error" => Ok(ToastKind::Error),
            "info" => Ok(ToastKind::Info),
            "warning" => Ok(ToastKind::Warning),
            other => Err(CoreError::UnknownName {
                kind: "toast type",
                value: other.to_string(),
            }),
        }
    }
}

/// A toast currently in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ToastMessage {
    /// Timestamp-derived id, unique within one store.
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ToastKind,

    pub message: String,

    pub show_icon: bool,
}

/// Arguments to `show_toast`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastRequest {
    #[serde(rename = "type")]
    pub kind: ToastKind,

    pub message: String,

    #[serde(default = "default_show_icon")]
    pub show_icon: bool,
}

fn default_show_icon() -> bool {
    true
}

impl ToastRequest {
    /// Creates a request with the icon shown.
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        ToastRequest {
            kind,
            message: message.into(),
            show_icon: true,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    /// Hides the leading icon.
    pub fn without_icon(mut self) -> Self {
        self.show_icon = false;
        self
    }
}

// =============================================================================
// Modals
// =============================================================================

/// Registry key for modal dialogs.
///
/// ## Render Registry
/// A name only produces UI if the render-dispatch map has an entry for it.
/// [`ModalName::is_rendered`] mirrors that map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ModalName {
    /// Shown after an order was submitted.
    OrderConfirm,
}

impl ModalName {
    pub const ALL: [ModalName; 1] = [ModalName::OrderConfirm];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModalName::OrderConfirm => "orderConfirm",
        }
    }

    /// Whether the render-dispatch map draws this modal.
    pub fn is_rendered(&self) -> bool {
        match self {
            ModalName::OrderConfirm => true,
        }
    }
}

impl fmt::Display for ModalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModalName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::UnknownName {
                kind: "modal",
                value: s.to_string(),
            })
    }
}

/// Width preset for a modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Sm,
    Md,
    Lg,
    Xl,
    Full,
}

/// Arguments to `open_modal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalRequest {
    pub name: ModalName,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub size: Option<ModalSize>,
}

impl ModalRequest {
    pub fn new(name: ModalName) -> Self {
        ModalRequest {
            name,
            data: None,
            size: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_size(mut self, size: ModalSize) -> Self {
        self.size = Some(size);
        self
    }
}

/// A registered modal.
///
/// `is_open` flips to false as soon as the modal starts closing; the entry
/// itself stays until it is purged so the exit animation still has its data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ModalInstance {
    #[ts(type = "unknown")]
    pub data: Option<Value>,

    pub size: Option<ModalSize>,

    pub is_open: bool,

    /// Bumped on every open; stale purges compare against it.
    #[serde(skip)]
    pub generation: u64,
}

// =============================================================================
// Sheets
// =============================================================================

/// Registry key for slide-in sheets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum SheetName {
    /// Order form on narrow screens.
    OrderFormMobile,

    /// Desktop order form. Call sites open it, but the render-dispatch map
    /// has no entry, so it never draws anything.
    OrderForm,
}

impl SheetName {
    pub const ALL: [SheetName; 2] = [SheetName::OrderFormMobile, SheetName::OrderForm];

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetName::OrderFormMobile => "orderFormMobile",
            SheetName::OrderForm => "orderForm",
        }
    }

    /// Whether the render-dispatch map draws this sheet.
    pub fn is_rendered(&self) -> bool {
        match self {
            SheetName::OrderFormMobile => true,
            SheetName::OrderForm => false,
        }
    }
}

impl fmt::Display for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SheetName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::UnknownName {
                kind: "sheet",
                value: s.to_string(),
            })
    }
}

/// Edge a sheet slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SheetSide {
    Left,
    Right,
}

/// Arguments to `open_sheet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRequest {
    pub name: SheetName,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub side: Option<SheetSide>,
}

impl SheetRequest {
    pub fn new(name: SheetName) -> Self {
        SheetRequest {
            name,
            data: None,
            side: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_side(mut self, side: SheetSide) -> Self {
        self.side = Some(side);
        self
    }
}

/// A registered sheet.
///
/// `order` is the recency rank: 0 is the sheet on top of the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SheetInstance {
    #[ts(type = "unknown")]
    pub data: Option<Value>,

    pub side: Option<SheetSide>,

    pub is_open: bool,

    pub order: u32,

    #[serde(skip)]
    pub generation: u64,
}

// =============================================================================
// Order Items
// =============================================================================

/// One line of the in-progress order.
///
/// `name` is the merge key: adding another item with the same name folds its
/// quantity into this row instead of appending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// UUID v4, assigned on first insertion.
    pub id: String,

    /// Display name of the drink; merge key.
    pub name: String,

    /// Menu option value selected in the form.
    pub value: String,

    pub quantity: u32,

    /// Unit price in đồng.
    pub price: Money,

    /// Requested delivery date as picked in the form.
    pub date: String,

    pub note: String,

    pub contact: String,

    pub ordered_by: String,
}

impl OrderItem {
    /// price × quantity
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// An order line before it has been given an id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub quantity: u32,
    pub price: Money,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub ordered_by: String,
}

impl NewOrderItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: Money) -> Self {
        NewOrderItem {
            name: name.into(),
            quantity,
            price,
            ..Default::default()
        }
    }

    pub(crate) fn into_item(self, id: String) -> OrderItem {
        OrderItem {
            id,
            name: self.name,
            value: self.value,
            quantity: self.quantity,
            price: self.price,
            date: self.date,
            note: self.note,
            contact: self.contact,
            ordered_by: self.ordered_by,
        }
    }
}

/// Partial update for a line item. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPatch {
    pub name: Option<String>,
    pub value: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Money>,
    pub date: Option<String>,
    pub note: Option<String>,
    pub contact: Option<String>,
    pub ordered_by: Option<String>,
}

impl OrderItemPatch {
    pub(crate) fn apply(self, item: &mut OrderItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(value) = self.value {
            item.value = value;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(date) = self.date {
            item.date = date;
        }
        if let Some(note) = self.note {
            item.note = note;
        }
        if let Some(contact) = self.contact {
            item.contact = contact;
        }
        if let Some(ordered_by) = self.ordered_by {
            item.ordered_by = ordered_by;
        }
    }
}

/// Partial update for the order header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfoPatch {
    pub contact: Option<String>,
    pub ordered_by: Option<String>,
}
