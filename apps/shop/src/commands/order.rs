//! # Order Submission
//!
//! Sends the cart to the order-intake endpoint and runs the success side
//! effects.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore.snapshot() ──► empty? ──► Err(EmptyOrder)                    │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  build_submission() ──► one row per item, contact/orderedBy copied in   │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  service.show_loader()                                                  │
//! │  submitter.submit(endpoint, rows)          single attempt, no retry     │
//! │  service.hide_loader()                                                  │
//! │          │                                                              │
//! │     ┌────┴─────┐                                                        │
//! │     ▼          ▼                                                        │
//! │   Ok(())     Err(e) ──► returned to the form layer, nothing else runs   │
//! │     │                                                                   │
//! │     ├──► OrderHistory.append(order)                                     │
//! │     └──► OverlayStore.open_modal(orderConfirm, data = order)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The endpoint is opaque: success means the submitter's future resolved
//! `Ok`. No status code is inspected.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use juice_core::{ModalName, ModalRequest, Money, Order};

use crate::error::{ShopError, ShopResult};
use crate::service::OverlayService;
use crate::Shop;

/// One row of the submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    pub name: String,
    pub value: String,
    pub quantity: u32,
    pub price: Money,
    pub date: String,
    pub note: String,
    pub contact: String,
    pub ordered_by: String,
}

/// Flattens an order into rows, copying the header's contact fields into
/// every row.
pub fn build_submission(order: &Order) -> Vec<SubmissionRow> {
    order
        .items
        .iter()
        .map(|item| SubmissionRow {
            name: item.name.clone(),
            value: item.value.clone(),
            quantity: item.quantity,
            price: item.price,
            date: item.date.clone(),
            note: item.note.clone(),
            contact: order.contact.clone(),
            ordered_by: order.ordered_by.clone(),
        })
        .collect()
}

/// Transport for the submission body.
pub trait OrderSubmitter {
    /// Sends `rows` to `endpoint` once.
    fn submit(
        &self,
        endpoint: &str,
        rows: &[SubmissionRow],
    ) -> impl Future<Output = ShopResult<()>> + Send;
}

/// Serializes the payload and logs it instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSubmitter;

impl OrderSubmitter for DryRunSubmitter {
    async fn submit(&self, endpoint: &str, rows: &[SubmissionRow]) -> ShopResult<()> {
        let body = serde_json::to_string(rows)?;
        info!(endpoint, rows = rows.len(), %body, "Dry run, order not sent");
        Ok(())
    }
}

/// Submits the current cart.
///
/// Returns the submitted order on success. The cart itself is left as is;
/// resetting it is up to the caller once the confirmation is acknowledged.
pub async fn submit_order<S: OrderSubmitter>(
    shop: &Shop,
    service: &OverlayService,
    submitter: &S,
) -> ShopResult<Order> {
    let order = shop.cart.snapshot();
    if order.is_empty() {
        return Err(ShopError::EmptyOrder);
    }

    let endpoint = shop
        .config
        .endpoint_url()
        .ok_or_else(|| ShopError::InvalidConfig("endpoint url is not configured".into()))?;

    let rows = build_submission(&order);
    let confirmation = serde_json::to_value(&order)?;

    info!(items = rows.len(), total = %order.total(), "Submitting order");

    service.show_loader();
    let result = submitter.submit(endpoint, &rows).await;
    service.hide_loader();

    if let Err(e) = result {
        warn!("Order submission failed: {}", e);
        return Err(e);
    }

    shop.history.append(&order);
    shop.overlay
        .open_modal(ModalRequest::new(ModalName::OrderConfirm).with_data(confirmation));

    info!("Order submitted");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;
    use crate::state::OverlayStore;
    use juice_core::{NewOrderItem, OrderInfoPatch};
    use std::sync::Mutex;

    struct RecordingSubmitter {
        overlay: OverlayStore,
        fail: bool,
        seen: Mutex<Vec<(String, Vec<SubmissionRow>, bool)>>,
    }

    impl RecordingSubmitter {
        fn new(overlay: &OverlayStore, fail: bool) -> Self {
            RecordingSubmitter {
                overlay: overlay.clone(),
                fail,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl OrderSubmitter for RecordingSubmitter {
        async fn submit(&self, endpoint: &str, rows: &[SubmissionRow]) -> ShopResult<()> {
            self.seen.lock().unwrap().push((
                endpoint.to_string(),
                rows.to_vec(),
                self.overlay.is_loading(),
            ));
            if self.fail {
                Err(ShopError::SubmissionFailed("connection reset".into()))
            } else {
                Ok(())
            }
        }
    }

    fn test_shop() -> (Shop, OverlayService) {
        let mut config = ShopConfig::default();
        config.endpoint.url = Some("https://example.com/exec".to_string());
        config.storage.data_dir = Some(
            std::env::temp_dir().join(format!("juice-shop-{}", uuid::Uuid::new_v4())),
        );

        let shop = Shop::new(config);
        let service = OverlayService::new();
        shop.mount(&service);

        shop.cart.update_order_info(OrderInfoPatch {
            contact: Some("0901234567".to_string()),
            ordered_by: Some("Lan".to_string()),
        });
        (shop, service)
    }

    #[test]
    fn test_build_submission_copies_header_into_rows() {
        let mut order = Order::new();
        order.update_info(OrderInfoPatch {
            contact: Some("0901234567".to_string()),
            ordered_by: Some("Lan".to_string()),
        });
        order.add_item(NewOrderItem::new("Apple", 2, Money::from_dong(20_000)));
        order.add_item(NewOrderItem::new("Orange", 1, Money::from_dong(25_000)));

        let rows = build_submission(&order);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.contact == "0901234567" && r.ordered_by == "Lan"));

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["orderedBy"], "Lan");
        assert_eq!(json[1]["price"], 25_000);
        assert!(json[0].get("id").is_none());
    }

    #[tokio::test]
    async fn test_successful_submission_mirrors_and_confirms() {
        let (shop, service) = test_shop();
        shop.cart
            .add_order(NewOrderItem::new("Apple", 2, Money::from_dong(20_000)));
        let submitter = RecordingSubmitter::new(&shop.overlay, false);

        let order = submit_order(&shop, &service, &submitter).await.unwrap();

        let seen = submitter.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "https://example.com/exec");
        assert_eq!(seen[0].1.len(), 1);
        assert!(seen[0].2, "loader visible while submitting");

        assert!(!shop.overlay.is_loading());
        let entries = shop.history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].order, order);

        let modal = shop.overlay.modal(ModalName::OrderConfirm).unwrap();
        assert!(modal.is_open);
        assert_eq!(modal.data.unwrap()["orderedBy"], "Lan");
        assert_eq!(shop.cart.item_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_has_no_side_effects() {
        let (shop, service) = test_shop();
        shop.cart
            .add_order(NewOrderItem::new("Apple", 1, Money::from_dong(20_000)));
        let submitter = RecordingSubmitter::new(&shop.overlay, true);

        let err = submit_order(&shop, &service, &submitter).await.unwrap_err();

        assert!(matches!(err, ShopError::SubmissionFailed(_)));
        assert_eq!(submitter.seen.lock().unwrap().len(), 1);
        assert!(!shop.overlay.is_loading());
        assert!(shop.history.entries().is_empty());
        assert!(shop.overlay.modal(ModalName::OrderConfirm).is_none());
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_before_submitting() {
        let (shop, service) = test_shop();
        let submitter = RecordingSubmitter::new(&shop.overlay, false);

        let err = submit_order(&shop, &service, &submitter).await.unwrap_err();
        assert!(matches!(err, ShopError::EmptyOrder));
        assert!(submitter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let (mut shop, service) = test_shop();
        shop.config.endpoint.url = None;
        shop.cart
            .add_order(NewOrderItem::new("Apple", 1, Money::from_dong(20_000)));

        let err = submit_order(&shop, &service, &DryRunSubmitter)
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_dry_run_submitter() {
        let (shop, service) = test_shop();
        shop.cart
            .add_order(NewOrderItem::new("Apple", 1, Money::from_dong(20_000)));

        submit_order(&shop, &service, &DryRunSubmitter).await.unwrap();
        assert_eq!(shop.history.entries().len(), 1);
    }
}
