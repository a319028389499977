//! # Juice Shop Library
//!
//! Client-side orchestration core of the juice shop: the overlay store, the
//! cart store, the service bridge and the order submission flow.
//!
//! ## Module Organization
//! ```text
//! juice_shop_lib/
//! ├── lib.rs          ◄─── You are here (Shop wiring, logging, run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── overlay.rs  ◄─── Toasts, loader, modals, sheets + timers
//! │   ├── cart.rs     ◄─── In-progress order
//! │   └── storage.rs  ◄─── Local storage + order history
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── order.rs    ◄─── Submission payload + submit flow
//! ├── service.rs      ◄─── Static bridge for non-UI callers
//! ├── config.rs       ◄─── shop.toml + environment
//! └── error.rs        ◄─── ShopError
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod service;
pub mod state;

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use juice_core::{NewOrderItem, OrderInfoPatch};

use commands::{submit_order, DryRunSubmitter};
use config::ShopConfig;
use error::ShopResult;
use service::OverlayService;
use state::{CartStore, LocalStorage, OrderHistory, OverlayStore, OverlayTimings};

/// Everything one page session owns.
pub struct Shop {
    pub config: ShopConfig,
    pub overlay: OverlayStore,
    pub cart: CartStore,
    pub history: OrderHistory,
}

impl Shop {
    /// Builds the stores from configuration. Nothing is mounted yet.
    pub fn new(config: ShopConfig) -> Self {
        let overlay = OverlayStore::new(OverlayTimings::from(&config.overlay));
        let history = OrderHistory::new(LocalStorage::new(config.data_dir()));

        Shop {
            config,
            overlay,
            cart: CartStore::new(),
            history,
        }
    }

    /// Points `service` at this session's overlay store.
    pub fn mount(&self, service: &OverlayService) {
        self.overlay.mount(service);
        info!("Overlay store mounted");
    }
}

const DRY_RUN_ENDPOINT: &str = "https://localhost/dry-run";

/// Order file accepted by the command line entry point.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderFile {
    contact: String,
    ordered_by: String,
    items: Vec<NewOrderItem>,
}

/// Loads an order file into the cart and submits it.
///
/// There is no network transport in this crate: the payload goes through
/// [`DryRunSubmitter`], which logs it, and the success side effects (history
/// mirror, confirmation modal) run as they would after a real submission.
pub async fn run(order_path: PathBuf, config_path: Option<PathBuf>) -> ShopResult<()> {
    let mut config = ShopConfig::load(config_path)?;
    if config.endpoint_url().is_none() {
        warn!("No endpoint configured, submitting to a placeholder");
        config.endpoint.url = Some(DRY_RUN_ENDPOINT.to_string());
    }

    let shop = Shop::new(config);
    let service = OverlayService::global();
    shop.mount(service);

    let contents = std::fs::read_to_string(&order_path)?;
    let file: OrderFile = serde_json::from_str(&contents)?;
    shop.cart.update_order_info(OrderInfoPatch {
        contact: Some(file.contact),
        ordered_by: Some(file.ordered_by),
    });
    for item in file.items {
        shop.cart.add_order(item);
    }
    info!(
        items = shop.cart.item_count(),
        total = %shop.cart.total(),
        "Order loaded"
    );

    submit_order(&shop, service, &DryRunSubmitter).await?;

    info!(
        entries = shop.history.entries().len(),
        path = ?shop.history.storage().path(),
        "Order history updated"
    );
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=juice_shop_lib=trace` - Trace for this crate only
/// - Default: INFO, debug for the shop crate
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,juice_shop_lib=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
