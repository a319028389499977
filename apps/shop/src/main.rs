//! # Juice Shop Entry Point
//!
//! ```text
//! juice-shop <order.json> [shop.toml]
//! ```
//!
//! Loads the order file into the cart and runs the submission flow.
//!
//! ## Order File
//! ```json
//! {
//!   "contact": "0901234567",
//!   "orderedBy": "Lan",
//!   "items": [
//!     { "name": "Apple", "quantity": 2, "price": 20000, "date": "2024-06-01" }
//!   ]
//! }
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    juice_shop_lib::init_tracing();

    let mut args = std::env::args_os().skip(1);
    let Some(order_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: juice-shop <order.json> [shop.toml]");
        return ExitCode::from(2);
    };
    let config_path = args.next().map(PathBuf::from);

    match juice_shop_lib::run(order_path, config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
