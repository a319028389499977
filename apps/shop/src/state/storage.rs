//! # Local Storage
//!
//! A JSON key-value file standing in for browser local storage, plus the
//! append-only history of submitted orders kept under the `orders` key.
//!
//! ## Failure Policy
//! Storage is a best-effort mirror. Every read or write failure (missing
//! permissions, corrupt JSON, a value of the wrong shape) is logged with
//! `error!` and swallowed: reads return `None`, writes return nothing.
//!
//! ```text
//!   storage.json
//!   {
//!     "orders": [
//!       { "timestamp": "2024-06-01T08:15:00Z",
//!         "order": { "contact": "...", "orderedBy": "...", "items": [...] } },
//!       ...
//!     ]
//!   }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

use juice_core::{Order, ORDER_HISTORY_KEY};

use crate::error::ShopResult;

const STORAGE_FILE: &str = "storage.json";

/// JSON-file key-value store.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Storage backed by `storage.json` inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        LocalStorage {
            path: dir.as_ref().join(STORAGE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and deserializes `key`. `None` if absent or on any failure.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get_item(key) {
            Ok(value) => value,
            Err(e) => {
                error!(key, path = ?self.path, "Failed to read local storage item: {}", e);
                None
            }
        }
    }

    /// Serializes `value` under `key`. Failures are logged only.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set_item(key, value) {
            error!(key, path = ?self.path, "Failed to write local storage item: {}", e);
        }
    }

    pub fn remove_item(&self, key: &str) {
        let result = self.load().and_then(|mut map| {
            if map.remove(key).is_some() {
                self.store(&map)?;
            }
            Ok(())
        });
        if let Err(e) = result {
            error!(key, path = ?self.path, "Failed to remove local storage item: {}", e);
        }
    }

    fn try_get_item<T: DeserializeOwned>(&self, key: &str) -> ShopResult<Option<T>> {
        let mut map = self.load()?;
        match map.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn try_set_item<T: Serialize>(&self, key: &str, value: &T) -> ShopResult<()> {
        let value = serde_json::to_value(value)?;
        let mut map = self.load()?;
        map.insert(key.to_string(), value);
        self.store(&map)
    }

    fn load(&self) -> ShopResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn store(&self, map: &Map<String, Value>) -> ShopResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }
}

/// One submitted order, as mirrored into storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub order: Order,
}

/// Append-only list of submitted orders.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    storage: LocalStorage,
}

impl OrderHistory {
    pub fn new(storage: LocalStorage) -> Self {
        OrderHistory { storage }
    }

    /// Appends `order` with the current time. Never trims.
    ///
    /// An unreadable history is treated as empty, like a failed
    /// `getItem`, so the next append starts a fresh list.
    pub fn append(&self, order: &Order) {
        let mut entries = self.entries();
        entries.push(HistoryEntry {
            timestamp: Utc::now(),
            order: order.clone(),
        });
        self.storage.set_item(ORDER_HISTORY_KEY, &entries);
        debug!(count = entries.len(), "Order mirrored to history");
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.storage
            .get_item(ORDER_HISTORY_KEY)
            .unwrap_or_default()
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}
