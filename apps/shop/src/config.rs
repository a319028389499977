//! # Shop Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     JUICE_ENDPOINT_URL=https://script.google.com/macros/s/.../exec     │
//! │     JUICE_DATA_DIR=/var/lib/juice                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/juice-shop/shop.toml (Linux)                             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no endpoint, platform data dir, 3000 ms toasts, 200 ms purge       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [endpoint]
//! url = "https://script.google.com/macros/s/AKfy.../exec"
//!
//! [storage]
//! data_dir = "/var/lib/juice"
//!
//! [overlay]
//! toast_ttl_ms = 3000
//! purge_delay_ms = 200
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ShopError, ShopResult};

// =============================================================================
// Sections
// =============================================================================

/// Where submitted orders are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Base URL of the order-intake script.
    #[serde(default)]
    pub url: Option<String>,
}

/// Where the local storage file lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Overlay timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// How long a toast stays before auto-dismiss.
    #[serde(default = "default_toast_ttl")]
    pub toast_ttl_ms: u64,

    /// How long a closed modal/sheet stays registered for its exit animation.
    #[serde(default = "default_purge_delay")]
    pub purge_delay_ms: u64,
}

fn default_toast_ttl() -> u64 {
    3000
}

fn default_purge_delay() -> u64 {
    200
}

impl Default for OverlaySettings {
    fn default() -> Self {
        OverlaySettings {
            toast_ttl_ms: default_toast_ttl(),
            purge_delay_ms: default_purge_delay(),
        }
    }
}

impl OverlaySettings {
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    pub fn purge_delay(&self) -> Duration {
        Duration::from_millis(self.purge_delay_ms)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete shop configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub endpoint: EndpointSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub overlay: OverlaySettings,
}

impl ShopConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shop.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ShopResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shop config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ShopResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ShopError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Shop config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ShopResult<()> {
        if let Some(ref url) = self.endpoint.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ShopError::InvalidConfig(format!(
                    "Endpoint URL must start with http:// or https://, got: {}",
                    url
                )));
            }
        }

        if self.overlay.toast_ttl_ms == 0 {
            return Err(ShopError::InvalidConfig(
                "toast_ttl_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("JUICE_ENDPOINT_URL") {
            debug!(url = %url, "Overriding endpoint URL from environment");
            self.endpoint.url = Some(url);
        }

        if let Some(dir) = lookup("JUICE_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(ttl) = lookup("JUICE_TOAST_TTL_MS") {
            match ttl.parse::<u64>() {
                Ok(ms) => self.overlay.toast_ttl_ms = ms,
                Err(_) => warn!(value = %ttl, "Ignoring invalid JUICE_TOAST_TTL_MS"),
            }
        }

        if let Some(delay) = lookup("JUICE_PURGE_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.overlay.purge_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring invalid JUICE_PURGE_DELAY_MS"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "juice", "juice-shop")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("shop.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the endpoint URL if configured.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint.url.as_deref()
    }

    /// Directory holding the local storage file.
    ///
    /// Falls back to the working directory when the platform has no data
    /// directory.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
