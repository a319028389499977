//! # Shop Error Type
//!
//! Unified error type for the application layer.
//!
//! ## Where Errors Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shop                               │
//! │                                                                         │
//! │  Store actions (open/close/add/remove)   never fail, unknown = no-op    │
//! │                                                                         │
//! │  Local storage                            logged + swallowed            │
//! │    read  ──► ShopError ──► error!() ──► None                            │
//! │    write ──► ShopError ──► error!() ──► ()                              │
//! │                                                                         │
//! │  Config load                              returned to the caller        │
//! │                                                                         │
//! │  Order submission                         returned to the form layer    │
//! │    submitter rejects ──► SubmissionFailed ──► caller's error path       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use juice_core::CoreError;
use thiserror::Error;

/// Result type alias for shop operations.
pub type ShopResult<T> = Result<T, ShopError>;

/// Application-layer error.
#[derive(Debug, Error)]
pub enum ShopError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid shop configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // =========================================================================
    // Submission Errors
    // =========================================================================
    /// Nothing to submit.
    #[error("Order has no items")]
    EmptyOrder,

    /// The submitter rejected. No retry is attempted.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        ShopError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        ShopError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ShopError {
    fn from(err: toml::de::Error) -> Self {
        ShopError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ShopError {
    fn from(err: toml::ser::Error) -> Self {
        ShopError::ConfigSaveFailed(err.to_string())
    }
}
