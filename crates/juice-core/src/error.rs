//! # Error Types
//!
//! Domain errors for juice-core.
//!
//! Almost every store operation is total: closing an unknown toast, modal or
//! sheet is a silent no-op and removing a missing cart line leaves the order
//! unchanged. Errors only appear at the edges where untyped input (names
//! coming from call sites as strings) is turned into typed identifiers.

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string did not name any known registry entry.
    ///
    /// `kind` is the registry being looked up ("modal", "sheet", "toast type").
    #[error("Unknown {kind} name: '{value}'")]
    UnknownName { kind: &'static str, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
