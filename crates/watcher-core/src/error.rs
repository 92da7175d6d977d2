//! Validation and lookup errors for watcher records.

use thiserror::Error;

/// Result type alias for watcher operations.
pub type WatcherResult<T> = Result<T, WatcherError>;

/// Errors raised while validating or resolving a watcher.
///
/// The first failing check wins; errors are never aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatcherError {
    #[error("{0} field is required")]
    MissingField(&'static str),

    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} must be one of [{allowed}], got {value}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("{0} field is read-only")]
    ReadOnlyFieldSupplied(&'static str),

    #[error("watcher not found: {0}")]
    NotFound(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl WatcherError {
    pub(crate) fn invalid_type(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidType { field, expected }
    }

    pub(crate) fn invalid_enum(field: &'static str, value: String, allowed: &[String]) -> Self {
        Self::InvalidEnumValue {
            field,
            value,
            allowed: allowed.join(", "),
        }
    }
}
