//! watcher-core — domain types, validation, and configuration for the
//! watcher registry.
//!
//! A watcher records the intent to monitor a set of entities (namespace,
//! entity type, entity IDs) until an expiration time. This crate turns an
//! arbitrary client payload into the canonical stored form and maps stored
//! documents back to the external representation. It performs no I/O beyond
//! reading config files.

pub mod config;
pub mod error;
pub mod mapping;
pub mod types;
pub mod validate;

pub use config::{ValidationConfig, WatcherConfig};
pub use error::{WatcherError, WatcherResult};
pub use types::*;
pub use validate::validate_watcher;
