//! watcher-state — document store for watcher records.
//!
//! Backed by [redb](https://docs.rs/redb). Each watcher is one JSON document
//! in a single collection table, keyed by a store-assigned identifier
//! (32 lowercase hex digits).
//!
//! The `StateStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and is opened once at startup, shared by request handlers, and closed
//! after the server stops.

pub mod error;
pub mod store;
pub mod tables;

pub use error::{StateError, StateResult};
pub use store::StateStore;
