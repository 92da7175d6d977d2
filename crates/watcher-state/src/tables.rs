//! redb table definitions for the watcher store.
//!
//! A collection is a table of `&str` keys (watcher ids) and `&[u8]` values
//! (JSON-serialized `WatcherDocument`s). The table name is the configured
//! collection name.

use redb::TableDefinition;

/// Table definition for the named collection.
pub fn collection(name: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(name)
}
