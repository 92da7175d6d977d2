//! StateStore — redb-backed document collection for watcher records.
//!
//! Each watcher is stored as a JSON document under a store-assigned id.
//! The store supports both on-disk and in-memory backends (the latter for
//! testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use tracing::debug;
use uuid::Uuid;
use watcher_core::config::StoreConfig;
use watcher_core::{StoredWatcher, WatcherDocument, WatcherId};

use crate::error::{StateError, StateResult};
use crate::tables;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe watcher store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
    collection: Arc<str>,
}

impl StateStore {
    /// Open (or create) a persistent store at the given path, using `collection`
    /// as the table holding watcher documents.
    pub fn open(path: &Path, collection: &str) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self {
            db: Arc::new(db),
            collection: Arc::from(collection),
        };
        store.ensure_collection()?;
        debug!(?path, collection, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing) using the default
    /// collection name.
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self {
            db: Arc::new(db),
            collection: Arc::from(StoreConfig::default().collection),
        };
        store.ensure_collection()?;
        debug!("in-memory state store opened");
        Ok(store)
    }

    /// Name of the collection this handle reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Release this handle. The database file is closed once the last clone
    /// is gone.
    pub fn close(self) {
        match Arc::try_unwrap(self.db) {
            Ok(db) => {
                drop(db);
                debug!(collection = %self.collection, "state store closed");
            }
            Err(_) => {
                debug!(collection = %self.collection, "state store handle released, others still open");
            }
        }
    }

    fn table(&self) -> TableDefinition<'_, &'static str, &'static [u8]> {
        tables::collection(&self.collection)
    }

    /// Create the collection table if it doesn't exist yet.
    fn ensure_collection(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(self.table()).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Watchers ───────────────────────────────────────────────────

    /// Insert a new watcher document and return the id assigned to it.
    pub fn insert_watcher(&self, doc: &WatcherDocument) -> StateResult<WatcherId> {
        let id = Uuid::new_v4().simple().to_string();
        let value = serde_json::to_vec(doc).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(self.table()).map_err(map_err!(Table))?;
            table
                .insert(id.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%id, "watcher stored");
        Ok(id)
    }

    /// Get a watcher by id.
    pub fn get_watcher(&self, id: &str) -> StateResult<Option<StoredWatcher>> {
        let key = parse_id(id)?;
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(self.table()).map_err(map_err!(Table))?;
        match table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let document: WatcherDocument =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(StoredWatcher { id: key, document }))
            }
            None => Ok(None),
        }
    }

    /// List every watcher in the collection, in key order.
    pub fn list_watchers(&self) -> StateResult<Vec<StoredWatcher>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(self.table()).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            let document: WatcherDocument =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(StoredWatcher {
                id: key.value().to_string(),
                document,
            });
        }
        Ok(results)
    }

    /// Overwrite the `status` field of a watcher. Returns true if it existed.
    pub fn set_watcher_status(&self, id: &str, status: &str) -> StateResult<bool> {
        let key = parse_id(id)?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let matched;
        {
            let mut table = txn.open_table(self.table()).map_err(map_err!(Table))?;
            let existing = table
                .get(key.as_str())
                .map_err(map_err!(Read))?
                .map(|guard| guard.value().to_vec());
            matched = existing.is_some();
            if let Some(bytes) = existing {
                let mut document: WatcherDocument =
                    serde_json::from_slice(&bytes).map_err(map_err!(Deserialize))?;
                document.status = status.to_string();
                let value = serde_json::to_vec(&document).map_err(map_err!(Serialize))?;
                table
                    .insert(key.as_str(), value.as_slice())
                    .map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, matched, "watcher status updated");
        Ok(matched)
    }

    /// Delete a watcher by id. Returns true if it existed.
    pub fn delete_watcher(&self, id: &str) -> StateResult<bool> {
        let key = parse_id(id)?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(self.table()).map_err(map_err!(Table))?;
            existed = table.remove(key.as_str()).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, existed, "watcher deleted");
        Ok(existed)
    }
}

/// Validate a client-supplied id and return the canonical key it maps to.
fn parse_id(id: &str) -> StateResult<String> {
    Uuid::try_parse(id)
        .map(|uuid| uuid.simple().to_string())
        .map_err(|_| StateError::InvalidId(id.to_string()))
}
