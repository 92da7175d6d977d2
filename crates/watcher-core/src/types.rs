//! Domain types for the watcher registry.
//!
//! `WatcherDocument` is the canonical stored form written to the document
//! store; `WatcherView` is what clients see. Identity fields supplied by the
//! client (`scopeId`, `namespace`, `entityType`, `entityIds` elements) are kept
//! as raw JSON values and passed through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store-assigned identifier of a watcher.
pub type WatcherId = String;

/// Status given to a watcher created without one.
pub const DEFAULT_STATUS: &str = "ACTIVE";

// ── Stored form ────────────────────────────────────────────────────

/// Normalized watcher as persisted in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatcherDocument {
    pub scope_id: Value,
    pub namespace: Value,
    pub entity_type: Value,
    /// Validated on create only; status updates store whatever text they carry.
    pub status: String,
    pub entity_ids: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_count: Option<u64>,
    /// Absolute expiration instant (creation time + requested seconds).
    pub expire: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

/// A stored document paired with the identifier the store keyed it under.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredWatcher {
    pub id: WatcherId,
    pub document: WatcherDocument,
}

// ── External form ──────────────────────────────────────────────────

/// Watcher as returned over the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatcherView {
    pub id: WatcherId,
    pub scope_id: Value,
    pub namespace: Value,
    pub entity_type: Value,
    pub status: String,
    pub entity_ids: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_count: Option<u64>,
    pub expire: String,
    pub created: String,
}
