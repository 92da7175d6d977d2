//! Stored → external mapping.

use chrono::{DateTime, Utc};

use crate::types::{StoredWatcher, WatcherView};

/// Text layout used for `expire` and `created` in API responses (UTC, no offset).
///
/// Always carries six fractional digits, including `.000000` on whole
/// seconds, so every timestamp has the same width.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Render a timestamp the way API responses carry it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

impl StoredWatcher {
    /// Convert to the external representation: the store key becomes `id`
    /// and both timestamps are rendered as text.
    pub fn into_view(self) -> WatcherView {
        let doc = self.document;
        WatcherView {
            id: self.id,
            scope_id: doc.scope_id,
            namespace: doc.namespace,
            entity_type: doc.entity_type,
            status: doc.status,
            entity_ids: doc.entity_ids,
            notification_count: doc.notification_count,
            expire: format_timestamp(&doc.expire),
            created: format_timestamp(&doc.created),
        }
    }
}

impl From<StoredWatcher> for WatcherView {
    fn from(stored: StoredWatcher) -> Self {
        stored.into_view()
    }
}
