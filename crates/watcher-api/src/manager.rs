//! WatcherManager — validation and persistence of watcher records.
//!
//! Sits between the HTTP handlers and the document store: create runs the
//! full validation pipeline, reads map stored documents to their external
//! form, and status updates / removals are forwarded to the store as-is.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use watcher_core::{ValidationConfig, WatcherError, WatcherId, WatcherView, validate_watcher};
use watcher_state::StateStore;

use crate::error::ApiResult;

/// Record manager shared by all request handlers.
#[derive(Clone)]
pub struct WatcherManager {
    store: StateStore,
    rules: Arc<ValidationConfig>,
}

impl WatcherManager {
    pub fn new(store: StateStore, rules: ValidationConfig) -> Self {
        Self {
            store,
            rules: Arc::new(rules),
        }
    }

    /// Validate `payload`, persist the normalized watcher, and return its id.
    pub fn create(&self, payload: &Value) -> ApiResult<WatcherId> {
        let document = validate_watcher(payload, &self.rules, Utc::now())?;
        let id = self.store.insert_watcher(&document)?;
        info!(%id, expire = %document.expire, "watcher created");
        Ok(id)
    }

    /// Fetch one watcher in its external form.
    pub fn get(&self, id: &str) -> ApiResult<WatcherView> {
        let stored = self
            .store
            .get_watcher(id)?
            .ok_or_else(|| WatcherError::NotFound(id.to_string()))?;
        Ok(stored.into_view())
    }

    /// Replace the stored status with the request body text.
    ///
    /// The body must be valid JSON but is stored verbatim, not the parsed
    /// value: a body of `{"status":"PAUSED"}` becomes that exact status
    /// string. Succeeds even when no watcher has this id.
    pub fn set_status(&self, id: &str, raw_body: &[u8]) -> ApiResult<()> {
        serde_json::from_slice::<Value>(raw_body)
            .map_err(|e| WatcherError::MalformedBody(e.to_string()))?;
        let status = std::str::from_utf8(raw_body)
            .map_err(|e| WatcherError::MalformedBody(e.to_string()))?;

        let matched = self.store.set_watcher_status(id, status)?;
        if !matched {
            debug!(%id, "status update matched no watcher");
        }
        Ok(())
    }

    /// Delete a watcher. Succeeds whether or not it existed.
    pub fn remove(&self, id: &str) -> ApiResult<()> {
        let existed = self.store.delete_watcher(id)?;
        if existed {
            info!(%id, "watcher removed");
        }
        Ok(())
    }

    /// Every watcher in the collection, in store order.
    pub fn list(&self) -> ApiResult<Vec<WatcherView>> {
        let watchers = self.store.list_watchers()?;
        Ok(watchers.into_iter().map(WatcherView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use chrono::{DateTime, NaiveDateTime};
    use serde_json::json;
    use watcher_core::mapping::TIMESTAMP_FORMAT;
    use watcher_state::StateError;

    fn test_manager() -> WatcherManager {
        let store = StateStore::open_in_memory().unwrap();
        WatcherManager::new(store, ValidationConfig::default())
    }

    fn ticket_payload() -> Value {
        json!({
            "scopeId": "s1",
            "namespace": "tdaf",
            "entityType": "ticket",
            "entityIds": ["e1", "e2"],
            "expire": 3600
        })
    }

    fn parse_ts(text: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn create_then_get() {
        let manager = test_manager();
        let before = Utc::now();
        let id = manager.create(&ticket_payload()).unwrap();
        assert!(!id.is_empty());

        let view = manager.get(&id).unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.scope_id, json!("s1"));
        assert_eq!(view.namespace, json!("tdaf"));
        assert_eq!(view.entity_type, json!("ticket"));
        assert_eq!(view.entity_ids, vec![json!("e1"), json!("e2")]);
        assert_eq!(view.status, "ACTIVE");
        assert_eq!(view.notification_count, None);

        let created = parse_ts(&view.created);
        let expire = parse_ts(&view.expire);
        assert!(created >= before - chrono::TimeDelta::microseconds(1));
        assert_eq!(expire - created, chrono::TimeDelta::seconds(3600));
    }

    #[test]
    fn create_rejects_invalid_payload_without_writing() {
        let manager = test_manager();
        let mut payload = ticket_payload();
        payload["id"] = json!("mine");

        let err = manager.create(&payload).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Watcher(WatcherError::ReadOnlyFieldSupplied("id"))
        ));
        assert!(manager.list().unwrap().is_empty());
    }

    #[test]
    fn get_missing_is_not_found() {
        let manager = test_manager();
        let id = manager.create(&ticket_payload()).unwrap();
        manager.remove(&id).unwrap();

        let err = manager.get(&id).unwrap_err();
        assert!(matches!(err, ApiError::Watcher(WatcherError::NotFound(_))));
    }

    #[test]
    fn get_malformed_id_is_format_error() {
        let manager = test_manager();
        let err = manager.get("not-an-id").unwrap_err();
        assert!(matches!(err, ApiError::Store(StateError::InvalidId(_))));
    }

    #[test]
    fn set_status_stores_raw_body() {
        let manager = test_manager();
        let id = manager.create(&ticket_payload()).unwrap();

        manager.set_status(&id, br#"{"status":"PAUSED"}"#).unwrap();
        assert_eq!(manager.get(&id).unwrap().status, r#"{"status":"PAUSED"}"#);

        manager.set_status(&id, br#""PAUSED""#).unwrap();
        assert_eq!(manager.get(&id).unwrap().status, r#""PAUSED""#);
    }

    #[test]
    fn set_status_requires_json_body() {
        let manager = test_manager();
        let id = manager.create(&ticket_payload()).unwrap();

        let err = manager.set_status(&id, b"PAUSED").unwrap_err();
        assert!(matches!(err, ApiError::Watcher(WatcherError::MalformedBody(_))));
        assert_eq!(manager.get(&id).unwrap().status, "ACTIVE");
    }

    #[test]
    fn set_status_on_missing_watcher_succeeds() {
        let manager = test_manager();
        let id = manager.create(&ticket_payload()).unwrap();
        manager.remove(&id).unwrap();

        assert!(manager.set_status(&id, br#""PAUSED""#).is_ok());
        assert!(manager.list().unwrap().is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let manager = test_manager();
        let id = manager.create(&ticket_payload()).unwrap();

        manager.remove(&id).unwrap();
        manager.remove(&id).unwrap();
    }

    #[test]
    fn list_returns_each_live_watcher_once() {
        let manager = test_manager();
        let a = manager.create(&ticket_payload()).unwrap();
        let b = manager.create(&ticket_payload()).unwrap();
        let c = manager.create(&ticket_payload()).unwrap();
        manager.remove(&b).unwrap();

        let mut ids: Vec<_> = manager.list().unwrap().into_iter().map(|w| w.id).collect();
        ids.sort();
        let mut expected = vec![a, c];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn notification_count_round_trips() {
        let manager = test_manager();
        let mut payload = ticket_payload();
        payload["notificationCount"] = json!(4);

        let id = manager.create(&payload).unwrap();
        assert_eq!(manager.get(&id).unwrap().notification_count, Some(4));

        payload["notificationCount"] = json!(u64::MAX);
        let id = manager.create(&payload).unwrap();
        assert_eq!(manager.get(&id).unwrap().notification_count, Some(u64::MAX));
    }
}
