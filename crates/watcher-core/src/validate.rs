//! Watcher payload validation and normalization.
//!
//! Checks run in a fixed order and the first failure is returned:
//! `id` (read-only), `scopeId`, `namespace`, `entityType` presence, `status`,
//! `entityIds`, `notificationCount`, `expire`. Identity fields are copied
//! through unchanged; `expire` is converted from relative seconds into an
//! absolute instant.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{Map, Value};

use crate::config::ValidationConfig;
use crate::error::{WatcherError, WatcherResult};
use crate::types::{DEFAULT_STATUS, WatcherDocument};

/// Validate a raw client payload and build the document to store.
///
/// `now` is used both as the `created` stamp and as the base for `expire`.
pub fn validate_watcher(
    payload: &Value,
    rules: &ValidationConfig,
    now: DateTime<Utc>,
) -> WatcherResult<WatcherDocument> {
    let fields = payload
        .as_object()
        .ok_or_else(|| WatcherError::invalid_type("payload", "a JSON object"))?;

    if fields.contains_key("id") {
        return Err(WatcherError::ReadOnlyFieldSupplied("id"));
    }

    let scope_id = require(fields, "scopeId")?.clone();

    let namespace = require(fields, "namespace")?;
    if rules.enforce_namespaces {
        check_namespace(namespace, rules)?;
    }

    // Presence of entityType is checked before status; its value is taken after.
    let entity_type = require(fields, "entityType")?;
    let status = resolve_status(fields.get("status"), rules)?;

    let entity_ids = require(fields, "entityIds")?
        .as_array()
        .ok_or_else(|| WatcherError::invalid_type("entityIds", "a string list"))?
        .clone();

    let notification_count = fields
        .get("notificationCount")
        .map(notification_count)
        .transpose()?;

    let seconds = require(fields, "expire")?
        .as_i64()
        .ok_or_else(|| WatcherError::invalid_type("expire", "an integer"))?;
    let expire = TimeDelta::try_seconds(seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| WatcherError::invalid_type("expire", "within the representable time range"))?;

    Ok(WatcherDocument {
        scope_id,
        namespace: namespace.clone(),
        entity_type: entity_type.clone(),
        status,
        entity_ids,
        notification_count,
        expire,
        created: now,
    })
}

fn require<'a>(fields: &'a Map<String, Value>, field: &'static str) -> WatcherResult<&'a Value> {
    fields.get(field).ok_or(WatcherError::MissingField(field))
}

fn resolve_status(value: Option<&Value>, rules: &ValidationConfig) -> WatcherResult<String> {
    let status = match value {
        None => DEFAULT_STATUS,
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(WatcherError::invalid_enum("status", other.to_string(), &rules.statuses));
        }
    };
    if !rules.statuses.iter().any(|allowed| allowed == status) {
        return Err(WatcherError::invalid_enum("status", status.to_string(), &rules.statuses));
    }
    Ok(status.to_string())
}

fn check_namespace(value: &Value, rules: &ValidationConfig) -> WatcherResult<()> {
    let known = value
        .as_str()
        .is_some_and(|ns| rules.namespaces.iter().any(|allowed| allowed == ns));
    if known {
        Ok(())
    } else {
        let shown = value.as_str().map_or_else(|| value.to_string(), str::to_string);
        Err(WatcherError::invalid_enum("namespace", shown, &rules.namespaces))
    }
}

fn notification_count(value: &Value) -> WatcherResult<u64> {
    match (value.as_u64(), value.as_i64()) {
        (Some(count), _) if count >= 1 => Ok(count),
        (Some(_), _) | (None, Some(_)) => {
            Err(WatcherError::invalid_type("notificationCount", "greater than 0"))
        }
        (None, None) => Err(WatcherError::invalid_type("notificationCount", "an integer")),
    }
}
