//! REST API handlers.
//!
//! Each handler delegates to the `WatcherManager` and returns either a JSON
//! body or an `ApiError`, which renders itself as a JSON error response.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::Value;

use watcher_core::{WatcherError, WatcherView};

use crate::ApiState;
use crate::error::ApiResult;

/// Body returned by `POST /watcher`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Body returned by mutations that only acknowledge.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// POST /watcher
///
/// The body is parsed as JSON regardless of the request content type.
pub async fn create_watcher(
    State(state): State<ApiState>,
    body: Bytes,
) -> ApiResult<Json<CreatedResponse>> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|e| WatcherError::MalformedBody(e.to_string()))?;
    let id = state.manager.create(&payload)?;
    Ok(Json(CreatedResponse { id }))
}

/// GET /watcher/{id}
pub async fn get_watcher(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WatcherView>> {
    Ok(Json(state.manager.get(&id)?))
}

/// PUT /watcher/{id}/status
pub async fn set_watcher_status(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<SuccessResponse>> {
    state.manager.set_status(&id, &body)?;
    Ok(SuccessResponse::ok())
}

/// DELETE /watcher/{id}
pub async fn remove_watcher(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.manager.remove(&id)?;
    Ok(SuccessResponse::ok())
}

/// GET /watcher
pub async fn list_watchers(State(state): State<ApiState>) -> ApiResult<Json<Vec<WatcherView>>> {
    Ok(Json(state.manager.list()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;
    use watcher_core::ValidationConfig;
    use watcher_state::StateStore;

    use crate::WatcherManager;

    fn test_state() -> ApiState {
        let store = StateStore::open_in_memory().unwrap();
        ApiState {
            manager: WatcherManager::new(store, ValidationConfig::default()),
        }
    }

    fn ticket_body() -> Bytes {
        Bytes::from(
            json!({
                "scopeId": "s1",
                "namespace": "tdaf",
                "entityType": "ticket",
                "entityIds": ["e1"],
                "expire": 60
            })
            .to_string(),
        )
    }

    async fn create(state: &ApiState) -> String {
        let Json(created) = create_watcher(State(state.clone()), ticket_body())
            .await
            .unwrap();
        created.id
    }

    #[tokio::test]
    async fn list_watchers_empty() {
        let state = test_state();
        let resp = list_watchers(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_and_get_watcher() {
        let state = test_state();
        let id = create(&state).await;

        let resp = get_watcher(State(state.clone()), Path(id.clone())).await;
        let Json(view) = resp.unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.status, "ACTIVE");
    }

    #[tokio::test]
    async fn create_rejects_non_json_body() {
        let state = test_state();
        let resp = create_watcher(State(state), Bytes::from_static(b"scopeId=s1"))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_missing_field() {
        let state = test_state();
        let body = Bytes::from(json!({"scopeId": "s1"}).to_string());
        let resp = create_watcher(State(state), body).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_nonexistent_watcher() {
        let state = test_state();
        let id = create(&state).await;
        remove_watcher(State(state.clone()), Path(id.clone()))
            .await
            .unwrap();

        let resp = get_watcher(State(state), Path(id)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_malformed_id() {
        let state = test_state();
        let resp = get_watcher(State(state), Path("nope".to_string()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn set_status_acknowledges() {
        let state = test_state();
        let id = create(&state).await;

        let Json(ack) = set_watcher_status(
            State(state.clone()),
            Path(id.clone()),
            Bytes::from_static(br#"{"status":"PAUSED"}"#),
        )
        .await
        .unwrap();
        assert!(ack.success);

        let Json(view) = get_watcher(State(state), Path(id)).await.unwrap();
        assert_eq!(view.status, r#"{"status":"PAUSED"}"#);
    }

    #[tokio::test]
    async fn delete_nonexistent_watcher_succeeds() {
        let state = test_state();
        let id = create(&state).await;
        remove_watcher(State(state.clone()), Path(id.clone()))
            .await
            .unwrap();

        let resp = remove_watcher(State(state), Path(id)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
