//! API error type and its HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use watcher_core::WatcherError;
use watcher_state::StateError;

/// Result type alias for record manager and handler operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a watcher request can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Watcher(#[from] WatcherError),

    #[error(transparent)]
    Store(#[from] StateError),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl ApiError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Watcher(WatcherError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Watcher(_) => StatusCode::BAD_REQUEST,
            Self::Store(StateError::InvalidId(_)) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "watcher request failed");
        } else {
            warn!(error = %self, %status, "watcher request rejected");
        }
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
