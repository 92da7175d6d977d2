//! watcher-api — REST API for the watcher registry.
//!
//! Provides the [`WatcherManager`] (validation + persistence) and the axum
//! routes that expose it.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/watcher` | List all watchers |
//! | POST | `/watcher` | Create a watcher |
//! | GET | `/watcher/{id}` | Get a watcher |
//! | DELETE | `/watcher/{id}` | Delete a watcher |
//! | PUT | `/watcher/{id}/status` | Replace a watcher's status with the raw body |

pub mod error;
pub mod handlers;
pub mod manager;

use axum::Router;
use axum::routing::{get, put};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use manager::WatcherManager;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub manager: WatcherManager,
}

/// Build the watcher API router.
pub fn build_router(manager: WatcherManager) -> Router {
    let state = ApiState { manager };

    Router::new()
        .route("/watcher", get(handlers::list_watchers).post(handlers::create_watcher))
        .route("/watcher/{id}", get(handlers::get_watcher).delete(handlers::remove_watcher))
        .route("/watcher/{id}/status", put(handlers::set_watcher_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
