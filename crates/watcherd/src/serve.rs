//! Serve mode — opens the store, runs the REST API until Ctrl-C, then
//! closes the store.

use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use watcher_api::WatcherManager;
use watcher_core::WatcherConfig;
use watcher_state::StateStore;

/// Run the API server with the given configuration.
pub async fn run_serve(config: WatcherConfig) -> anyhow::Result<()> {
    info!("watcher daemon starting");

    // Ensure data directory exists.
    std::fs::create_dir_all(&config.store.data_dir)?;
    let db_path = config.store_path();

    let store = StateStore::open(&db_path, &config.store.collection)?;
    info!(path = ?db_path, collection = %config.store.collection, "state store opened");

    if !config.validation.enforce_namespaces {
        debug!(namespaces = ?config.validation.namespaces, "namespace allow-list not enforced");
    }

    let manager = WatcherManager::new(store.clone(), config.validation.clone());
    let router = watcher_api::build_router(manager);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "API server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close();
    info!("watcher daemon stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Keep serving; the process can still be killed externally.
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
