//! Masterclass server entry point.
//!
//! Bootstraps the storage backend and shared state, then starts the Axum
//! HTTP server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use masterclass_storage::{MemoryBackend, StorageBackend};

use masterclass_server::config::{ServerConfig, StorageBackendType};
use masterclass_server::routes;
use masterclass_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(storage = ?config.storage_backend, "masterclass server starting");
    config.validate().context("invalid configuration")?;

    let state = build_app_state(&config)?;
    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        api = %format!("{}/masterclass-data", config.api_prefix),
        "masterclass server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("masterclass server stopped");
    Ok(())
}

/// Open the configured storage backend and build the shared state.
fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let storage: Arc<dyn StorageBackend> = match &config.storage_backend {
        StorageBackendType::Memory => {
            info!("using in-memory storage (data will not persist)");
            Arc::new(MemoryBackend::new())
        }
        #[cfg(feature = "rocksdb-backend")]
        StorageBackendType::RocksDb { path } => {
            info!(path = %path, "using RocksDB storage");
            Arc::new(
                masterclass_storage::RocksDbBackend::open(path)
                    .context("failed to open RocksDB storage")?,
            )
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StorageBackendType::RocksDb { .. } => {
            anyhow::bail!("RocksDB backend requested but feature 'rocksdb-backend' is not enabled");
        }
    };

    if config.api_key.is_none() {
        warn!("MASTERCLASS_API_KEY is not set, the content API accepts unauthenticated writes");
    }

    Ok(Arc::new(AppState::new(
        storage,
        config.api_key.clone(),
        config.api_prefix.clone(),
    )))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
