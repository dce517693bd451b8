//! surfsup - A read-only HTTP API over a SQLite climate dataset
//!
//! This is the main entry point for the surfsup application.

use tokio::signal;
use tracing::info;

use surfsup::{init_tracing, log_error, server};
use surfsup::{AppState, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, database_path) = Config::load()?;

    init_tracing(&config.log_level);

    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        log_error(&e, "Invalid configuration");
        e
    })?;

    info!("Opening dataset: {:?}", database_path);

    let state = AppState::load_shared(&database_path, config)
        .await
        .map_err(|e| {
            log_error(&e, "Failed to open dataset");
            e
        })?;

    // Closes the dataset on every exit path
    server::run(state, shutdown_signal()).await
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
