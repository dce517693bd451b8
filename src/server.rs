//! Server lifecycle: validate the loaded state, bind, serve until shutdown.
//!
//! The dataset handle is released when [`run`] returns, whether serving ended
//! normally or startup failed part way.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, SurfsUpError};
use crate::handlers::create_router;
use crate::logging::{log_dataset_stats, log_error};
use crate::state::AppState;

/// Serve `state` on the configured address until `shutdown` resolves
pub async fn run<F>(state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let result = serve(state.clone(), shutdown).await;
    if let Err(e) = &result {
        log_error(e, "Server stopped with an error");
    }

    state.store.close().await;
    result
}

async fn serve<F>(state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    state.validate()?;

    log_dataset_stats(&state.store.path().display().to_string(), &state.dataset);

    let host = state
        .config
        .server
        .host
        .parse::<IpAddr>()
        .map_err(|e| SurfsUpError::Config {
            message: format!("Invalid host address: {}", e),
        })?;
    let addr = SocketAddr::from((host, state.config.server.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}
