//! HTTP server lifecycle

use crate::api::router::build_router;
use crate::api::state::AppState;
use crate::config::ServerConfig;
use crate::domain::{FichaError, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::{oneshot, watch};

/// Serve the API until `shutdown` flips to `true`
///
/// In-flight requests get `shutdown_timeout_seconds` to finish once the
/// signal arrives; after that the server task is dropped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(
    config: &ServerConfig,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        FichaError::Configuration(format!(
            "Invalid bind_address '{}': {}",
            config.bind_address, e
        ))
    })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| FichaError::Io(format!("Failed to bind {addr}: {e}")))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Ficha API listening");

    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let router = build_router(state);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => return flatten(joined),
        _ = wait_for_shutdown(&mut shutdown) => {}
    }

    tracing::info!("Shutdown requested, draining in-flight requests");
    let _ = drain_tx.send(());

    let grace = Duration::from_secs(config.shutdown_timeout_seconds);
    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            tracing::warn!(
                timeout_seconds = config.shutdown_timeout_seconds,
                "Requests still running after shutdown timeout, aborting"
            );
            server.abort();
            Ok(())
        }
    }
}

async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            // Sender gone: nobody can request shutdown any more.
            std::future::pending::<()>().await;
        }
    }
}

fn flatten(
    joined: std::result::Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match joined {
        Ok(Ok(())) => {
            tracing::info!("Server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(FichaError::Io(format!("Server error: {e}"))),
        Err(e) => Err(FichaError::Other(format!("Server task failed: {e}"))),
    }
}
