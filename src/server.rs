//! Server assembly: store, service, router, and listener.

use std::net::SocketAddr;
use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http;
use crate::task::{
    adapters::sqlite::SqliteTaskRepository, ports::TaskRepositoryError,
    services::TaskLifecycleService,
};

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The task database could not be opened or initialised.
    #[error("failed to open task store: {0}")]
    Store(#[from] TaskRepositoryError),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was attempted.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Opens the configured store and serves the API until Ctrl-C.
///
/// # Errors
///
/// Returns [`ServerError`] when the store cannot be opened, the address
/// cannot be bound, or the accept loop fails.
pub async fn run(config: &ServerConfig) -> Result<(), ServerError> {
    let repository = SqliteTaskRepository::open(&config.database)?;
    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock))
        .with_creation_order(config.creation_order());
    let app = http::router(Arc::new(service), &config.static_dir);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let bound_addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(
        addr = %bound_addr,
        database = %config.database,
        created_order = ?config.created_order,
        "task tracker listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
