//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the process-wide client endpoints exactly once
//! - Build the client router and the host server
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{env, AppConfig};
use crate::http::ShellServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::{create_router, RouteTableError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route table rejected: {0}")]
    Routes(#[from] RouteTableError),
    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the shell server until `shutdown` fires.
pub async fn start(config: AppConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let client = env::init(Some(&config.env)).clone();

    let router = create_router(&config.router)?;
    tracing::info!(
        base = %router.history().base(),
        history = ?config.router.history,
        routes = router.routes().len(),
        "Router ready"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = ShellServer::new(config, router, client);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
