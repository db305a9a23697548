//! HTTP server exposing the gateway.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

pub mod handlers;
pub mod routes;

pub use handlers::SharedService;
pub use routes::create_router;

use crate::config::Config;

/// Bind the configured address and serve until ctrl-c.
pub async fn serve(config: &Config, service: SharedService) -> Result<()> {
    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", config.listen_addr))?;

    info!("Starting HTTP server at {}", listener.local_addr()?);

    let router = create_router(service, Duration::from_secs(config.http_timeout_secs));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
