//! # Retail Audit Server
//!
//! Serves the visit and analytics API over PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin audit-server
//!
//! # Run with a specific environment
//! AUDIT_ENV=production DATABASE_URL=postgresql://... cargo run --bin audit-server
//! ```

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use retail_audit_core::config::ConfigManager;
use retail_audit_core::database::{create_pool, PgAuditStore};
use retail_audit_core::logging;
use retail_audit_core::web::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let manager = ConfigManager::load().context("Failed to load configuration")?;
    let config = manager.config();

    logging::init_structured_logging(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = manager.environment(),
        build_mode = if cfg!(debug_assertions) { "debug" } else { "release" },
        "Starting retail audit server"
    );

    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to the audit database")?;
    let store = Arc::new(PgAuditStore::new(pool.clone()));
    let state = AppState::new(store, config, manager.environment());

    let address = config.web.socket_addr()?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "Web API listening");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;

    pool.close().await;
    info!("Retail audit server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
