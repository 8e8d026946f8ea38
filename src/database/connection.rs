use crate::config::DatabaseConfig;
use crate::error::{AuditError, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};

/// Create the PostgreSQL pool described by the configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout = config.acquire_timeout_seconds,
        idle_timeout = config.idle_timeout_seconds,
        "Creating database pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .test_before_acquire(true)
        .connect(&config.url)
        .await
        .map_err(|e| AuditError::DatabaseError(format!("Failed to create database pool: {e}")))?;

    info!(
        database = %config.redacted_url(),
        max_connections = config.max_connections,
        "Database pool ready"
    );

    Ok(pool)
}
