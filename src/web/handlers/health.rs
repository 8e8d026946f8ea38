//! # Health Check Handlers

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::error;

use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub environment: String,
    pub version: String,
    pub database_check_ms: u64,
}

/// Health check endpoint: GET /health
///
/// Returns 503 when the audit store cannot be reached.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let started = Instant::now();
    if let Err(e) = state.store().health_check().await {
        error!(error = %e, "Audit store health check failed");
        return Err(ApiError::ServiceUnavailable);
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        environment: state.environment().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database_check_ms: started.elapsed().as_millis() as u64,
    }))
}
