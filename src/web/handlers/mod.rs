//! # Web API Handlers
//!
//! Handlers take [`AppState`](crate::web::AppState) and query parameters and
//! return presentation types. Rounding to display precision happens here.

pub mod analytics;
pub mod health;
pub mod visits;

use crate::web::response_types::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
