//! Route definitions grouped by functionality.

use axum::{routing::get, Router};

use crate::web::{handlers, state::AppState};

/// Health check routes for monitoring and load balancers
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

pub fn visit_routes() -> Router<AppState> {
    Router::new().route("/v1/visits/tasks", get(handlers::visits::get_visit_tasks))
}

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/analytics/products",
            get(handlers::analytics::get_product_analytics),
        )
        .route(
            "/v1/analytics/brands",
            get(handlers::analytics::get_brand_analytics),
        )
        .route("/v1/analytics/kpis", get(handlers::analytics::get_kpis))
}

/// Full application router with state applied
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(visit_routes())
        .merge(analytics_routes())
        .fallback(handlers::not_found)
        .with_state(state)
}
