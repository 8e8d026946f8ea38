//! # Web API
//!
//! Read-only HTTP surface over the audit services.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /health` | [`handlers::health::health_check`] |
//! | `GET /v1/visits/tasks` | [`handlers::visits::get_visit_tasks`] |
//! | `GET /v1/analytics/products` | [`handlers::analytics::get_product_analytics`] |
//! | `GET /v1/analytics/brands` | [`handlers::analytics::get_brand_analytics`] |
//! | `GET /v1/analytics/kpis` | [`handlers::analytics::get_kpis`] |

pub mod handlers;
pub mod response_types;
pub mod routes;
pub mod state;

pub use response_types::{ApiError, ApiResult};
pub use routes::app_router;
pub use state::AppState;
