//! # Services
//!
//! Async entry points that read from an [`AuditStore`](crate::database::AuditStore)
//! and hand the rows to the pure visit and analytics logic.

pub mod analytics_service;
pub mod visit_task_service;

pub use analytics_service::AnalyticsService;
pub use visit_task_service::VisitTaskService;
