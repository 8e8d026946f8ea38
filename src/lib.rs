#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Retail Audit Core
//!
//! Backend core for field-retail auditing: field agents visit stores, work
//! through assigned tasks and photograph shelves; an external detector turns
//! those photos into product detections.
//!
//! ## Overview
//!
//! Two read paths live here:
//!
//! - **Visit task resolution**: which open tasks an agent should see while
//!   visiting a particular chain, store and area
//! - **Detection analytics**: per-product and per-brand summaries of
//!   recognized detections, with free-text shelf prices normalized into
//!   decimals, plus the dashboard KPIs
//!
//! ## Module Organization
//!
//! - [`models`] - Tasks, detections, visit contexts and the `ScopeField` wildcard
//! - [`visits`] - Pure visit task resolution
//! - [`analytics`] - Price normalization, statistics, aggregation and KPI composition
//! - [`scopes`] - Query scopes over the audit tables
//! - [`database`] - The `AuditStore` read interface and its PostgreSQL and in-memory implementations
//! - [`services`] - Async entry points combining the store with the pure logic
//! - [`web`] - Axum handlers and routes
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retail_audit_core::database::MemoryAuditStore;
//! use retail_audit_core::models::VisitContext;
//! use retail_audit_core::services::VisitTaskService;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = VisitTaskService::new(Arc::new(MemoryAuditStore::new()));
//! let tasks = service
//!     .resolve_visit_tasks(VisitContext::for_agent(7).with_chain("X"))
//!     .await?;
//! println!("{} tasks for this visit", tasks.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit, integration and property tests
//! ```

pub mod analytics;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod scopes;
pub mod services;
pub mod validation;
pub mod visits;
pub mod web;

pub use analytics::{AnalyticsResult, KpiSet};
pub use config::{AuditConfig, ConfigManager};
pub use constants::{TaskPriority, TaskStatus};
pub use database::{AuditStore, MemoryAuditStore, PgAuditStore};
pub use error::{AuditError, Result};
pub use models::{AggregationScope, DetectionRecord, ScopeField, Task, VisitContext};
pub use services::{AnalyticsService, VisitTaskService};
