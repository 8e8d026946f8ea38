//! # Data Access
//!
//! The audit core reads from an external relational store. [`AuditStore`] is
//! the read interface the services depend on; [`PgAuditStore`] implements it
//! over PostgreSQL and [`MemoryAuditStore`] over in-process vectors.
//!
//! ## Tables read
//!
//! - `audit_tasks` (see [`crate::models::task`])
//! - `audit_detections`, `audit_photos`, `audit_stores`
//! - `audit_agents` (`agent_id`, `is_active`)
//!
//! The store never writes. Errors are returned as
//! [`AuditError::DatabaseError`](crate::error::AuditError) and are not retried
//! here.

pub mod connection;
pub mod counters;
pub mod memory;
pub mod postgres;

pub use connection::create_pool;
pub use counters::CounterExecutor;
pub use memory::{MemoryAuditStore, StoreSource};
pub use postgres::PgAuditStore;

use crate::analytics::{MarketCounts, PerformanceCounts, RecentCounts, TaskCounts, TeamCounts};
use crate::error::Result;
use crate::models::{AggregationScope, DetectionRecord, Task};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Read interface over the audit tables
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Open tasks assigned to the agent or to nobody
    async fn open_tasks_for_agent(&self, agent_id: i64) -> Result<Vec<Task>>;

    /// Recognized detections inside the scope
    async fn recognized_detections(&self, scope: &AggregationScope)
        -> Result<Vec<DetectionRecord>>;

    async fn task_counts(&self) -> Result<TaskCounts>;

    async fn performance_counts(&self) -> Result<PerformanceCounts>;

    async fn team_counts(&self) -> Result<TeamCounts>;

    async fn market_counts(&self) -> Result<MarketCounts>;

    /// Activity since `since`; `window_days` is left for the caller to fill in
    async fn recent_counts(&self, since: DateTime<Utc>) -> Result<RecentCounts>;

    /// Cheap connectivity probe
    async fn health_check(&self) -> Result<()>;
}
