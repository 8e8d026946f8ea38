//! PostgreSQL implementation of [`AuditStore`].

use super::counters::CounterExecutor;
use super::AuditStore;
use crate::analytics::{MarketCounts, PerformanceCounts, RecentCounts, TaskCounts, TeamCounts};
use crate::error::Result;
use crate::models::{AggregationScope, DetectionRecord, DetectionRow, Task, TaskRow};
use crate::scopes::ScopeBuilder;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PgAuditStore {
    pool: PgPool,
    counters: CounterExecutor,
}

impl PgAuditStore {
    pub fn new(pool: PgPool) -> Self {
        let counters = CounterExecutor::new(pool.clone());
        Self { pool, counters }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn open_tasks_for_agent(&self, agent_id: i64) -> Result<Vec<Task>> {
        let started = Instant::now();
        let rows = TaskRow::scope()
            .open()
            .available_to(agent_id)
            .all(&self.pool)
            .await?;

        debug!(
            table = "audit_tasks",
            agent_id = agent_id,
            rows = rows.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Loaded candidate tasks"
        );

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn recognized_detections(
        &self,
        scope: &AggregationScope,
    ) -> Result<Vec<DetectionRecord>> {
        let started = Instant::now();
        let rows = DetectionRow::scope()
            .recognized()
            .within(scope)
            .all(&self.pool)
            .await?;

        debug!(
            table = "audit_detections",
            store_id = ?scope.store_id,
            chain = ?scope.chain,
            rows = rows.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Loaded recognized detections"
        );

        Ok(rows.into_iter().map(DetectionRecord::from).collect())
    }

    async fn task_counts(&self) -> Result<TaskCounts> {
        Ok(self.counters.task_counts().await?)
    }

    async fn performance_counts(&self) -> Result<PerformanceCounts> {
        Ok(self.counters.performance_counts().await?)
    }

    async fn team_counts(&self) -> Result<TeamCounts> {
        Ok(self.counters.team_counts().await?)
    }

    async fn market_counts(&self) -> Result<MarketCounts> {
        Ok(self.counters.market_counts().await?)
    }

    async fn recent_counts(&self, since: DateTime<Utc>) -> Result<RecentCounts> {
        Ok(self.counters.recent_counts(since).await?)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
