//! In-process [`AuditStore`] backed by plain vectors.
//!
//! Used by tests and local tooling. Reads apply the same filters the SQL
//! scopes apply, and any single source can be made to fail.

use super::AuditStore;
use crate::analytics::{MarketCounts, PerformanceCounts, RecentCounts, TaskCounts, TeamCounts};
use crate::error::{AuditError, Result};
use crate::models::{AggregationScope, DetectionRecord, Task};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// One read the store can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreSource {
    Tasks,
    Detections,
    TaskCounts,
    PerformanceCounts,
    TeamCounts,
    MarketCounts,
    RecentCounts,
    Health,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryAuditStore {
    tasks: Vec<Task>,
    detections: Vec<DetectionRecord>,
    task_counts: TaskCounts,
    performance_counts: PerformanceCounts,
    team_counts: TeamCounts,
    market_counts: MarketCounts,
    recent_counts: RecentCounts,
    failing: HashSet<StoreSource>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_detections(mut self, detections: Vec<DetectionRecord>) -> Self {
        self.detections = detections;
        self
    }

    pub fn with_task_counts(mut self, counts: TaskCounts) -> Self {
        self.task_counts = counts;
        self
    }

    pub fn with_performance_counts(mut self, counts: PerformanceCounts) -> Self {
        self.performance_counts = counts;
        self
    }

    pub fn with_team_counts(mut self, counts: TeamCounts) -> Self {
        self.team_counts = counts;
        self
    }

    pub fn with_market_counts(mut self, counts: MarketCounts) -> Self {
        self.market_counts = counts;
        self
    }

    pub fn with_recent_counts(mut self, counts: RecentCounts) -> Self {
        self.recent_counts = counts;
        self
    }

    /// Make every read of `source` return a database error
    pub fn failing(mut self, source: StoreSource) -> Self {
        self.failing.insert(source);
        self
    }

    fn check(&self, source: StoreSource) -> Result<()> {
        if self.failing.contains(&source) {
            return Err(AuditError::DatabaseError(format!(
                "{source:?} source unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn open_tasks_for_agent(&self, agent_id: i64) -> Result<Vec<Task>> {
        self.check(StoreSource::Tasks)?;
        Ok(self
            .tasks
            .iter()
            .filter(|task| task.is_open() && task.is_available_to(agent_id))
            .cloned()
            .collect())
    }

    async fn recognized_detections(
        &self,
        scope: &AggregationScope,
    ) -> Result<Vec<DetectionRecord>> {
        self.check(StoreSource::Detections)?;
        Ok(self
            .detections
            .iter()
            .filter(|record| record.recognized && scope.matches(record))
            .cloned()
            .collect())
    }

    async fn task_counts(&self) -> Result<TaskCounts> {
        self.check(StoreSource::TaskCounts)?;
        Ok(self.task_counts)
    }

    async fn performance_counts(&self) -> Result<PerformanceCounts> {
        self.check(StoreSource::PerformanceCounts)?;
        Ok(self.performance_counts)
    }

    async fn team_counts(&self) -> Result<TeamCounts> {
        self.check(StoreSource::TeamCounts)?;
        Ok(self.team_counts)
    }

    async fn market_counts(&self) -> Result<MarketCounts> {
        self.check(StoreSource::MarketCounts)?;
        Ok(self.market_counts)
    }

    async fn recent_counts(&self, _since: DateTime<Utc>) -> Result<RecentCounts> {
        self.check(StoreSource::RecentCounts)?;
        Ok(self.recent_counts)
    }

    async fn health_check(&self) -> Result<()> {
        self.check(StoreSource::Health)
    }
}
