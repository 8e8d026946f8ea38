//! # Aggregate Counters
//!
//! Pre-summed counters behind the dashboard KPIs. Each method is one query and
//! is independent of the others, so callers may run them concurrently.
//!
//! ```rust,no_run
//! use retail_audit_core::database::CounterExecutor;
//! # async fn example(pool: sqlx::PgPool) -> Result<(), sqlx::Error> {
//! let counters = CounterExecutor::new(pool);
//! let (tasks, team) = tokio::try_join!(counters.task_counts(), counters.team_counts())?;
//! println!("{} tasks, {} agents", tasks.total, team.total_agents);
//! # Ok(())
//! # }
//! ```

use crate::analytics::{MarketCounts, PerformanceCounts, RecentCounts, TaskCounts, TeamCounts};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, FromRow)]
struct TaskCountsRow {
    total: i64,
    pending: i64,
    in_progress: i64,
    completed: i64,
    overdue: i64,
}

#[derive(Debug, Clone, FromRow)]
struct PerformanceCountsRow {
    estimated_hours: f64,
    actual_hours: f64,
}

#[derive(Debug, Clone, FromRow)]
struct TeamCountsRow {
    total_agents: i64,
    active_agents: i64,
}

#[derive(Debug, Clone, FromRow)]
struct MarketCountsRow {
    total_markets: i64,
    visited_markets: i64,
}

#[derive(Debug, Clone, FromRow)]
struct RecentCountsRow {
    tasks_created: i64,
    tasks_completed: i64,
    photos_uploaded: i64,
    detections: i64,
    recognized_detections: i64,
}

/// Executes the counter queries against a pool
#[derive(Debug, Clone)]
pub struct CounterExecutor {
    pool: PgPool,
}

impl CounterExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Task totals by status, plus open tasks past their due date
    pub async fn task_counts(&self) -> Result<TaskCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, TaskCountsRow>(
            r#"
            SELECT
                COUNT(*)::BIGINT AS total,
                COUNT(*) FILTER (WHERE status = 'pending')::BIGINT AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress')::BIGINT AS in_progress,
                COUNT(*) FILTER (WHERE status = 'completed')::BIGINT AS completed,
                COUNT(*) FILTER (
                    WHERE status <> 'completed' AND due_date IS NOT NULL AND due_date < NOW()
                )::BIGINT AS overdue
            FROM audit_tasks
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(TaskCounts {
            total: row.total,
            pending: row.pending,
            in_progress: row.in_progress,
            completed: row.completed,
            overdue: row.overdue,
        })
    }

    /// Estimated and actual hours over completed tasks
    pub async fn performance_counts(&self) -> Result<PerformanceCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, PerformanceCountsRow>(
            r#"
            SELECT
                COALESCE(SUM(estimated_hours), 0)::FLOAT8 AS estimated_hours,
                COALESCE(SUM(actual_hours), 0)::FLOAT8 AS actual_hours
            FROM audit_tasks
            WHERE status = 'completed'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PerformanceCounts {
            estimated_hours: row.estimated_hours,
            actual_hours: row.actual_hours,
        })
    }

    pub async fn team_counts(&self) -> Result<TeamCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, TeamCountsRow>(
            r#"
            SELECT
                COUNT(*)::BIGINT AS total_agents,
                COUNT(*) FILTER (WHERE is_active)::BIGINT AS active_agents
            FROM audit_agents
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(TeamCounts {
            total_agents: row.total_agents,
            active_agents: row.active_agents,
        })
    }

    /// Stores overall, and stores with at least one uploaded photo
    pub async fn market_counts(&self) -> Result<MarketCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, MarketCountsRow>(
            r#"
            SELECT
                COUNT(*)::BIGINT AS total_markets,
                COUNT(*) FILTER (
                    WHERE EXISTS (
                        SELECT 1 FROM audit_photos
                        WHERE audit_photos.store_id = audit_stores.store_id
                    )
                )::BIGINT AS visited_markets
            FROM audit_stores
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(MarketCounts {
            total_markets: row.total_markets,
            visited_markets: row.visited_markets,
        })
    }

    pub async fn recent_counts(&self, since: DateTime<Utc>) -> Result<RecentCounts, sqlx::Error> {
        let row = sqlx::query_as::<_, RecentCountsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM audit_tasks WHERE created_at >= $1)::BIGINT
                    AS tasks_created,
                (SELECT COUNT(*) FROM audit_tasks
                    WHERE status = 'completed' AND updated_at >= $1)::BIGINT
                    AS tasks_completed,
                (SELECT COUNT(*) FROM audit_photos WHERE uploaded_at >= $1)::BIGINT
                    AS photos_uploaded,
                (SELECT COUNT(*) FROM audit_detections
                    INNER JOIN audit_photos ON audit_photos.photo_id = audit_detections.photo_id
                    WHERE audit_photos.processed_at >= $1)::BIGINT
                    AS detections,
                (SELECT COUNT(*) FROM audit_detections
                    INNER JOIN audit_photos ON audit_photos.photo_id = audit_detections.photo_id
                    WHERE audit_photos.processed_at >= $1
                      AND audit_detections.recognized = TRUE)::BIGINT
                    AS recognized_detections
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(RecentCounts {
            window_days: 0,
            tasks_created: row.tasks_created,
            tasks_completed: row.tasks_completed,
            photos_uploaded: row.photos_uploaded,
            detections: row.detections,
            recognized_detections: row.recognized_detections,
        })
    }
}
