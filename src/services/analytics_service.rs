use crate::analytics::{self, AnalyticsResult, KpiSet};
use crate::config::AnalyticsConfig;
use crate::database::AuditStore;
use crate::error::Result;
use crate::logging::{log_aggregation, log_error};
use crate::models::AggregationScope;
use crate::validation::{validate_scope, validate_window_days};
use chrono::{Duration, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Product analytics and dashboard KPIs over the audit store
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn AuditStore>,
    config: AnalyticsConfig,
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn AuditStore>, config: AnalyticsConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Aggregate recognized detections inside `scope`
    pub async fn compute_product_analytics(
        &self,
        scope: AggregationScope,
    ) -> Result<AnalyticsResult> {
        validate_scope(&scope)?;

        let started = Instant::now();
        let records = self
            .store
            .recognized_detections(&scope)
            .await
            .inspect_err(|e| log_error("compute_product_analytics", &e.to_string(), None))?;

        let result = analytics::aggregate(&records, &scope);

        debug!(
            duration_ms = started.elapsed().as_millis() as u64,
            brands = result.brands.len(),
            "Aggregated detections"
        );
        log_aggregation(
            scope.store_id,
            scope.chain.as_deref(),
            records.len(),
            result.products.len(),
            result.overall.rejected_prices,
        );

        Ok(result)
    }

    /// Compose the dashboard KPIs.
    ///
    /// The five counter reads run concurrently. If any one fails the whole
    /// call fails; partial KPI sets are never returned.
    pub async fn compose_kpis(&self, window_days: Option<u32>) -> Result<KpiSet> {
        let window_days = match window_days {
            Some(days) => validate_window_days(i64::from(days))?,
            None => self.config.recent_activity_days,
        };
        let since = Utc::now() - Duration::days(i64::from(window_days));

        let (tasks, performance, team, markets, mut recent) = tokio::try_join!(
            self.store.task_counts(),
            self.store.performance_counts(),
            self.store.team_counts(),
            self.store.market_counts(),
            self.store.recent_counts(since),
        )
        .inspect_err(|e| {
            log_error(
                "compose_kpis",
                &e.to_string(),
                Some(&format!("window_days={window_days}")),
            )
        })?;
        recent.window_days = window_days;

        let kpis = analytics::compose(&tasks, &performance, &team, &markets, &recent);
        debug!(
            window_days = window_days,
            completion_rate = kpis.completion_rate,
            market_coverage_rate = kpis.market_coverage_rate,
            "Composed KPIs"
        );

        Ok(kpis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{TaskCounts, TeamCounts};
    use crate::database::{MemoryAuditStore, StoreSource};
    use crate::error::AuditError;

    fn service(store: MemoryAuditStore) -> AnalyticsService {
        AnalyticsService::new(Arc::new(store), AnalyticsConfig::default())
    }

    #[tokio::test]
    async fn test_compose_kpis_fills_window() {
        let store = MemoryAuditStore::new()
            .with_task_counts(TaskCounts {
                total: 10,
                pending: 3,
                in_progress: 2,
                completed: 5,
                overdue: 1,
            })
            .with_team_counts(TeamCounts {
                total_agents: 4,
                active_agents: 2,
            });

        let kpis = service(store).compose_kpis(None).await.unwrap();
        assert_eq!(kpis.completion_rate, 50.0);
        assert_eq!(kpis.active_agent_rate, 50.0);
        assert_eq!(kpis.recent.window_days, 7);
    }

    #[tokio::test]
    async fn test_compose_kpis_fails_whole_on_any_source() {
        let store = MemoryAuditStore::new().failing(StoreSource::RecentCounts);
        let result = service(store).compose_kpis(Some(30)).await;
        assert!(matches!(result, Err(AuditError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_compose_kpis_rejects_bad_window() {
        let result = service(MemoryAuditStore::new()).compose_kpis(Some(0)).await;
        assert!(matches!(result, Err(AuditError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_invalid_scope_never_reads_store() {
        let store = MemoryAuditStore::new().failing(StoreSource::Detections);
        let result = service(store)
            .compute_product_analytics(AggregationScope::for_store(-1))
            .await;
        assert!(matches!(result, Err(AuditError::InvalidInput(_))));
    }
}
