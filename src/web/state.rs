//! # Web API Application State
//!
//! Shared state for the handlers: the services, the store behind them and
//! the request timeout.

use crate::config::AuditConfig;
use crate::database::AuditStore;
use crate::error::Result;
use crate::services::{AnalyticsService, VisitTaskService};
use crate::web::response_types::{ApiError, ApiResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub visit_tasks: VisitTaskService,
    pub analytics: AnalyticsService,
    store: Arc<dyn AuditStore>,
    request_timeout: Duration,
    environment: Arc<str>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("request_timeout", &self.request_timeout)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn AuditStore>, config: &AuditConfig, environment: &str) -> Self {
        Self {
            visit_tasks: VisitTaskService::new(store.clone()),
            analytics: AnalyticsService::new(store.clone(), config.analytics.clone()),
            store,
            request_timeout: config.web.request_timeout(),
            environment: Arc::from(environment),
        }
    }

    /// State with default configuration, for tests and tooling
    pub fn from_store(store: Arc<dyn AuditStore>) -> Self {
        Self::new(store, &AuditConfig::default(), "test")
    }

    pub fn store(&self) -> &Arc<dyn AuditStore> {
        &self.store
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Run a service call under the request timeout, mapping errors for the API
    pub async fn execute<T, F>(&self, operation: &str, future: F) -> ApiResult<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.request_timeout, future).await {
            Ok(result) => result.map_err(ApiError::from),
            Err(_) => {
                warn!(
                    operation = operation,
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Request timed out"
                );
                Err(ApiError::Timeout)
            }
        }
    }
}
