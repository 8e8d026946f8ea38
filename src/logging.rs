//! # Structured Logging Module
//!
//! Environment-aware structured logging plus field helpers for the audit
//! operations, so every resolution and aggregation logs the same keys.

use crate::config::{ConfigManager, LoggingConfig};
use std::process;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = config
                .level
                .clone()
                .unwrap_or_else(|| default_log_level(&environment).to_string());
            EnvFilter::new(level)
        });

        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_current_span(false),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_level(true),
                )
                .try_init()
        };

        // A subscriber installed by the embedding process takes precedence
        if result.is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            pid = process::id(),
            environment = %environment,
            json = config.json,
            "Structured logging initialized"
        );
    });
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log the outcome of a visit-task resolution
pub fn log_resolution(agent_id: i64, candidates: usize, resolved: usize, has_hints: bool) {
    tracing::info!(
        operation = "resolve_visit_tasks",
        agent_id = agent_id,
        candidates = candidates,
        resolved = resolved,
        has_hints = has_hints,
        "VISIT_RESOLUTION"
    );
}

/// Log the outcome of a product aggregation
pub fn log_aggregation(
    store_id: Option<i64>,
    chain: Option<&str>,
    records: usize,
    products: usize,
    rejected_prices: usize,
) {
    tracing::info!(
        operation = "compute_product_analytics",
        store_id = store_id,
        chain = chain,
        records = records,
        products = products,
        rejected_prices = rejected_prices,
        "PRODUCT_AGGREGATION"
    );
}

/// Log an error with its operation context
pub fn log_error(operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        operation = %operation,
        error = %error,
        context = context,
        "AUDIT_ERROR"
    );
}
