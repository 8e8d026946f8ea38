//! # Detection Analytics
//!
//! Leaf-first:
//! - [`price`] parses free-text price tokens
//! - [`stats`] summarizes numeric sequences
//! - [`aggregator`] groups recognized detections into product and brand summaries
//! - [`kpi`] combines independent counters into dashboard ratios
//!
//! Everything here is pure and synchronous. Fetching rows is the job of
//! [`crate::database::AuditStore`]; the services layer wires the two together.

pub mod aggregator;
pub mod kpi;
pub mod price;
pub mod stats;

pub use aggregator::{aggregate, AnalyticsResult, BrandSummary, OverallSummary, ProductSummary};
pub use kpi::{
    compose, KpiSet, MarketCounts, PerformanceCounts, RecentCounts, TaskCounts, TeamCounts,
};
pub use price::{normalize, PriceRejection};
pub use stats::{summarize, PriceStats, StatSummary};

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.8333, 2), 0.83);
        assert_eq!(round_to(66.666, 1), 66.7);
        assert_eq!(round_to(0.0, 1), 0.0);
    }
}
