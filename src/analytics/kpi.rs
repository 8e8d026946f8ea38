//! # KPI Composition
//!
//! Combines counters from independent sources into the dashboard KPI set.
//! Every ratio guards its denominator: a zero denominator yields `0.0` for
//! that ratio only.

use super::round_to;
use crate::constants::analytics::PERCENT_DECIMALS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskCounts {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceCounts {
    pub estimated_hours: f64,
    pub actual_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamCounts {
    pub total_agents: i64,
    pub active_agents: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketCounts {
    pub total_markets: i64,
    pub visited_markets: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecentCounts {
    pub window_days: u32,
    pub tasks_created: i64,
    pub tasks_completed: i64,
    pub photos_uploaded: i64,
    pub detections: i64,
    pub recognized_detections: i64,
}

/// Dashboard KPIs. Rates are percentages rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_tasks: i64,
    pub open_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
    pub completion_rate: f64,
    pub hour_efficiency_rate: f64,
    pub market_coverage_rate: f64,
    pub active_agent_rate: f64,
    pub recognition_rate: f64,
    pub total_agents: i64,
    pub active_agents: i64,
    pub total_markets: i64,
    pub visited_markets: i64,
    pub recent: RecentCounts,
}

pub fn compose(
    tasks: &TaskCounts,
    performance: &PerformanceCounts,
    team: &TeamCounts,
    markets: &MarketCounts,
    recent: &RecentCounts,
) -> KpiSet {
    KpiSet {
        total_tasks: tasks.total,
        open_tasks: tasks.pending + tasks.in_progress,
        completed_tasks: tasks.completed,
        overdue_tasks: tasks.overdue,
        completion_rate: percentage(tasks.completed as f64, tasks.total as f64),
        hour_efficiency_rate: percentage(performance.estimated_hours, performance.actual_hours),
        market_coverage_rate: percentage(
            markets.visited_markets as f64,
            markets.total_markets as f64,
        ),
        active_agent_rate: percentage(team.active_agents as f64, team.total_agents as f64),
        recognition_rate: percentage(
            recent.recognized_detections as f64,
            recent.detections as f64,
        ),
        total_agents: team.total_agents,
        active_agents: team.active_agents,
        total_markets: markets.total_markets,
        visited_markets: markets.visited_markets,
        recent: *recent,
    }
}

/// `numerator / denominator` as a rounded percentage; 0 when the denominator is not positive
fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    round_to(numerator / denominator * 100.0, PERCENT_DECIMALS)
}
