//! # System Constants
//!
//! Task lifecycle enums and the operational defaults shared across the
//! resolver, the analytics layer and the web API.

use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Open tasks are the only ones a visit can surface
    pub fn is_open(&self) -> bool {
        status_groups::OPEN_STATUSES.contains(self)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(AuditError::InvalidInput(format!(
                "Unknown task status: {other}"
            ))),
        }
    }
}

/// Task priority. Declaration order is urgency order, so `Ord` compares urgency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(AuditError::InvalidInput(format!(
                "Unknown task priority: {other}"
            ))),
        }
    }
}

/// Status groupings used by queries and the resolver
pub mod status_groups {
    use super::TaskStatus;

    pub const OPEN_STATUSES: &[TaskStatus] = &[TaskStatus::Pending, TaskStatus::InProgress];
}

/// Analytics defaults
pub mod analytics {
    /// Display size of top-product and top-brand views
    pub const DEFAULT_TOP_N: usize = 10;

    /// Upper bound a caller may request for a top-N view
    pub const MAX_TOP_N: usize = 100;

    /// Lookback window for recent-activity counters
    pub const DEFAULT_RECENT_ACTIVITY_DAYS: u32 = 7;

    /// Longest lookback window a caller may request
    pub const MAX_RECENT_ACTIVITY_DAYS: u32 = 365;

    /// Decimal places for price and average presentation
    pub const PRICE_DECIMALS: i64 = 2;

    /// Decimal places for KPI percentages
    pub const PERCENT_DECIMALS: i32 = 1;
}
