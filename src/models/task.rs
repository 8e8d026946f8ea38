//! # Task Model
//!
//! Assigned field work. A task is scoped to an agent, a chain, a store and an
//! area; any of these can be left open, in which case the task applies to
//! every value of that dimension.
//!
//! ## Database Schema
//!
//! Maps to the `audit_tasks` table:
//! - `task_id`: Primary key (BIGINT)
//! - `status`: `pending` | `in_progress` | `completed` (VARCHAR)
//! - `priority`: `low` | `medium` | `high` | `urgent` (VARCHAR)
//! - `assigned_to`, `store_id`: nullable BIGINT, `NULL` = any
//! - `chain`, `area`: nullable VARCHAR, `NULL` = any
//! - `comments`, `history`, `tags`: JSON documents stored as TEXT
//!
//! Rows are read as [`TaskRow`] and converted once into [`Task`]; nothing past
//! that boundary sees raw column values.

use crate::constants::{TaskPriority, TaskStatus};
use crate::error::{AuditError, Result};
use crate::models::scope_field::ScopeField;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::debug;

/// A unit of assigned work with its visit scoping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: ScopeField<i64>,
    pub chain: ScopeField<String>,
    pub store_id: ScopeField<i64>,
    pub area: ScopeField<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: TaskNotes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Structured side data kept alongside a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskNotes {
    pub comments: Vec<TaskComment>,
    pub history: Vec<TaskHistoryEntry>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskComment {
    #[serde(default)]
    pub author: Option<String>,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    pub action: String,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Raw `audit_tasks` row
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub task_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<i64>,
    pub chain: Option<String>,
    pub store_id: Option<i64>,
    pub area: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub history: Option<String>,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = AuditError;

    fn try_from(row: TaskRow) -> Result<Self> {
        let status = row.status.parse::<TaskStatus>().map_err(|e| {
            AuditError::DatabaseError(format!("Invalid row for task {}: {e}", row.task_id))
        })?;
        let priority = row.priority.parse::<TaskPriority>().map_err(|e| {
            AuditError::DatabaseError(format!("Invalid row for task {}: {e}", row.task_id))
        })?;

        let notes = TaskNotes {
            comments: decode_json_list(row.task_id, "comments", row.comments.as_deref()),
            history: decode_json_list(row.task_id, "history", row.history.as_deref()),
            tags: decode_json_list(row.task_id, "tags", row.tags.as_deref()),
        };

        Ok(Task {
            id: row.task_id,
            title: row.title,
            description: row.description,
            status,
            priority,
            assigned_to: row.assigned_to.into(),
            chain: ScopeField::from_text(row.chain),
            store_id: row.store_id.into(),
            area: ScopeField::from_text(row.area),
            due_date: row.due_date,
            notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Decode a JSON list stored as text; missing or malformed text yields an empty list
fn decode_json_list<T: DeserializeOwned>(task_id: i64, column: &str, raw: Option<&str>) -> Vec<T> {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<T>>(text) {
        Ok(items) => items,
        Err(error) => {
            debug!(
                task_id = task_id,
                column = column,
                error = %error,
                "Discarding malformed JSON list column"
            );
            Vec::new()
        }
    }
}

impl Task {
    /// Whether the task is still open for work
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Whether the given agent may pick the task up
    pub fn is_available_to(&self, agent_id: i64) -> bool {
        self.assigned_to.admits(&agent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> TaskRow {
        let now = Utc::now();
        TaskRow {
            task_id: 11,
            title: "Check end-cap display".to_string(),
            description: None,
            status: "in_progress".to_string(),
            priority: "high".to_string(),
            assigned_to: None,
            chain: Some("X".to_string()),
            store_id: None,
            area: Some("".to_string()),
            due_date: None,
            comments: Some(r#"[{"author":"ana","text":"shelf empty"}]"#.to_string()),
            history: Some("not json".to_string()),
            tags: Some(r#"["promo","dairy"]"#.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_conversion() {
        let task = Task::try_from(row()).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert!(task.assigned_to.is_any());
        assert_eq!(task.chain, ScopeField::Specific("X".to_string()));
        assert!(task.area.is_any());
        assert!(task.is_available_to(99));
    }

    #[test]
    fn test_notes_decoding_defaults_to_empty() {
        let task = Task::try_from(row()).unwrap();
        assert_eq!(task.notes.comments.len(), 1);
        assert_eq!(task.notes.comments[0].text, "shelf empty");
        assert!(task.notes.history.is_empty());
        assert_eq!(task.notes.tags, vec!["promo", "dairy"]);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut bad = row();
        bad.status = "archived".to_string();
        let err = Task::try_from(bad).unwrap_err();
        assert!(matches!(err, AuditError::DatabaseError(_)));
    }
}
