//! # Task Scopes
//!
//! Query scopes over `audit_tasks`. Only the candidate filters (status and
//! assignment) are pushed to the database; visit scoping happens in
//! [`crate::visits::resolver`] so the wildcard rule lives in one place.

use super::{ConditionWriter, ScopeBuilder};
use crate::constants::status_groups;
use crate::models::TaskRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

const TASK_COLUMNS: &str = "SELECT audit_tasks.task_id, audit_tasks.title, audit_tasks.description, \
     audit_tasks.status, audit_tasks.priority, audit_tasks.assigned_to, audit_tasks.chain, \
     audit_tasks.store_id, audit_tasks.area, audit_tasks.due_date, audit_tasks.comments, \
     audit_tasks.history, audit_tasks.tags, audit_tasks.created_at, audit_tasks.updated_at";

const TASK_FROM: &str = " FROM audit_tasks";

#[derive(Debug, Clone)]
enum TaskFilter {
    Open,
    AvailableTo(i64),
}

/// Query builder for Task scopes
#[derive(Debug, Clone, Default)]
pub struct TaskScope {
    filters: Vec<TaskFilter>,
}

impl TaskRow {
    /// Start building a scoped query
    pub fn scope() -> TaskScope {
        TaskScope::default()
    }
}

impl TaskScope {
    /// Scope: open - status is pending or in_progress
    pub fn open(mut self) -> Self {
        self.filters.push(TaskFilter::Open);
        self
    }

    /// Scope: available_to - assigned to the agent or unassigned
    pub fn available_to(mut self, agent_id: i64) -> Self {
        self.filters.push(TaskFilter::AvailableTo(agent_id));
        self
    }

    fn build(&self, select: &str) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(select);
        query.push(TASK_FROM);

        let mut conditions = ConditionWriter::new();
        for filter in &self.filters {
            conditions.next(&mut query);
            match filter {
                TaskFilter::Open => {
                    query.push("audit_tasks.status IN (");
                    let mut statuses = query.separated(", ");
                    for status in status_groups::OPEN_STATUSES {
                        statuses.push_bind(status.as_str());
                    }
                    statuses.push_unseparated(")");
                }
                TaskFilter::AvailableTo(agent_id) => {
                    query.push("(audit_tasks.assigned_to = ");
                    query.push_bind(*agent_id);
                    query.push(" OR audit_tasks.assigned_to IS NULL)");
                }
            }
        }
        query
    }

    /// Rendered SQL for the row query
    pub fn to_sql(&self) -> String {
        self.build(TASK_COLUMNS).into_sql()
    }
}

impl ScopeBuilder<TaskRow> for TaskScope {
    async fn all(self, pool: &PgPool) -> Result<Vec<TaskRow>, sqlx::Error> {
        let mut query = self.build(TASK_COLUMNS);
        query.push(" ORDER BY audit_tasks.task_id ASC");
        query.build_query_as::<TaskRow>().fetch_all(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_scope() {
        let sql = TaskRow::scope().to_sql();
        assert!(sql.ends_with(" FROM audit_tasks"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_candidate_filters_are_bound() {
        let sql = TaskRow::scope().open().available_to(7).to_sql();
        assert!(sql.contains("WHERE audit_tasks.status IN ($1, $2)"));
        assert!(sql.contains(
            " AND (audit_tasks.assigned_to = $3 OR audit_tasks.assigned_to IS NULL)"
        ));
    }
}
