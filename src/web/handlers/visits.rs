//! # Visit Handlers
//!
//! Tasks an agent should see for the store they are standing in.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{TaskPriority, TaskStatus};
use crate::models::{Task, VisitContext};
use crate::web::response_types::ApiResult;
use crate::web::state::AppState;

/// Query parameters for visit task resolution
#[derive(Debug, Default, Deserialize)]
pub struct VisitTasksQuery {
    pub agent_id: Option<i64>,
    pub chain: Option<String>,
    pub store_id: Option<i64>,
    pub area: Option<String>,
}

impl From<VisitTasksQuery> for VisitContext {
    fn from(query: VisitTasksQuery) -> Self {
        VisitContext {
            agent_id: query.agent_id,
            chain: query.chain,
            store_id: query.store_id,
            area: query.area,
        }
    }
}

/// One task as shown to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitTaskView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Option<i64>,
    pub chain: Option<String>,
    pub store_id: Option<i64>,
    pub area: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub comment_count: usize,
}

impl From<Task> for VisitTaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            assigned_to: task.assigned_to.into_option(),
            chain: task.chain.into_option(),
            store_id: task.store_id.into_option(),
            area: task.area.into_option(),
            due_date: task.due_date,
            comment_count: task.notes.comments.len(),
            tags: task.notes.tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitTasksResponse {
    pub agent_id: i64,
    pub count: usize,
    pub tasks: Vec<VisitTaskView>,
}

/// Resolve visit tasks: GET /v1/visits/tasks
pub async fn get_visit_tasks(
    State(state): State<AppState>,
    Query(params): Query<VisitTasksQuery>,
) -> ApiResult<Json<VisitTasksResponse>> {
    let context = VisitContext::from(params);
    let agent_id = context.agent_id.unwrap_or_default();

    let tasks = state
        .execute(
            "resolve_visit_tasks",
            state.visit_tasks.resolve_visit_tasks(context),
        )
        .await?;

    Ok(Json(VisitTasksResponse {
        agent_id,
        count: tasks.len(),
        tasks: tasks.into_iter().map(VisitTaskView::from).collect(),
    }))
}
