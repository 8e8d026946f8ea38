use crate::database::AuditStore;
use crate::error::Result;
use crate::logging::{log_error, log_resolution};
use crate::models::{Task, VisitContext};
use crate::visits;
use std::sync::Arc;
use tracing::debug;

/// Resolves the tasks an agent should work on during a visit
#[derive(Clone)]
pub struct VisitTaskService {
    store: Arc<dyn AuditStore>,
}

impl std::fmt::Debug for VisitTaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitTaskService").finish_non_exhaustive()
    }
}

impl VisitTaskService {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Open tasks relevant to the visit, most urgent first.
    ///
    /// The context is validated before the store is read, so a missing agent
    /// never costs a query.
    pub async fn resolve_visit_tasks(&self, context: VisitContext) -> Result<Vec<Task>> {
        let visit = context.into_agent_visit()?;

        let candidates = self
            .store
            .open_tasks_for_agent(visit.agent_id)
            .await
            .inspect_err(|e| {
                log_error(
                    "resolve_visit_tasks",
                    &e.to_string(),
                    Some(&format!("agent_id={}", visit.agent_id)),
                )
            })?;

        debug!(
            agent_id = visit.agent_id,
            chain = ?visit.chain,
            store_id = ?visit.store_id,
            area = ?visit.area,
            candidates = candidates.len(),
            "Resolving visit tasks"
        );

        let resolved = visits::resolve(&candidates, &visit);
        log_resolution(
            visit.agent_id,
            candidates.len(),
            resolved.len(),
            visit.has_scoping_hints(),
        );

        Ok(resolved)
    }
}
