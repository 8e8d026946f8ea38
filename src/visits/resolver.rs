//! # Visit Task Resolution
//!
//! Selects the open tasks relevant to an agent's current visit.
//!
//! ## Matching
//!
//! A task is a candidate when it is open (`pending` or `in_progress`) and is
//! assigned to the agent or to nobody.
//!
//! Each scoping hint the visit carries (chain, store, area) produces one
//! clause: the task's field equals the hint, or the task leaves that field
//! open. A candidate needs to satisfy **any one** of the clauses produced by
//! the hints, not all of them. A visit without hints keeps every candidate.
//!
//! The union is deliberate and broad: a task pinned to chain `Y` still
//! surfaces on a chain `X` visit when the visit also names an area and the
//! task's area is open.
//!
//! ## Ordering
//!
//! Priority descending, then due date ascending with undated tasks last, then
//! id ascending.

use crate::models::{AgentVisit, Task};
use std::cmp::Ordering;

/// Return the tasks relevant to `visit`, most urgent first
pub fn resolve(tasks: &[Task], visit: &AgentVisit) -> Vec<Task> {
    let mut relevant: Vec<Task> = tasks
        .iter()
        .filter(|task| is_candidate(task, visit.agent_id))
        .filter(|task| matches_scope(task, visit))
        .cloned()
        .collect();

    relevant.sort_by(visit_order);
    relevant
}

/// Open and available to the agent
pub fn is_candidate(task: &Task, agent_id: i64) -> bool {
    task.is_open() && task.is_available_to(agent_id)
}

/// Permissive union over the hints the visit supplies
pub fn matches_scope(task: &Task, visit: &AgentVisit) -> bool {
    let clauses = [
        visit.chain.as_deref().map(|chain| task.chain.admits(chain)),
        visit.store_id.map(|store_id| task.store_id.admits(&store_id)),
        visit.area.as_deref().map(|area| task.area.admits(area)),
    ];

    let mut supplied = clauses.into_iter().flatten().peekable();
    if supplied.peek().is_none() {
        return true;
    }
    supplied.any(|clause| clause)
}

/// Priority desc, due date asc (undated last), id asc
pub fn visit_order(a: &Task, b: &Task) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{TaskPriority, TaskStatus};
    use crate::models::{ScopeField, TaskNotes, VisitContext};
    use chrono::{TimeZone, Utc};

    fn task(id: i64, status: TaskStatus) -> Task {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Task {
            id,
            title: format!("Task {id}"),
            description: None,
            status,
            priority: TaskPriority::Medium,
            assigned_to: ScopeField::Specific(7),
            chain: ScopeField::Any,
            store_id: ScopeField::Any,
            area: ScopeField::Any,
            due_date: None,
            notes: TaskNotes::default(),
            created_at: created,
            updated_at: created,
        }
    }

    fn visit(ctx: VisitContext) -> AgentVisit {
        ctx.into_agent_visit().unwrap()
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_visit_with_chain_skips_completed_tasks() {
        let mut open = task(1, TaskStatus::Pending);
        open.area = ScopeField::Specific("North".to_string());
        let mut done = task(2, TaskStatus::Completed);
        done.chain = ScopeField::Specific("X".to_string());

        let result = resolve(&[open, done], &visit(VisitContext::for_agent(7).with_chain("X")));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_open_chain_matches_specific_visit_chain() {
        let mut wildcard = task(1, TaskStatus::Pending);
        wildcard.store_id = ScopeField::Specific(1);
        let mut other_chain = task(2, TaskStatus::Pending);
        other_chain.chain = ScopeField::Specific("Y".to_string());

        let ctx = visit(VisitContext::for_agent(7).with_chain("X"));
        assert!(matches_scope(&wildcard, &ctx));
        assert!(!matches_scope(&other_chain, &ctx));
    }

    #[test]
    fn test_any_supplied_dimension_is_enough() {
        let mut task = task(1, TaskStatus::InProgress);
        task.chain = ScopeField::Specific("Y".to_string());
        task.area = ScopeField::Any;

        let ctx = visit(VisitContext::for_agent(7).with_chain("X").with_area("South"));
        assert!(matches_scope(&task, &ctx));
    }

    #[test]
    fn test_all_supplied_dimensions_mismatched() {
        let mut task = task(1, TaskStatus::Pending);
        task.chain = ScopeField::Specific("Y".to_string());
        task.store_id = ScopeField::Specific(9);
        task.area = ScopeField::Specific("East".to_string());

        let ctx = visit(
            VisitContext::for_agent(7)
                .with_chain("X")
                .with_store(1)
                .with_area("West"),
        );
        assert!(!matches_scope(&task, &ctx));
    }

    #[test]
    fn test_assignment_rules() {
        let mine = task(1, TaskStatus::Pending);
        let mut unassigned = task(2, TaskStatus::Pending);
        unassigned.assigned_to = ScopeField::Any;
        let mut theirs = task(3, TaskStatus::Pending);
        theirs.assigned_to = ScopeField::Specific(8);

        let result = resolve(&[mine, unassigned, theirs], &visit(VisitContext::for_agent(7)));
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_ordering_priority_then_due_date() {
        let at = |day| Some(Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap());

        let mut low_soon = task(1, TaskStatus::Pending);
        low_soon.priority = TaskPriority::Low;
        low_soon.due_date = at(1);
        let mut high_undated = task(2, TaskStatus::Pending);
        high_undated.priority = TaskPriority::High;
        let mut high_late = task(3, TaskStatus::Pending);
        high_late.priority = TaskPriority::High;
        high_late.due_date = at(20);
        let mut high_early = task(4, TaskStatus::InProgress);
        high_early.priority = TaskPriority::High;
        high_early.due_date = at(2);
        let mut urgent = task(5, TaskStatus::Pending);
        urgent.priority = TaskPriority::Urgent;

        let result = resolve(
            &[low_soon, high_undated, high_late, high_early, urgent],
            &visit(VisitContext::for_agent(7)),
        );
        assert_eq!(ids(&result), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_resolution_does_not_mutate_input() {
        let tasks = vec![task(2, TaskStatus::Pending), task(1, TaskStatus::Pending)];
        let before = tasks.clone();
        let _ = resolve(&tasks, &visit(VisitContext::for_agent(7)));
        assert_eq!(tasks, before);
    }
}
