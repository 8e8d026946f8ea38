//! Shared fixtures for integration and property tests.

#![allow(dead_code)]

pub mod strategies;

use chrono::{DateTime, Duration, TimeZone, Utc};
use retail_audit_core::constants::{TaskPriority, TaskStatus};
use retail_audit_core::models::{DetectionRecord, ScopeField, Task, TaskNotes};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap()
}

/// Open, unassigned, unscoped task
pub fn task(id: i64) -> Task {
    Task {
        id,
        title: format!("Shelf check {id}"),
        description: None,
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        assigned_to: ScopeField::Any,
        chain: ScopeField::Any,
        store_id: ScopeField::Any,
        area: ScopeField::Any,
        due_date: None,
        notes: TaskNotes::default(),
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn assigned_task(id: i64, agent_id: i64) -> Task {
    Task {
        assigned_to: ScopeField::Specific(agent_id),
        ..task(id)
    }
}

pub fn due_in_days(task: Task, days: i64) -> Task {
    Task {
        due_date: Some(base_time() + Duration::days(days)),
        ..task
    }
}

/// Recognized detection in store 1 of chain "X"
pub fn detection(id: i64, name: &str, brand: Option<&str>, price: Option<&str>) -> DetectionRecord {
    DetectionRecord {
        id,
        photo_id: 1_000 + id,
        name: name.to_string(),
        brand: brand.map(str::to_string),
        facing: 1,
        price_raw: price.map(str::to_string),
        confidence: 0.9,
        recognized: true,
        store_id: Some(1),
        chain: Some("X".to_string()),
        detected_at: base_time() + Duration::minutes(id),
    }
}

pub fn ids(tasks: &[Task]) -> Vec<i64> {
    tasks.iter().map(|task| task.id).collect()
}
