use super::{base_time, detection};
use bigdecimal::BigDecimal;
use chrono::Duration;
use proptest::prelude::*;
use proptest::strategy::Just;
use retail_audit_core::constants::{TaskPriority, TaskStatus};
use retail_audit_core::models::{DetectionRecord, ScopeField, Task, TaskNotes, VisitContext};
use std::str::FromStr;

pub fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

pub fn priority_strategy() -> impl Strategy<Value = TaskPriority> {
    prop_oneof![
        Just(TaskPriority::Low),
        Just(TaskPriority::Medium),
        Just(TaskPriority::High),
        Just(TaskPriority::Urgent),
    ]
}

/// Agent ids drawn from a small pool so assignments collide
pub fn agent_strategy() -> impl Strategy<Value = i64> {
    1i64..=4
}

pub fn chain_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("X".to_string()), Just("Y".to_string()), Just("Z".to_string())]
}

pub fn area_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("north".to_string()), Just("south".to_string())]
}

fn scope_field<T: Clone + std::fmt::Debug>(
    inner: impl Strategy<Value = T>,
) -> impl Strategy<Value = ScopeField<T>> {
    prop::option::of(inner).prop_map(ScopeField::from)
}

pub fn task_strategy() -> impl Strategy<Value = Task> {
    (
        1i64..=10_000,
        status_strategy(),
        priority_strategy(),
        scope_field(agent_strategy()),
        scope_field(chain_strategy()),
        scope_field(1i64..=3),
        scope_field(area_strategy()),
        prop::option::of(-10i64..=30),
    )
        .prop_map(
            |(id, status, priority, assigned_to, chain, store_id, area, due)| Task {
                id,
                title: format!("Task {id}"),
                description: None,
                status,
                priority,
                assigned_to,
                chain,
                store_id,
                area,
                due_date: due.map(|days| base_time() + Duration::days(days)),
                notes: TaskNotes::default(),
                created_at: base_time(),
                updated_at: base_time(),
            },
        )
}

/// Tasks with unique ids
pub fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(task_strategy(), 0..40).prop_map(|mut tasks| {
        tasks.sort_by_key(|task| task.id);
        tasks.dedup_by_key(|task| task.id);
        tasks
    })
}

pub fn visit_context_strategy() -> impl Strategy<Value = VisitContext> {
    (
        agent_strategy(),
        prop::option::of(chain_strategy()),
        prop::option::of(1i64..=3),
        prop::option::of(area_strategy()),
    )
        .prop_map(|(agent_id, chain, store_id, area)| VisitContext {
            agent_id: Some(agent_id),
            chain,
            store_id,
            area,
        })
}

/// Price tokens the normalizer accepts, paired with their expected value
pub fn price_token_strategy() -> impl Strategy<Value = (String, BigDecimal)> {
    (
        1u32..100_000,
        0u32..100,
        prop_oneof![Just(","), Just(".")],
        prop_oneof![Just(""), Just(" €"), Just("€"), Just(" zł"), Just(" TL")],
    )
        .prop_map(|(units, cents, separator, currency)| {
            let token = format!("{units}{separator}{cents:02}{currency}");
            let expected = BigDecimal::from_str(&format!("{units}.{cents:02}"))
                .expect("generated amount parses");
            (token, expected)
        })
}

pub fn decimal_strategy() -> impl Strategy<Value = BigDecimal> {
    (1i64..1_000_000).prop_map(|cents| BigDecimal::new(cents.into(), 2))
}

pub fn decimals_strategy() -> impl Strategy<Value = Vec<BigDecimal>> {
    prop::collection::vec(decimal_strategy(), 1..50)
}

pub fn detection_strategy() -> impl Strategy<Value = DetectionRecord> {
    (
        1i64..=100_000,
        prop_oneof![Just("Cola"), Just("Chips"), Just("Water"), Just("Soap")],
        prop::option::of(prop_oneof![Just("Fizz"), Just("Crunch"), Just("")]),
        prop::option::of(prop_oneof![
            Just("1,50 €"),
            Just("2.99"),
            Just("abc"),
            Just("-5"),
            Just("0")
        ]),
        any::<bool>(),
        0u32..12,
        0.0f64..=1.0,
    )
        .prop_map(|(id, name, brand, price, recognized, facing, confidence)| {
            DetectionRecord {
                recognized,
                facing,
                confidence,
                ..detection(id, name, brand, price)
            }
        })
}

pub fn detections_strategy() -> impl Strategy<Value = Vec<DetectionRecord>> {
    prop::collection::vec(detection_strategy(), 0..60)
}
