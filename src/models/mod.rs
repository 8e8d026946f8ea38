//! # Data Models
//!
//! Typed views over the rows the audit core reads, plus the query-time value
//! objects (visit context, aggregation scope) callers pass in.

pub mod detection;
pub mod scope_field;
pub mod task;
pub mod visit_context;

// Re-export core models for easy access
pub use detection::{AggregationScope, DetectionRecord, DetectionRow};
pub use scope_field::ScopeField;
pub use task::{Task, TaskComment, TaskHistoryEntry, TaskNotes, TaskRow};
pub use visit_context::{AgentVisit, VisitContext};
