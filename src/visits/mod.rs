//! # Visits
//!
//! Resolution of the tasks an agent should see while visiting a store.

pub mod resolver;

pub use resolver::{is_candidate, matches_scope, resolve, visit_order};
