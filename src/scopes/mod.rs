//! # Query Scopes
//!
//! Chainable query scopes over the audit tables. Each scope collects filters
//! and renders them into a parameterized sqlx [`QueryBuilder`] only when it is
//! executed.
//!
//! ```rust,no_run
//! use retail_audit_core::models::TaskRow;
//! use retail_audit_core::scopes::ScopeBuilder;
//! # async fn example(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
//! let rows = TaskRow::scope().open().available_to(7).all(pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! All values go through `push_bind`; no caller text is spliced into SQL.

#![allow(clippy::manual_async_fn)]

pub mod detection;
pub mod task;

pub use detection::DetectionScope;
pub use task::TaskScope;

use sqlx::{PgPool, Postgres, QueryBuilder};

/// Base trait for all scope builders
pub trait ScopeBuilder<T> {
    /// Execute the scope and return every matching row
    fn all(
        self,
        pool: &PgPool,
    ) -> impl std::future::Future<Output = Result<Vec<T>, sqlx::Error>> + Send;
}

/// Appends `WHERE`/`AND` as filters are rendered
pub(crate) struct ConditionWriter {
    has_conditions: bool,
}

impl ConditionWriter {
    pub(crate) fn new() -> Self {
        Self {
            has_conditions: false,
        }
    }

    pub(crate) fn next(&mut self, query: &mut QueryBuilder<'static, Postgres>) {
        if self.has_conditions {
            query.push(" AND ");
        } else {
            query.push(" WHERE ");
            self.has_conditions = true;
        }
    }
}
