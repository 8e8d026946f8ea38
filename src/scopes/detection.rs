//! # Detection Scopes
//!
//! Query scopes over `audit_detections`, joined to the photo each detection
//! came from and the store that photo was taken in.

use super::{ConditionWriter, ScopeBuilder};
use crate::models::{AggregationScope, DetectionRow};
use sqlx::{PgPool, Postgres, QueryBuilder};

const DETECTION_COLUMNS: &str = "SELECT audit_detections.detection_id, audit_detections.photo_id, \
     audit_detections.name, audit_detections.brand, audit_detections.facing, \
     audit_detections.price_raw, audit_detections.confidence, audit_detections.recognized, \
     audit_photos.store_id, audit_stores.chain, audit_photos.processed_at AS detected_at";

const DETECTION_FROM: &str = " FROM audit_detections \
     INNER JOIN audit_photos ON audit_photos.photo_id = audit_detections.photo_id \
     LEFT JOIN audit_stores ON audit_stores.store_id = audit_photos.store_id";

#[derive(Debug, Clone)]
enum DetectionFilter {
    Recognized,
    InStore(i64),
    InChain(String),
}

/// Query builder for detection scopes
#[derive(Debug, Clone, Default)]
pub struct DetectionScope {
    filters: Vec<DetectionFilter>,
}

impl DetectionRow {
    /// Start building a scoped query
    pub fn scope() -> DetectionScope {
        DetectionScope::default()
    }
}

impl DetectionScope {
    /// Scope: recognized - detections the detector matched to a product
    pub fn recognized(mut self) -> Self {
        self.filters.push(DetectionFilter::Recognized);
        self
    }

    /// Scope: in_store - detections from photos taken in one store
    pub fn in_store(mut self, store_id: i64) -> Self {
        self.filters.push(DetectionFilter::InStore(store_id));
        self
    }

    /// Scope: in_chain - detections from any store of a chain
    pub fn in_chain(mut self, chain: impl Into<String>) -> Self {
        self.filters.push(DetectionFilter::InChain(chain.into()));
        self
    }

    /// Apply every filter an aggregation scope sets
    pub fn within(self, scope: &AggregationScope) -> Self {
        let scoped = match scope.store_id {
            Some(store_id) => self.in_store(store_id),
            None => self,
        };
        match &scope.chain {
            Some(chain) => scoped.in_chain(chain.clone()),
            None => scoped,
        }
    }

    fn build(&self, select: &str) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(select);
        query.push(DETECTION_FROM);

        let mut conditions = ConditionWriter::new();
        for filter in &self.filters {
            conditions.next(&mut query);
            match filter {
                DetectionFilter::Recognized => {
                    query.push("audit_detections.recognized = TRUE");
                }
                DetectionFilter::InStore(store_id) => {
                    query.push("audit_photos.store_id = ");
                    query.push_bind(*store_id);
                }
                DetectionFilter::InChain(chain) => {
                    query.push("audit_stores.chain = ");
                    query.push_bind(chain.clone());
                }
            }
        }
        query
    }

    /// Rendered SQL for the row query
    pub fn to_sql(&self) -> String {
        self.build(DETECTION_COLUMNS).into_sql()
    }
}

impl ScopeBuilder<DetectionRow> for DetectionScope {
    async fn all(self, pool: &PgPool) -> Result<Vec<DetectionRow>, sqlx::Error> {
        let mut query = self.build(DETECTION_COLUMNS);
        query.push(" ORDER BY audit_detections.detection_id ASC");
        query.build_query_as::<DetectionRow>().fetch_all(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscoped_aggregation_only_filters_recognition() {
        let sql = DetectionRow::scope()
            .recognized()
            .within(&AggregationScope::all())
            .to_sql();
        assert!(sql.contains("WHERE audit_detections.recognized = TRUE"));
        assert!(!sql.contains("audit_photos.store_id ="));
        assert!(!sql.contains("audit_stores.chain ="));
    }

    #[test]
    fn test_store_and_chain_scope() {
        let scope = AggregationScope {
            store_id: Some(3),
            chain: Some("X".to_string()),
        };
        let sql = DetectionRow::scope().recognized().within(&scope).to_sql();
        assert!(sql.contains("AND audit_photos.store_id = $1"));
        assert!(sql.contains("AND audit_stores.chain = $2"));
    }
}
