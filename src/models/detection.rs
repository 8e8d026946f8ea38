//! # Detection Records
//!
//! One product instance the external detector found in one shelf photo.
//! Records are written by the detection pipeline and only read here.
//!
//! Maps to `audit_detections` joined with `audit_photos` (for the store, chain
//! and processing time of the photo the detection came from).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub id: i64,
    pub photo_id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub facing: u32,
    pub price_raw: Option<String>,
    pub confidence: f64,
    pub recognized: bool,
    pub store_id: Option<i64>,
    pub chain: Option<String>,
    pub detected_at: DateTime<Utc>,
}

impl DetectionRecord {
    /// Brand used for grouping; blank brands count as no brand
    pub fn brand_key(&self) -> Option<&str> {
        self.brand
            .as_deref()
            .map(str::trim)
            .filter(|brand| !brand.is_empty())
    }
}

/// Raw detection row as selected by the detection scope
#[derive(Debug, Clone, FromRow)]
pub struct DetectionRow {
    pub detection_id: i64,
    pub photo_id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub facing: Option<i32>,
    pub price_raw: Option<String>,
    pub confidence: Option<f64>,
    pub recognized: bool,
    pub store_id: Option<i64>,
    pub chain: Option<String>,
    pub detected_at: DateTime<Utc>,
}

impl From<DetectionRow> for DetectionRecord {
    fn from(row: DetectionRow) -> Self {
        Self {
            id: row.detection_id,
            photo_id: row.photo_id,
            name: row.name,
            brand: row.brand,
            facing: row.facing.unwrap_or(0).max(0) as u32,
            price_raw: row.price_raw,
            confidence: row.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
            recognized: row.recognized,
            store_id: row.store_id,
            chain: row.chain,
            detected_at: row.detected_at,
        }
    }
}

/// Selects which detections an analytics request summarizes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationScope {
    pub store_id: Option<i64>,
    pub chain: Option<String>,
}

impl AggregationScope {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_store(store_id: i64) -> Self {
        Self {
            store_id: Some(store_id),
            chain: None,
        }
    }

    pub fn for_chain(chain: impl Into<String>) -> Self {
        Self {
            store_id: None,
            chain: Some(chain.into()),
        }
    }

    pub fn is_unscoped(&self) -> bool {
        self.store_id.is_none() && self.chain.is_none()
    }

    /// Whether a record falls inside this scope. Every filter that is set must match.
    pub fn matches(&self, record: &DetectionRecord) -> bool {
        let store_ok = self
            .store_id
            .is_none_or(|store_id| record.store_id == Some(store_id));
        let chain_ok = self
            .chain
            .as_deref()
            .is_none_or(|chain| record.chain.as_deref() == Some(chain));
        store_ok && chain_ok
    }
}
