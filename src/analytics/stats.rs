//! # Statistics Summaries
//!
//! Count, mean, median and range over a sequence of decimals. Values keep full
//! precision here; [`StatSummary::rounded`] is the presentation boundary.

use crate::constants::analytics::PRICE_DECIMALS;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSummary {
    pub count: usize,
    pub avg: BigDecimal,
    pub min: BigDecimal,
    pub max: BigDecimal,
    pub median: BigDecimal,
}

/// A [`StatSummary`] rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceStats {
    pub count: usize,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl StatSummary {
    pub fn empty() -> Self {
        Self {
            count: 0,
            avg: BigDecimal::zero(),
            min: BigDecimal::zero(),
            max: BigDecimal::zero(),
            median: BigDecimal::zero(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn rounded(&self) -> PriceStats {
        PriceStats {
            count: self.count,
            avg: present(&self.avg),
            min: present(&self.min),
            max: present(&self.max),
            median: present(&self.median),
        }
    }
}

impl Default for StatSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Summarize a sequence of values. An empty sequence yields all zeros.
pub fn summarize(values: &[BigDecimal]) -> StatSummary {
    if values.is_empty() {
        return StatSummary::empty();
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let count = sorted.len();
    let sum = sorted
        .iter()
        .fold(BigDecimal::zero(), |acc, value| acc + value);
    let avg = sum / BigDecimal::from(count as u64);

    let mid = count / 2;
    let median = if count % 2 == 1 {
        sorted[mid].clone()
    } else {
        (&sorted[mid - 1] + &sorted[mid]) / BigDecimal::from(2)
    };

    StatSummary {
        count,
        avg,
        min: sorted[0].clone(),
        max: sorted[count - 1].clone(),
        median,
    }
}

/// Round half-up to the presentation precision
fn present(value: &BigDecimal) -> f64 {
    value
        .with_scale_round(PRICE_DECIMALS, RoundingMode::HalfUp)
        .to_f64()
        .unwrap_or(0.0)
}
