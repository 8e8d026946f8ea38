//! # Detection Aggregation
//!
//! Turns recognized detections into per-product, per-brand and overall
//! summaries. The function is pure: the same records and scope always give
//! the same result, including the "last detected" timestamps, which come from
//! the records themselves.
//!
//! Products are identified by `(name, brand)`. A missing or blank brand is its
//! own key and never merges with a named brand.

use super::price::{self, PriceRejection};
use super::stats::{summarize, StatSummary};
use crate::models::{AggregationScope, DetectionRecord};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Summary of one product group
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub name: String,
    pub brand: Option<String>,
    pub detection_count: usize,
    pub avg_confidence: f64,
    pub avg_facing: f64,
    pub max_facing: u32,
    pub last_detected_at: Option<DateTime<Utc>>,
    pub price: StatSummary,
    pub rejected_prices: usize,
}

/// Summary of all products sharing a named brand
#[derive(Debug, Clone, PartialEq)]
pub struct BrandSummary {
    pub brand: String,
    pub detection_count: usize,
    pub product_count: usize,
    pub avg_confidence: f64,
    pub avg_facing: f64,
    pub total_facing: u64,
    pub price: StatSummary,
}

/// Ungrouped figures over the whole filtered record set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverallSummary {
    pub total_detections: usize,
    pub unique_products: usize,
    pub unique_brands: usize,
    pub avg_confidence: f64,
    pub avg_facing: f64,
    pub total_facing: u64,
    pub price: StatSummary,
    pub rejected_prices: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsResult {
    pub scope: AggregationScope,
    pub overall: OverallSummary,
    /// Sorted by detection count desc, then average confidence desc
    pub products: Vec<ProductSummary>,
    /// Same ordering rule as `products`
    pub brands: Vec<BrandSummary>,
}

impl AnalyticsResult {
    pub fn top_products(&self, limit: usize) -> &[ProductSummary] {
        &self.products[..limit.min(self.products.len())]
    }

    pub fn top_brands(&self, limit: usize) -> &[BrandSummary] {
        &self.brands[..limit.min(self.brands.len())]
    }
}

/// Running totals for one group of detections
#[derive(Debug, Default)]
struct Accumulator {
    count: usize,
    confidence_sum: f64,
    facing_sum: u64,
    max_facing: u32,
    last_detected_at: Option<DateTime<Utc>>,
    prices: Vec<BigDecimal>,
    rejected_prices: usize,
}

impl Accumulator {
    fn add(&mut self, record: &DetectionRecord, price: &Result<BigDecimal, PriceRejection>) {
        self.count += 1;
        self.confidence_sum += record.confidence;
        self.facing_sum += u64::from(record.facing);
        self.max_facing = self.max_facing.max(record.facing);
        self.last_detected_at = Some(match self.last_detected_at {
            Some(seen) => seen.max(record.detected_at),
            None => record.detected_at,
        });
        match price {
            Ok(value) => self.prices.push(value.clone()),
            Err(PriceRejection::Missing) => {}
            Err(_) => self.rejected_prices += 1,
        }
    }

    fn mean(&self, total: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            total / self.count as f64
        }
    }

    fn avg_confidence(&self) -> f64 {
        self.mean(self.confidence_sum)
    }

    fn avg_facing(&self) -> f64 {
        self.mean(self.facing_sum as f64)
    }
}

/// Aggregate detections inside `scope`. Unrecognized records are ignored.
pub fn aggregate(records: &[DetectionRecord], scope: &AggregationScope) -> AnalyticsResult {
    let mut overall = Accumulator::default();
    let mut products: BTreeMap<(String, Option<String>), Accumulator> = BTreeMap::new();
    let mut brands: BTreeMap<String, (Accumulator, BTreeSet<String>)> = BTreeMap::new();

    for record in records
        .iter()
        .filter(|record| record.recognized)
        .filter(|record| scope.matches(record))
    {
        // Each record is priced on its own; a bad token only affects that record
        let price = price::normalize(record.price_raw.as_deref());
        let brand = record.brand_key().map(str::to_string);

        overall.add(record, &price);
        products
            .entry((record.name.clone(), brand.clone()))
            .or_default()
            .add(record, &price);

        if let Some(brand) = brand {
            let (acc, names) = brands.entry(brand).or_default();
            acc.add(record, &price);
            names.insert(record.name.clone());
        }
    }

    let mut product_summaries: Vec<ProductSummary> = products
        .into_iter()
        .map(|((name, brand), acc)| ProductSummary {
            name,
            brand,
            detection_count: acc.count,
            avg_confidence: acc.avg_confidence(),
            avg_facing: acc.avg_facing(),
            max_facing: acc.max_facing,
            last_detected_at: acc.last_detected_at,
            price: summarize(&acc.prices),
            rejected_prices: acc.rejected_prices,
        })
        .collect();
    product_summaries.sort_by(|a, b| {
        rank(
            (a.detection_count, a.avg_confidence),
            (b.detection_count, b.avg_confidence),
        )
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.brand.cmp(&b.brand))
    });

    let mut brand_summaries: Vec<BrandSummary> = brands
        .into_iter()
        .map(|(brand, (acc, names))| BrandSummary {
            brand,
            detection_count: acc.count,
            product_count: names.len(),
            avg_confidence: acc.avg_confidence(),
            avg_facing: acc.avg_facing(),
            total_facing: acc.facing_sum,
            price: summarize(&acc.prices),
        })
        .collect();
    brand_summaries.sort_by(|a, b| {
        rank(
            (a.detection_count, a.avg_confidence),
            (b.detection_count, b.avg_confidence),
        )
        .then_with(|| a.brand.cmp(&b.brand))
    });

    let overall = OverallSummary {
        total_detections: overall.count,
        unique_products: product_summaries.len(),
        unique_brands: brand_summaries.len(),
        avg_confidence: overall.avg_confidence(),
        avg_facing: overall.avg_facing(),
        total_facing: overall.facing_sum,
        price: summarize(&overall.prices),
        rejected_prices: overall.rejected_prices,
    };

    AnalyticsResult {
        scope: scope.clone(),
        overall,
        products: product_summaries,
        brands: brand_summaries,
    }
}

/// Higher count first, then higher confidence
fn rank(a: (usize, f64), b: (usize, f64)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| b.1.total_cmp(&a.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn detection(id: i64, name: &str, brand: Option<&str>, price: Option<&str>) -> DetectionRecord {
        DetectionRecord {
            id,
            photo_id: 100 + id,
            name: name.to_string(),
            brand: brand.map(str::to_string),
            facing: 2,
            price_raw: price.map(str::to_string),
            confidence: 0.8,
            recognized: true,
            store_id: Some(1),
            chain: Some("X".to_string()),
            detected_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
                + chrono::Duration::minutes(id),
        }
    }

    #[test]
    fn test_unrecognized_records_are_ignored() {
        let mut hidden = detection(1, "Ghost", Some("Nope"), Some("1.00"));
        hidden.recognized = false;
        let records = vec![hidden, detection(2, "Cola", Some("Fizz"), Some("2.00"))];

        let result = aggregate(&records, &AggregationScope::all());
        assert_eq!(result.overall.total_detections, 1);
        assert!(result.products.iter().all(|p| p.name != "Ghost"));
        assert!(result.brands.iter().all(|b| b.brand != "Nope"));
    }

    #[test]
    fn test_missing_brand_is_its_own_group() {
        let records = vec![
            detection(1, "Cola", Some("Fizz"), None),
            detection(2, "Cola", None, None),
            detection(3, "Cola", Some(""), None),
        ];

        let result = aggregate(&records, &AggregationScope::all());
        assert_eq!(result.overall.unique_products, 2);
        assert_eq!(result.overall.unique_brands, 1);
        let unbranded = result.products.iter().find(|p| p.brand.is_none()).unwrap();
        assert_eq!(unbranded.detection_count, 2);
    }

    #[test]
    fn test_malformed_price_still_counts_elsewhere() {
        let records = vec![
            detection(1, "Soap", Some("Clean"), Some("4,00 €")),
            detection(2, "Soap", Some("Clean"), Some("four euros")),
            detection(3, "Soap", Some("Clean"), Some("6.00")),
        ];

        let result = aggregate(&records, &AggregationScope::all());
        let soap = &result.products[0];
        assert_eq!(soap.detection_count, 3);
        assert_eq!(soap.price.count, 2);
        assert_eq!(soap.price.median, BigDecimal::from_str("5").unwrap());
        assert_eq!(soap.rejected_prices, 1);
        assert_eq!(result.overall.rejected_prices, 1);
        assert_eq!(result.overall.total_facing, 6);
    }

    #[test]
    fn test_ordering_by_count_then_confidence() {
        let mut low = detection(3, "Tea", Some("Leaf"), None);
        low.confidence = 0.5;
        let mut high = detection(4, "Coffee", Some("Bean"), None);
        high.confidence = 0.95;
        let records = vec![
            detection(1, "Milk", Some("Cow"), None),
            detection(2, "Milk", Some("Cow"), None),
            low,
            high,
        ];

        let result = aggregate(&records, &AggregationScope::all());
        let names: Vec<&str> = result.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Coffee", "Tea"]);
        assert_eq!(result.top_products(2).len(), 2);
        assert_eq!(result.top_products(50).len(), 3);
    }

    #[test]
    fn test_scope_filters_records() {
        let mut elsewhere = detection(2, "Cola", Some("Fizz"), None);
        elsewhere.store_id = Some(2);
        let records = vec![detection(1, "Cola", Some("Fizz"), None), elsewhere];

        let result = aggregate(&records, &AggregationScope::for_store(2));
        assert_eq!(result.overall.total_detections, 1);
        assert_eq!(result.scope, AggregationScope::for_store(2));
    }

    #[test]
    fn test_last_detected_comes_from_records() {
        let records = vec![
            detection(5, "Cola", Some("Fizz"), None),
            detection(1, "Cola", Some("Fizz"), None),
        ];
        let result = aggregate(&records, &AggregationScope::all());
        assert_eq!(
            result.products[0].last_detected_at,
            Some(records[0].detected_at)
        );
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[], &AggregationScope::all());
        assert_eq!(result.overall, OverallSummary::default());
        assert!(result.products.is_empty());
        assert!(result.top_brands(10).is_empty());
    }
}
