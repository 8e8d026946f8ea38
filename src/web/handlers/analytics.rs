//! # Analytics Handlers
//!
//! Read-only endpoints for shelf product analytics and dashboard KPIs.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    round_to, AnalyticsResult, BrandSummary, KpiSet, OverallSummary, PriceStats, ProductSummary,
};
use crate::models::AggregationScope;
use crate::validation::validate_top_n;
use crate::web::response_types::ApiResult;
use crate::web::state::AppState;

const AVERAGE_DECIMALS: i32 = 2;

/// Query parameters for product and brand analytics
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub store_id: Option<i64>,
    pub chain: Option<String>,
    /// Number of entries in the top view (default from configuration)
    pub limit: Option<i64>,
}

/// Query parameters for KPIs
#[derive(Debug, Default, Deserialize)]
pub struct KpiQuery {
    /// Recent-activity lookback in days (default from configuration)
    pub days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeView {
    pub store_id: Option<i64>,
    pub chain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallView {
    pub total_detections: usize,
    pub unique_products: usize,
    pub unique_brands: usize,
    pub avg_confidence: f64,
    pub avg_facing: f64,
    pub total_facing: u64,
    pub price: PriceStats,
    pub rejected_prices: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub name: String,
    pub brand: Option<String>,
    pub detection_count: usize,
    pub avg_confidence: f64,
    pub avg_facing: f64,
    pub max_facing: u32,
    pub last_detected_at: Option<DateTime<Utc>>,
    pub price: PriceStats,
    pub rejected_prices: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandView {
    pub brand: String,
    pub detection_count: usize,
    pub product_count: usize,
    pub avg_confidence: f64,
    pub avg_facing: f64,
    pub total_facing: u64,
    pub price: PriceStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalyticsResponse {
    pub scope: ScopeView,
    pub overall: OverallView,
    pub total_products: usize,
    pub top_products: Vec<ProductView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandAnalyticsResponse {
    pub scope: ScopeView,
    pub total_brands: usize,
    pub top_brands: Vec<BrandView>,
}

impl From<&AggregationScope> for ScopeView {
    fn from(scope: &AggregationScope) -> Self {
        Self {
            store_id: scope.store_id,
            chain: scope.chain.clone(),
        }
    }
}

impl From<&OverallSummary> for OverallView {
    fn from(overall: &OverallSummary) -> Self {
        Self {
            total_detections: overall.total_detections,
            unique_products: overall.unique_products,
            unique_brands: overall.unique_brands,
            avg_confidence: round_to(overall.avg_confidence, AVERAGE_DECIMALS),
            avg_facing: round_to(overall.avg_facing, AVERAGE_DECIMALS),
            total_facing: overall.total_facing,
            price: overall.price.rounded(),
            rejected_prices: overall.rejected_prices,
        }
    }
}

impl From<&ProductSummary> for ProductView {
    fn from(product: &ProductSummary) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            detection_count: product.detection_count,
            avg_confidence: round_to(product.avg_confidence, AVERAGE_DECIMALS),
            avg_facing: round_to(product.avg_facing, AVERAGE_DECIMALS),
            max_facing: product.max_facing,
            last_detected_at: product.last_detected_at,
            price: product.price.rounded(),
            rejected_prices: product.rejected_prices,
        }
    }
}

impl From<&BrandSummary> for BrandView {
    fn from(brand: &BrandSummary) -> Self {
        Self {
            brand: brand.brand.clone(),
            detection_count: brand.detection_count,
            product_count: brand.product_count,
            avg_confidence: round_to(brand.avg_confidence, AVERAGE_DECIMALS),
            avg_facing: round_to(brand.avg_facing, AVERAGE_DECIMALS),
            total_facing: brand.total_facing,
            price: brand.price.rounded(),
        }
    }
}

impl AnalyticsQuery {
    fn scope(&self) -> AggregationScope {
        // Blank chain text is no filter
        AggregationScope {
            store_id: self.store_id,
            chain: self
                .chain
                .as_deref()
                .map(str::trim)
                .filter(|chain| !chain.is_empty())
                .map(str::to_string),
        }
    }

    fn limit(&self, state: &AppState) -> ApiResult<usize> {
        match self.limit {
            Some(limit) => Ok(validate_top_n(limit)?),
            None => Ok(state.analytics.config().top_n),
        }
    }
}

async fn load_analytics(state: &AppState, scope: AggregationScope) -> ApiResult<AnalyticsResult> {
    state
        .execute(
            "compute_product_analytics",
            state.analytics.compute_product_analytics(scope),
        )
        .await
}

/// Top products: GET /v1/analytics/products
pub async fn get_product_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> ApiResult<Json<ProductAnalyticsResponse>> {
    let limit = params.limit(&state)?;
    let result = load_analytics(&state, params.scope()).await?;

    Ok(Json(ProductAnalyticsResponse {
        scope: ScopeView::from(&result.scope),
        overall: OverallView::from(&result.overall),
        total_products: result.products.len(),
        top_products: result
            .top_products(limit)
            .iter()
            .map(ProductView::from)
            .collect(),
    }))
}

/// Top brands: GET /v1/analytics/brands
pub async fn get_brand_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> ApiResult<Json<BrandAnalyticsResponse>> {
    let limit = params.limit(&state)?;
    let result = load_analytics(&state, params.scope()).await?;

    Ok(Json(BrandAnalyticsResponse {
        scope: ScopeView::from(&result.scope),
        total_brands: result.brands.len(),
        top_brands: result.top_brands(limit).iter().map(BrandView::from).collect(),
    }))
}

/// Dashboard KPIs: GET /v1/analytics/kpis
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(params): Query<KpiQuery>,
) -> ApiResult<Json<KpiSet>> {
    let kpis = state
        .execute("compose_kpis", state.analytics.compose_kpis(params.days))
        .await?;
    Ok(Json(kpis))
}
