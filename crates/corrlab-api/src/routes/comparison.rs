//! 두 자산 비교 endpoint.
//!
//! - `GET /api/comparison?asset_a=SPY&asset_b=GLD&range=1Y`
//!
//! 공통 거래일 기준 누적 지수(기준 100), 상관계수, 연환산 변동성을 반환합니다.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use corrlab_analytics::ComparisonReport;
use serde::Deserialize;
use std::sync::Arc;

use super::parse_range;
use crate::error::{missing_parameter, ApiResult};
use crate::state::AppState;

/// 비교 쿼리 파라미터.
#[derive(Debug, Default, Deserialize)]
pub struct ComparisonQuery {
    pub asset_a: Option<String>,
    pub asset_b: Option<String>,
    pub range: Option<String>,
}

/// 두 자산 비교.
///
/// GET /api/comparison
///
/// 파라미터 누락 또는 잘못된 기간은 422, 모르는 자산은 404.
pub async fn get_comparison(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ComparisonQuery>,
) -> ApiResult<Json<ComparisonReport>> {
    let asset_a = query.asset_a.ok_or_else(|| missing_parameter("asset_a"))?;
    let asset_b = query.asset_b.ok_or_else(|| missing_parameter("asset_b"))?;
    let range = parse_range(query.range.as_deref())?;

    let report = state
        .run_engine(move |engine| engine.comparison(&asset_a, &asset_b, &range))
        .await?;

    Ok(Json(report))
}

pub fn comparison_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_comparison))
}
