//! 인사이트 endpoint.
//!
//! - `GET /api/insights?range=1Y` - 상관행렬 기반 요약 (최대 3개)

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use corrlab_analytics::InsightsReport;
use std::sync::Arc;

use super::RangeQuery;
use crate::error::ApiResult;
use crate::state::AppState;

/// 인사이트 조회.
///
/// GET /api/insights
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<InsightsReport>> {
    let range = query.token()?;
    let report = state
        .run_engine(move |engine| engine.insights(&range))
        .await?;

    Ok(Json(report))
}

pub fn insights_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_insights))
}
