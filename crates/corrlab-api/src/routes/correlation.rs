//! 상관행렬 endpoint.
//!
//! - `GET /api/correlation-matrix?range=1Y` - 전체 자산 N×N 상관행렬

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use corrlab_analytics::CorrelationMatrixReport;
use std::sync::Arc;
use tracing::debug;

use super::RangeQuery;
use crate::error::ApiResult;
use crate::state::AppState;

/// 상관행렬 조회.
///
/// GET /api/correlation-matrix
///
/// 자산 중 하나라도 가격 데이터를 읽지 못하면 404.
pub async fn get_correlation_matrix(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<CorrelationMatrixReport>> {
    let range = query.token()?;
    debug!(range = %range, "Correlation matrix requested");

    let report = state
        .run_engine(move |engine| engine.correlation_matrix(&range))
        .await?;

    Ok(Json(report))
}

pub fn correlation_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_correlation_matrix))
}
