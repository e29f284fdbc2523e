//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/assets` - 자산 목록
//! - `/api/correlation-matrix` - 전체 자산 상관행렬
//! - `/api/comparison` - 두 자산 비교
//! - `/api/insights` - 상관행렬 인사이트

pub mod assets;
pub mod comparison;
pub mod correlation;
pub mod health;
pub mod insights;

pub use assets::assets_router;
pub use comparison::{comparison_router, ComparisonQuery};
pub use correlation::correlation_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use insights::insights_router;

use axum::Router;
use corrlab_core::RangeToken;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{error_response, ApiResult};
use crate::state::AppState;

/// 기간 쿼리 파라미터 (`?range=1Y`).
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

impl RangeQuery {
    /// 기간 토큰을 엄격하게 파싱합니다. 없으면 1Y, 잘못되면 422.
    pub fn token(&self) -> ApiResult<RangeToken> {
        parse_range(self.range.as_deref())
    }
}

/// 쿼리 문자열의 기간 토큰 파싱.
pub fn parse_range(raw: Option<&str>) -> ApiResult<RangeToken> {
    match raw {
        None => Ok(RangeToken::default()),
        Some(s) => s.parse().map_err(error_response),
    }
}

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // 분석 엔드포인트
        .nest("/api/assets", assets_router())
        .nest("/api/correlation-matrix", correlation_router())
        .nest("/api/comparison", comparison_router())
        .nest("/api/insights", insights_router())
}
