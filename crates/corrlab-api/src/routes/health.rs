//! 헬스 체크 endpoint.
//!
//! 서버 상태 확인을 위한 헬스 체크 엔드포인트를 제공합니다.
//! 로드밸런서나 오케스트레이션 시스템(Kubernetes 등)에서 사용됩니다.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded" | "unhealthy")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 등록된 자산 수
    pub asset_count: usize,

    /// 현재 기준일
    pub reference_date: NaiveDate,

    /// 가격 데이터를 읽지 못한 자산
    pub unavailable_assets: Vec<String>,

    /// 개별 컴포넌트 상태
    pub components: ComponentHealth,
}

/// 개별 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// 가격 저장소 상태
    pub price_store: ComponentStatus,

    /// 가격 캐시 상태
    pub cache: ComponentStatus,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// 상태 ("up" | "down" | "not_configured")
    pub status: String,

    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    /// 비정상 상태.
    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: "down".to_string(),
            message: Some(message.into()),
        }
    }

    /// 미설정 상태.
    pub fn not_configured() -> Self {
        Self {
            status: "not_configured".to_string(),
            message: None,
        }
    }

    /// 정보 포함 정상 상태.
    pub fn up_with_info(message: impl Into<String>) -> Self {
        Self {
            status: "up".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// 서버가 응답 가능한 상태인지만 확인합니다.
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// 모든 자산의 가격 데이터를 읽어 기준일과 로드 실패 자산을 보고합니다.
/// 읽을 수 있는 자산이 하나도 없으면 503.
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let report = state
        .run_engine(|engine| Ok(engine.reference_date_report()))
        .await;

    let report = match report {
        Ok(report) => report,
        Err(err) => return err.into_response(),
    };

    let asset_count = state.engine.registry().len();
    let unavailable: Vec<String> = report
        .unavailable()
        .into_iter()
        .map(str::to_string)
        .collect();

    let (overall_status, status_code, store_status) = if !report.has_loaded() {
        (
            "unhealthy",
            StatusCode::SERVICE_UNAVAILABLE,
            ComponentStatus::down("가격 데이터를 읽을 수 있는 자산이 없습니다"),
        )
    } else if !unavailable.is_empty() {
        (
            "degraded",
            StatusCode::OK,
            ComponentStatus::down(format!("{} assets unavailable", unavailable.len())),
        )
    } else {
        (
            "healthy",
            StatusCode::OK,
            ComponentStatus::up_with_info(format!("{} assets loaded", asset_count)),
        )
    };

    let cache_status = match state.cache_stats() {
        Some(stats) => ComponentStatus::up_with_info(format!(
            "{} entries, {} hits, {} misses",
            stats.entries, stats.hits, stats.misses
        )),
        None => ComponentStatus::not_configured(),
    };

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        asset_count,
        reference_date: report.reference_date,
        unavailable_assets: unavailable,
        components: ComponentHealth {
            price_store: store_status,
            cache: cache_status,
        },
    };

    (status_code, Json(response)).into_response()
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}
