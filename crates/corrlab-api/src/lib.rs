//! 자산 상관관계 분석 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 헬스 체크 엔드포인트
//! - 정적 프론트엔드 서빙 (SPA fallback)
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`error`]: 통합 에러 응답

pub mod error;
pub mod routes;
pub mod state;

pub use error::{error_response, ApiErrorResponse, ApiResult};
pub use routes::*;
pub use state::AppState;

#[cfg(test)]
pub use state::create_test_state;

use axum::http::{HeaderValue, StatusCode};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 전체 애플리케이션 라우터 생성.
///
/// API 라우터에 미들웨어를 적용하고, `frontend_dir`이 존재하면
/// 정적 파일 서빙을 fallback으로 붙입니다 (없는 경로는 `index.html`).
pub fn create_app(state: Arc<AppState>, frontend_dir: &Path, cors_origins: &[String]) -> Router {
    let router = create_api_router().with_state(state);

    let router = if frontend_dir.is_dir() {
        info!(dir = %frontend_dir.display(), "Serving frontend");
        let index = ServeFile::new(frontend_dir.join("index.html"));
        router.fallback_service(ServeDir::new(frontend_dir).fallback(index))
    } else {
        warn!(dir = %frontend_dir.display(), "Frontend directory not found, API only");
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer(cors_origins))
}

/// CORS 레이어 생성.
///
/// origin 목록이 비어 있으면 모든 origin을 허용합니다.
fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        if !cors_origins.is_empty() {
            warn!("cors_origins contains no valid origins, allowing any");
        }
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        // preflight 요청 캐시 시간
        .max_age(Duration::from_secs(3600))
}
