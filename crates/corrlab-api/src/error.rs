//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{http::StatusCode, Json};
use corrlab_core::CorrLabError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "찾을 수 없음: Asset XYZ not found",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "NOT_FOUND", "INVALID_RANGE")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 도메인 에러를 HTTP 상태 코드와 에러 응답으로 변환합니다.
///
/// | 에러 | 상태 | 코드 |
/// |---|---|---|
/// | `NotFound` | 404 | `NOT_FOUND` |
/// | `InvalidRange` | 422 | `INVALID_RANGE` |
/// | `Config`, `Internal` | 500 | `INTERNAL_ERROR` |
pub fn error_response(err: CorrLabError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, code) = match &err {
        CorrLabError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CorrLabError::InvalidRange(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_RANGE"),
        CorrLabError::Config(_) | CorrLabError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    if err.is_client_error() {
        tracing::debug!(error = %err, status = status.as_u16(), "Request rejected");
    } else {
        tracing::error!(error = %err, "Request failed");
    }

    (status, Json(ApiErrorResponse::new(code, err.to_string())))
}

/// 필수 쿼리 파라미터 누락 에러 (422).
pub fn missing_parameter(name: &str) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiErrorResponse::with_details(
            "MISSING_PARAMETER",
            format!("필수 파라미터 누락: {}", name),
            serde_json::json!({ "parameter": name }),
        )),
    )
}
