//! 상관관계 분석 시스템의 에러 타입.
//!
//! 통계적으로 정의되지 않는 입력(표본 부족, 분산 0)은 에러가 아니라
//! 0.0 상관계수 같은 약속된 센티널 값으로 처리됩니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CorrLabError {
    /// 알 수 없는 자산 ID, 또는 등록된 자산의 가격 데이터가 없거나 읽을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 잘못된 기간 토큰
    #[error("잘못된 기간: {0}")]
    InvalidRange(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 분석 작업을 위한 Result 타입.
pub type CorrLabResult<T> = Result<T, CorrLabError>;

impl CorrLabError {
    /// 자산을 찾을 수 없다는 에러를 생성합니다.
    pub fn asset_not_found(asset_id: &str) -> Self {
        CorrLabError::NotFound(format!("Asset {} not found", asset_id))
    }

    /// 클라이언트 요청 문제로 인한 에러인지 확인합니다.
    ///
    /// 이 시스템에는 재시도 가능한 에러가 없습니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CorrLabError::NotFound(_) | CorrLabError::InvalidRange(_)
        )
    }
}

impl From<config::ConfigError> for CorrLabError {
    fn from(err: config::ConfigError) -> Self {
        CorrLabError::Config(err.to_string())
    }
}
