//! 데이터 모듈 오류 타입.
//!
//! 호출자 입장에서는 모두 "데이터 없음"이므로 [`CorrLabError::NotFound`]로 변환됩니다.

use corrlab_core::CorrLabError;
use thiserror::Error;

/// 가격 데이터 로드 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 읽기 실패
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 필수 헤더 컬럼 누락
    #[error("Missing column '{0}' in header")]
    MissingColumn(&'static str),

    /// 빈 파일 (헤더 없음)
    #[error("Empty price table")]
    Empty,
}

impl DataError {
    /// 자산 ID 문맥을 붙여 핵심 에러로 변환합니다.
    pub fn into_not_found(self, asset_id: &str) -> CorrLabError {
        CorrLabError::NotFound(format!("Price data for {} unavailable: {}", asset_id, self))
    }
}
