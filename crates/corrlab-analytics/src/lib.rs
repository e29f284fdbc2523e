//! 자산 상관관계 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 로그 수익률 변환
//! - 기준일 기준 기간 필터
//! - 공통 거래일 정렬 및 Pearson 상관계수 / 상관행렬
//! - 두 자산 비교 (기준 100 누적 지수, 연환산 변동성)
//! - 상관행렬 인사이트 (최고 양의 상관, 최강 음의 상관, 0에 가까운 상관)
//! - 요청 단위 엔진 파사드 ([`CorrelationEngine`])
//!
//! # 동작 흐름
//!
//! ```text
//! 가격 로드 → 로그 수익률 → 기간 필터 → 정렬/상관계수 ─┬→ 상관행렬 → 인사이트
//!                                                       └→ 비교 (누적 지수, 변동성)
//! ```

pub mod comparison;
pub mod correlation;
pub mod engine;
pub mod insights;
pub mod returns;
pub mod window;

// Correlation re-export
pub use correlation::{
    calculate_correlation, correlate, CorrelationCell, CorrelationMatrix, PairCorrelation,
};

// Comparison re-export
pub use comparison::{
    annualized_volatility, compare_returns, cumulative_index, IndexPoint, PairComparison,
    INDEX_BASE, TRADING_DAYS_PER_YEAR,
};

// Insights re-export
pub use insights::{generate_insights, Insight, InsightKind, MAX_INSIGHTS};

// Engine re-export
pub use engine::{
    AssetLoadOutcome, ComparisonReport, ComparisonSide, CorrelationEngine, CorrelationMatrixReport,
    InsightsReport, LoadOutcome, ReferenceDateReport,
};

pub use returns::to_log_returns;
pub use window::filter_by_range;
