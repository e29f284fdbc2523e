//! 두 자산 비교.
//!
//! 공통 거래일 기준으로 다음을 계산합니다:
//! - 기준 100 누적 지수 (`index_k = 100 * exp(r_1 + ... + r_k)`)
//! - Pearson 상관계수
//! - 연환산 변동성 (모표준편차 × √252)

use chrono::NaiveDate;
use corrlab_core::{
    round_dp, ReturnSeries, CORRELATION_DECIMALS, INDEX_DECIMALS, VOLATILITY_DECIMALS,
};
use serde::{Deserialize, Serialize};

use crate::correlation::calculate_correlation;

/// 누적 지수 기준값.
pub const INDEX_BASE: f64 = 100.0;

/// 연간 거래일 수.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 수익률 시퀀스를 기준 100 누적 지수로 변환합니다.
///
/// 기준값 자체는 출력에 포함하지 않으므로 길이는 입력과 같습니다.
pub fn cumulative_index(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(INDEX_BASE, |level, r| {
            *level *= r.exp();
            Some(*level)
        })
        .collect()
}

/// 연환산 변동성.
///
/// 모표준편차(자유도 보정 없음)에 √252를 곱합니다. 수익률이 2개 미만이면 0.
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    variance.sqrt() * (TRADING_DAYS_PER_YEAR as f64).sqrt()
}

/// 누적 지수 한 점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    /// 소수 2자리 지수 값
    pub value: f64,
}

/// 두 자산 비교 결과 (자산 메타데이터 제외).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairComparison {
    pub timeseries_a: Vec<IndexPoint>,
    pub timeseries_b: Vec<IndexPoint>,
    pub common_dates: Vec<String>,
    pub sample_count: usize,
    pub correlation: f64,
    pub volatility_a: f64,
    pub volatility_b: f64,
}

impl PairComparison {
    /// 공통 거래일이 2일 미만일 때의 빈 결과.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

/// 기간 필터가 적용된 두 수익률 시계열을 비교합니다.
///
/// 공통 거래일이 2일 미만이면 [`PairComparison::empty`].
pub fn compare_returns(a: &ReturnSeries, b: &ReturnSeries) -> PairComparison {
    let common = a.common_dates(b);
    if common.len() < 2 {
        return PairComparison::empty();
    }

    let returns_a = a.values_at(&common);
    let returns_b = b.values_at(&common);

    let correlation = calculate_correlation(&returns_a, &returns_b).unwrap_or(0.0);

    PairComparison {
        timeseries_a: index_points(&common, &returns_a),
        timeseries_b: index_points(&common, &returns_b),
        common_dates: common.iter().map(format_date).collect(),
        sample_count: common.len(),
        correlation: round_dp(correlation, CORRELATION_DECIMALS),
        volatility_a: round_dp(annualized_volatility(&returns_a), VOLATILITY_DECIMALS),
        volatility_b: round_dp(annualized_volatility(&returns_b), VOLATILITY_DECIMALS),
    }
}

fn index_points(dates: &[NaiveDate], returns: &[f64]) -> Vec<IndexPoint> {
    dates
        .iter()
        .zip(cumulative_index(returns))
        .map(|(date, value)| IndexPoint {
            date: format_date(date),
            value: round_dp(value, INDEX_DECIMALS),
        })
        .collect()
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
