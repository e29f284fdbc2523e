//! 상관계수 계산 모듈.
//!
//! 자산 간 수익률 움직임의 상관관계를 계산합니다.
//!
//! # 주요 기능
//!
//! - **Pearson 상관계수**: 두 수익률 벡터 간 선형 상관관계 측정
//! - **날짜 정렬 상관**: 두 수익률 시계열의 공통 거래일만으로 계산
//! - **상관행렬**: 전체 자산 간 상관관계를 N×N 행렬로 표현
//!
//! # 표본 부족 센티널
//!
//! 공통 거래일이 2일 미만이면 상관계수 0.0, 표본 수 0을 보고합니다.
//! 통계적 0이 아니라 "데이터 부족"을 뜻하는 약속된 값입니다.
//!
//! # 예시
//!
//! ```rust,ignore
//! use corrlab_analytics::correlation::calculate_correlation;
//!
//! let returns_a = vec![0.01, -0.02, 0.015, 0.005];
//! let returns_b = vec![0.008, -0.015, 0.012, 0.003];
//!
//! let corr = calculate_correlation(&returns_a, &returns_b);
//! println!("상관계수: {:.4}", corr.unwrap_or(0.0));
//! ```

use corrlab_core::{round_dp, ReturnSeries, CORRELATION_DECIMALS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pearson 상관계수 계산.
///
/// 두 수익률 벡터 간의 상관계수를 계산합니다.
///
/// # 인자
///
/// * `x` - 첫 번째 수익률 벡터
/// * `y` - 두 번째 수익률 벡터 (x와 같은 날짜 순서)
///
/// # 반환
///
/// 상관계수 (-1.0 ~ 1.0). 길이가 다르거나 2개 미만이거나
/// 분모가 0(어느 한쪽의 분산이 0)이면 None
pub fn calculate_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;

    // 평균 계산
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    // 공분산 및 편차 제곱합 계산
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return None;
    }

    Some(cov / denominator)
}

/// 두 자산의 상관계수와 표본 수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairCorrelation {
    /// 소수 4자리로 반올림된 상관계수 (정의되지 않으면 0.0)
    pub correlation: f64,
    /// 공통 거래일 수 (표본 부족이면 0)
    pub sample_count: usize,
}

impl PairCorrelation {
    /// 표본 부족 센티널.
    pub const INSUFFICIENT: PairCorrelation = PairCorrelation {
        correlation: 0.0,
        sample_count: 0,
    };
}

/// 공통 거래일로 정렬한 두 수익률 시계열의 상관계수.
///
/// 공통 거래일이 2일 미만이면 [`PairCorrelation::INSUFFICIENT`].
/// 분산이 0이면 상관계수 0.0과 실제 표본 수를 반환합니다.
pub fn correlate(a: &ReturnSeries, b: &ReturnSeries) -> PairCorrelation {
    let common = a.common_dates(b);
    if common.len() < 2 {
        return PairCorrelation::INSUFFICIENT;
    }

    let aligned_a = a.values_at(&common);
    let aligned_b = b.values_at(&common);
    let correlation = calculate_correlation(&aligned_a, &aligned_b).unwrap_or(0.0);

    PairCorrelation {
        correlation: round_dp(correlation, CORRELATION_DECIMALS),
        sample_count: common.len(),
    }
}

/// 상관행렬의 한 칸.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationCell {
    pub asset_a: String,
    pub asset_b: String,
    pub correlation: f64,
    pub sample_count: usize,
}

/// 상관행렬 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// 자산 목록 (행/열 순서)
    pub assets: Vec<String>,
    /// N×N 셀. `cells[i][j]`는 (assets[i], assets[j])
    pub cells: Vec<Vec<CorrelationCell>>,
}

impl CorrelationMatrix {
    /// 상관행렬 계산.
    ///
    /// 대각선을 포함한 모든 순서쌍 (i, j)를 같은 방식으로 계산합니다.
    /// 수익률이 2개 미만인 자산은 자기 자신과의 상관도 0.0 센티널입니다.
    ///
    /// # 인자
    ///
    /// * `assets` - 행렬 순서대로의 자산 ID
    /// * `returns` - 자산별 (기간 필터 적용된) 수익률. 없는 자산은 빈 시계열로 취급
    pub fn compute(assets: &[String], returns: &HashMap<String, ReturnSeries>) -> Self {
        let empty = ReturnSeries::new();
        let series_of = |id: &String| returns.get(id).unwrap_or(&empty);

        let cells = assets
            .iter()
            .map(|asset_a| {
                assets
                    .iter()
                    .map(|asset_b| {
                        let pair = correlate(series_of(asset_a), series_of(asset_b));
                        CorrelationCell {
                            asset_a: asset_a.clone(),
                            asset_b: asset_b.clone(),
                            correlation: pair.correlation,
                            sample_count: pair.sample_count,
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            assets: assets.to_vec(),
            cells,
        }
    }

    /// (i, j) 셀.
    pub fn cell(&self, i: usize, j: usize) -> Option<&CorrelationCell> {
        self.cells.get(i).and_then(|row| row.get(j))
    }

    /// 자산 ID 쌍으로 셀 조회.
    pub fn get(&self, asset_a: &str, asset_b: &str) -> Option<&CorrelationCell> {
        let i = self.assets.iter().position(|a| a == asset_a)?;
        let j = self.assets.iter().position(|a| a == asset_b)?;
        self.cell(i, j)
    }

    /// 행렬 크기 (자산 수).
    pub fn size(&self) -> usize {
        self.assets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(start_day: i64, values: &[f64]) -> ReturnSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (base + Duration::days(start_day + i as i64), *v))
            .collect()
    }

    #[test]
    fn test_correlation_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let corr = calculate_correlation(&x, &y).unwrap();
        assert!((corr - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        let corr = calculate_correlation(&x, &y).unwrap();
        assert!((corr + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_insufficient_or_mismatched() {
        assert!(calculate_correlation(&[1.0], &[2.0]).is_none());
        assert!(calculate_correlation(&[1.0, 2.0, 3.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_correlation_zero_variance() {
        let x = vec![0.01, 0.01, 0.01];
        let y = vec![0.02, -0.01, 0.03];
        assert!(calculate_correlation(&x, &y).is_none());
    }

    #[test]
    fn test_correlate_no_overlap_is_sentinel() {
        let a = series(0, &[0.01, 0.02, 0.03]);
        let b = series(10, &[0.01, 0.02, 0.03]);
        assert_eq!(correlate(&a, &b), PairCorrelation::INSUFFICIENT);
    }

    #[test]
    fn test_correlate_single_overlap_is_sentinel() {
        let a = series(0, &[0.01, 0.02, 0.03]);
        let b = series(2, &[0.05, 0.01]);
        let pair = correlate(&a, &b);
        assert_eq!(pair.correlation, 0.0);
        assert_eq!(pair.sample_count, 0);
    }

    #[test]
    fn test_correlate_zero_variance_keeps_sample_count() {
        let a = series(0, &[0.01, 0.01, 0.01]);
        let b = series(0, &[0.02, -0.01, 0.03]);
        let pair = correlate(&a, &b);
        assert_eq!(pair.correlation, 0.0);
        assert_eq!(pair.sample_count, 3);
    }

    #[test]
    fn test_correlate_aligns_on_common_dates() {
        // a: day0..4, b: day2..6 → 공통 day2..4
        let a = series(0, &[0.5, -0.5, 0.01, 0.02, 0.03]);
        let b = series(2, &[0.02, 0.04, 0.06, 9.0, -9.0]);
        let pair = correlate(&a, &b);
        assert_eq!(pair.sample_count, 3);
        assert_eq!(pair.correlation, 1.0);
    }

    #[test]
    fn test_identical_series_rounds_to_one() {
        let a = series(0, &[0.013, -0.021, 0.007, 0.019, -0.004]);
        let pair = correlate(&a, &a.clone());
        assert_eq!(pair.correlation, 1.0);
        assert_eq!(pair.sample_count, 5);
    }

    #[test]
    fn test_correlation_is_rounded_to_four_decimals() {
        let a = series(0, &[0.01, -0.02, 0.015, 0.005, -0.011]);
        let b = series(0, &[0.008, -0.015, 0.002, 0.009, 0.004]);
        let pair = correlate(&a, &b);
        let scaled = pair.correlation * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn test_correlation_matrix() {
        let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let mut returns = HashMap::new();
        returns.insert("A".to_string(), series(0, &[0.05, -0.03, 0.08, -0.02, 0.06]));
        // B: A에 비례
        returns.insert("B".to_string(), series(0, &[0.025, -0.015, 0.04, -0.01, 0.03]));
        // C: A와 반대
        returns.insert("C".to_string(), series(0, &[-0.04, 0.03, -0.07, 0.02, -0.05]));
        // D: 수익률 1개뿐
        returns.insert("D".to_string(), series(0, &[0.01]));

        let m = CorrelationMatrix::compute(&ids, &returns);
        assert_eq!(m.size(), 4);
        assert_eq!(m.cells.len(), 4);
        assert!(m.cells.iter().all(|row| row.len() == 4));

        // 대각선은 1.0 (표본 충분 시)
        assert_eq!(m.get("A", "A").unwrap().correlation, 1.0);
        assert_eq!(m.get("A", "A").unwrap().sample_count, 5);
        // 표본 부족 자산은 자기 자신과도 센티널
        assert_eq!(m.get("D", "D").unwrap().correlation, 0.0);
        assert_eq!(m.get("D", "D").unwrap().sample_count, 0);

        assert_eq!(m.get("A", "B").unwrap().correlation, 1.0);
        assert!(m.get("A", "C").unwrap().correlation < -0.9);

        // 대칭 확인
        for i in 0..4 {
            for j in 0..4 {
                let ij = m.cell(i, j).unwrap();
                let ji = m.cell(j, i).unwrap();
                assert_eq!(ij.correlation, ji.correlation);
                assert_eq!(ij.sample_count, ji.sample_count);
                assert_eq!(ij.asset_a, ids[i]);
                assert_eq!(ij.asset_b, ids[j]);
            }
        }
    }

    #[test]
    fn test_correlation_matrix_missing_asset_is_empty() {
        let ids = vec!["A".to_string(), "Z".to_string()];
        let mut returns = HashMap::new();
        returns.insert("A".to_string(), series(0, &[0.01, 0.02, 0.04]));

        let m = CorrelationMatrix::compute(&ids, &returns);
        assert_eq!(m.get("A", "Z").unwrap().sample_count, 0);
        assert_eq!(m.get("Z", "Z").unwrap().correlation, 0.0);
    }
}
