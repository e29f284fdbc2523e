//! 가격 시계열 → 로그 수익률 변환.
//!
//! `r_i = ln(close_i / close_{i-1})`. 첫 가격은 기준점이 없으므로 버립니다.
//!
//! 종가가 0 이하이거나 유한하지 않으면 로그가 정의되지 않으므로
//! 해당 가격을 포함하는 수익률은 건너뛰고 경고 로그를 남깁니다.

use corrlab_core::{PriceSeries, ReturnSeries};
use tracing::warn;

/// 가격 시계열을 날짜별 로그 수익률로 변환합니다.
///
/// # 반환
///
/// 정상 데이터의 경우 길이가 `prices.len() - 1`인 수익률 시계열
pub fn to_log_returns(series: &PriceSeries) -> ReturnSeries {
    let mut dropped = 0usize;

    let returns: ReturnSeries = series
        .points()
        .windows(2)
        .filter_map(|w| {
            let (prev, curr) = (w[0], w[1]);
            if is_valid_price(prev.close) && is_valid_price(curr.close) {
                Some((curr.date, (curr.close / prev.close).ln()))
            } else {
                dropped += 1;
                None
            }
        })
        .collect();

    if dropped > 0 {
        warn!(
            asset_id = %series.asset_id,
            dropped,
            "Dropped returns with non-positive or non-finite close prices"
        );
    }

    returns
}

fn is_valid_price(close: f64) -> bool {
    close.is_finite() && close > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use corrlab_core::PricePoint;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(start + chrono::Duration::days(i as i64), *c))
            .collect();
        PriceSeries::new("TEST", points)
    }

    #[test]
    fn test_log_returns_example() {
        let returns = to_log_returns(&series(&[100.0, 105.0, 103.0]));
        let values: Vec<f64> = returns.iter().map(|(_, v)| *v).collect();

        assert_eq!(values.len(), 2);
        assert!((values[0] - 1.05f64.ln()).abs() < 1e-12);
        assert!((values[0] - 0.04879).abs() < 1e-5);
        assert!((values[1] - (-0.01923)).abs() < 1e-5);
    }

    #[test]
    fn test_first_date_dropped() {
        let s = series(&[10.0, 11.0, 12.0]);
        let returns = to_log_returns(&s);
        assert_eq!(returns.dates().next(), Some(&s.points()[1].date));
        assert_eq!(returns.len(), s.len() - 1);
    }

    #[test]
    fn test_short_series_has_no_returns() {
        assert!(to_log_returns(&series(&[])).is_empty());
        assert!(to_log_returns(&series(&[100.0])).is_empty());
    }

    #[test]
    fn test_non_positive_prices_drop_adjacent_returns() {
        // 0 가격은 앞뒤 두 수익률 모두 정의되지 않음
        let s = series(&[100.0, 0.0, 100.0, 110.0, -5.0]);
        let returns = to_log_returns(&s);

        assert_eq!(returns.len(), 1);
        let (date, value) = returns.iter().next().unwrap();
        assert_eq!(*date, s.points()[3].date);
        assert!((value - 1.1f64.ln()).abs() < 1e-12);
        assert!(returns.iter().all(|(_, v)| v.is_finite()));
    }
}
