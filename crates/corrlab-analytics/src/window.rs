//! 기간 필터.

use chrono::NaiveDate;
use corrlab_core::{RangeToken, ReturnSeries};

/// 기준일과 기간 토큰으로 수익률 시계열을 자릅니다.
///
/// 구간 시작일을 포함하며 (`date >= start`) 상한은 두지 않습니다.
/// MAX는 시계열 전체를 그대로 반환합니다.
pub fn filter_by_range(
    returns: &ReturnSeries,
    range: &RangeToken,
    reference_date: NaiveDate,
) -> ReturnSeries {
    let window = range.window(reference_date);
    match window.start {
        None => returns.clone(),
        Some(_) => returns.retain_dates(|d| window.contains(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};

    fn daily_returns(start: NaiveDate, days: i64) -> ReturnSeries {
        (0..days)
            .map(|i| (start + Duration::days(i), 0.001 * i as f64))
            .collect()
    }

    #[test]
    fn test_max_keeps_everything() {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let returns = daily_returns(start, 4000);
        let reference = returns.last_date().unwrap();

        let filtered = filter_by_range(&returns, &RangeToken::Max, reference);
        assert_eq!(filtered.len(), returns.len());
    }

    #[test]
    fn test_one_month_inclusive_start() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let returns = daily_returns(start, 100);
        let reference = returns.last_date().unwrap();

        let filtered = filter_by_range(&returns, &RangeToken::OneMonth, reference);
        // 기준일 포함 31일 (reference - 30 ..= reference)
        assert_eq!(filtered.len(), 31);
        assert_eq!(
            filtered.dates().next().copied(),
            Some(reference - Duration::days(30))
        );
    }

    #[test]
    fn test_ytd_only_reference_year() {
        let start = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        let returns = daily_returns(start, 120);
        let reference = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();

        let filtered = filter_by_range(&returns, &RangeToken::Ytd, reference);
        assert!(!filtered.is_empty());
        assert!(filtered.dates().all(|d| d.year() == 2024));
        assert_eq!(
            filtered.dates().next().copied(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_no_upper_bound() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let returns = daily_returns(start, 60);
        // 기준일이 시계열 끝보다 앞서도 이후 날짜는 남음
        let reference = start + Duration::days(40);

        let filtered = filter_by_range(&returns, &RangeToken::OneMonth, reference);
        assert_eq!(filtered.last_date(), returns.last_date());
    }

    #[test]
    fn test_unrecognized_uses_one_year() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let returns = daily_returns(start, 2000);
        let reference = returns.last_date().unwrap();

        let fallback =
            filter_by_range(&returns, &RangeToken::parse_lenient("bogus"), reference);
        let one_year = filter_by_range(&returns, &RangeToken::OneYear, reference);
        assert_eq!(fallback, one_year);
        assert_eq!(one_year.len(), 366);
    }
}
