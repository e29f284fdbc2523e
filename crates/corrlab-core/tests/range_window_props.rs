//! 기간 구간 속성 테스트

use chrono::{Datelike, Duration, NaiveDate};
use corrlab_core::{RangeToken, RANGE_TOKENS};
use proptest::prelude::*;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 기준 약 30년 범위
    (0i64..11_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
    })
}

proptest! {
    #[test]
    fn ytd_window_starts_in_reference_year(reference in any_date()) {
        let start = RangeToken::Ytd.window(reference).start.unwrap();
        prop_assert_eq!(start.year(), reference.year());
        prop_assert_eq!(start.ordinal(), 1);
        prop_assert!(start <= reference);
    }

    #[test]
    fn max_window_contains_everything(reference in any_date(), probe in any_date()) {
        prop_assert!(RangeToken::Max.window(reference).contains(probe));
    }

    #[test]
    fn fixed_windows_never_start_after_reference(reference in any_date(), idx in 0usize..RANGE_TOKENS.len()) {
        let token: RangeToken = RANGE_TOKENS[idx].parse().unwrap();
        if let Some(start) = token.window(reference).start {
            prop_assert!(start <= reference);
        }
    }

    #[test]
    fn unrecognized_tokens_behave_like_one_year(reference in any_date(), raw in "[a-z]{1,4}") {
        let token = RangeToken::parse_lenient(&raw);
        prop_assert_eq!(
            token.window(reference).start,
            RangeToken::OneYear.window(reference).start
        );
    }
}
