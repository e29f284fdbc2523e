//! 보고용 소수점 반올림.
//!
//! 상관계수/변동성은 소수 4자리, 지수화 누적 수익은 소수 2자리로 보고합니다.
//! f64의 최단 십진 표현을 기준으로 0.5는 0에서 먼 쪽으로 반올림합니다
//! (예: 0.125 → 0.13, -0.125 → -0.13).

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 상관계수 보고 자릿수
pub const CORRELATION_DECIMALS: u32 = 4;

/// 변동성 보고 자릿수
pub const VOLATILITY_DECIMALS: u32 = 4;

/// 누적 지수 보고 자릿수
pub const INDEX_DECIMALS: u32 = 2;

/// 소수점 `dp`자리로 반올림합니다.
///
/// NaN/무한대는 Decimal로 표현할 수 없으므로 그대로 반환합니다.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    to_decimal(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// f64의 최단 왕복 십진 표현(`Display`)으로 Decimal을 만듭니다.
fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_from_shortest_repr() {
        assert_eq!(to_decimal(0.1), Some(dec!(0.1)));
        assert_eq!(to_decimal(-0.125), Some(dec!(-0.125)));
        // 2.675는 이진수로 2.67499...이지만 최단 표현 기준으로 반올림
        assert_eq!(round_dp(2.675, 2), 2.68);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_dp(0.125, 2), 0.13);
        assert_eq!(round_dp(-0.125, 2), -0.13);
        assert_eq!(round_dp(0.5, 0), 1.0);
        assert_eq!(round_dp(-2.5, 0), -3.0);
    }

    #[test]
    fn test_round_correlation_precision() {
        assert_eq!(round_dp(0.876_543_21, CORRELATION_DECIMALS), 0.8765);
        assert_eq!(round_dp(-0.999_99, CORRELATION_DECIMALS), -1.0);
        assert_eq!(round_dp(1.0, CORRELATION_DECIMALS), 1.0);
        assert_eq!(round_dp(0.0, CORRELATION_DECIMALS), 0.0);
    }

    #[test]
    fn test_round_index_values() {
        assert_eq!(round_dp(104.999_999_9, INDEX_DECIMALS), 105.0);
        assert_eq!(round_dp(103.004, INDEX_DECIMALS), 103.0);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }
}
