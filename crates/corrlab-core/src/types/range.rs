//! 조회 기간 토큰 정의.
//!
//! 기간은 기준일(Reference Date)로부터 거꾸로 계산됩니다.
//!
//! | 토큰 | 시작일 |
//! |------|--------|
//! | 1M | 기준일 − 30일 |
//! | 3M | 기준일 − 90일 |
//! | 6M | 기준일 − 180일 |
//! | 1Y | 기준일 − 365일 |
//! | 3Y | 기준일 − 1095일 |
//! | 5Y | 기준일 − 1825일 |
//! | 10Y | 기준일 − 3650일 |
//! | MAX | 하한 없음 |
//! | YTD | 기준일 연도의 1월 1일 |
//! | 그 외 | 1Y와 동일 |

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CorrLabError;

/// 경계 계층에서 허용하는 기간 토큰 목록.
pub const RANGE_TOKENS: [&str; 9] = ["1M", "3M", "6M", "1Y", "3Y", "5Y", "10Y", "MAX", "YTD"];

/// 조회 기간.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RangeToken {
    /// 1개월 (30일)
    OneMonth,
    /// 3개월 (90일)
    ThreeMonths,
    /// 6개월 (180일)
    SixMonths,
    /// 1년 (365일)
    #[default]
    OneYear,
    /// 3년 (1095일)
    ThreeYears,
    /// 5년 (1825일)
    FiveYears,
    /// 10년 (3650일)
    TenYears,
    /// 전체 기간
    Max,
    /// 연초 이후
    Ytd,
    /// 인식할 수 없는 토큰. 원문을 보존하고 1Y 구간을 사용합니다.
    Unrecognized(String),
}

impl RangeToken {
    /// 토큰을 관대하게 파싱합니다. 인식할 수 없으면 [`RangeToken::Unrecognized`].
    pub fn parse_lenient(s: &str) -> Self {
        s.parse()
            .unwrap_or_else(|_| RangeToken::Unrecognized(s.to_string()))
    }

    /// 기준일로부터 되돌아가는 일수 (MAX, YTD는 None).
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            RangeToken::OneMonth => Some(30),
            RangeToken::ThreeMonths => Some(90),
            RangeToken::SixMonths => Some(180),
            RangeToken::OneYear => Some(365),
            RangeToken::ThreeYears => Some(365 * 3),
            RangeToken::FiveYears => Some(365 * 5),
            RangeToken::TenYears => Some(365 * 10),
            RangeToken::Max | RangeToken::Ytd => None,
            RangeToken::Unrecognized(_) => Some(365),
        }
    }

    /// 기준일에 대한 조회 구간을 계산합니다.
    pub fn window(&self, reference_date: NaiveDate) -> RangeWindow {
        let start = match self {
            RangeToken::Max => None,
            RangeToken::Ytd => NaiveDate::from_ymd_opt(reference_date.year(), 1, 1),
            other => other
                .lookback_days()
                .map(|days| reference_date - Duration::days(days)),
        };

        RangeWindow {
            start,
            reference_date,
        }
    }

    /// 토큰 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        match self {
            RangeToken::OneMonth => "1M",
            RangeToken::ThreeMonths => "3M",
            RangeToken::SixMonths => "6M",
            RangeToken::OneYear => "1Y",
            RangeToken::ThreeYears => "3Y",
            RangeToken::FiveYears => "5Y",
            RangeToken::TenYears => "10Y",
            RangeToken::Max => "MAX",
            RangeToken::Ytd => "YTD",
            RangeToken::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RangeToken {
    type Err = CorrLabError;

    /// 엄격한 파싱. 대소문자를 구분합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1M" => Ok(RangeToken::OneMonth),
            "3M" => Ok(RangeToken::ThreeMonths),
            "6M" => Ok(RangeToken::SixMonths),
            "1Y" => Ok(RangeToken::OneYear),
            "3Y" => Ok(RangeToken::ThreeYears),
            "5Y" => Ok(RangeToken::FiveYears),
            "10Y" => Ok(RangeToken::TenYears),
            "MAX" => Ok(RangeToken::Max),
            "YTD" => Ok(RangeToken::Ytd),
            _ => Err(CorrLabError::InvalidRange(format!(
                "'{}' (허용: {})",
                s,
                RANGE_TOKENS.join(", ")
            ))),
        }
    }
}

impl Serialize for RangeToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RangeToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(RangeToken::parse_lenient(&raw))
    }
}

/// 기준일과 기간 토큰으로 계산된 조회 구간.
///
/// 상한은 두지 않습니다. 시계열은 각자의 마지막 날짜에서 끝납니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    /// 구간 시작일 (포함). None이면 하한 없음.
    pub start: Option<NaiveDate>,
    /// 기준일
    pub reference_date: NaiveDate,
}

impl RangeWindow {
    /// 날짜가 구간에 포함되는지 확인합니다 (`date >= start`).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start)
    }
}
