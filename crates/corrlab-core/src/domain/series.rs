//! 가격 및 수익률 시계열.
//!
//! - [`PriceSeries`]: 날짜 오름차순 (날짜, 종가) 시퀀스
//! - [`ReturnSeries`]: 날짜 → 로그 수익률 맵 (날짜 오름차순 순회)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 일별 종가.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 거래일
    pub date: NaiveDate,
    /// 종가
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// 자산별 가격 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// 자산 ID
    pub asset_id: String,
    /// 날짜 오름차순 가격
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 가격 시계열을 생성합니다. 입력 순서와 무관하게 날짜순으로 정렬됩니다.
    ///
    /// 중복 날짜는 제거하지 않습니다 (안정 정렬로 입력 순서 유지).
    pub fn new(asset_id: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            asset_id: asset_id.into(),
            points,
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 가장 최근 날짜.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 날짜별 로그 수익률.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    returns: BTreeMap<NaiveDate, f64>,
}

impl ReturnSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, value: f64) {
        self.returns.insert(date, value);
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.returns.get(date).copied()
    }

    /// 날짜 오름차순 순회.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &f64)> {
        self.returns.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.returns.keys()
    }

    /// 두 시계열에 공통으로 존재하는 날짜 (오름차순).
    pub fn common_dates(&self, other: &ReturnSeries) -> Vec<NaiveDate> {
        let mine: BTreeSet<&NaiveDate> = self.returns.keys().collect();
        other
            .returns
            .keys()
            .filter(|d| mine.contains(d))
            .copied()
            .collect()
    }

    /// 주어진 날짜들에 해당하는 값을 순서대로 추출합니다. 없는 날짜는 건너뜁니다.
    pub fn values_at(&self, dates: &[NaiveDate]) -> Vec<f64> {
        dates.iter().filter_map(|d| self.get(d)).collect()
    }

    /// 조건을 만족하는 날짜만 남긴 새 시계열.
    pub fn retain_dates<F>(&self, mut keep: F) -> ReturnSeries
    where
        F: FnMut(NaiveDate) -> bool,
    {
        self.returns
            .iter()
            .filter(|(d, _)| keep(**d))
            .map(|(d, v)| (*d, *v))
            .collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.returns.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}

impl FromIterator<(NaiveDate, f64)> for ReturnSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            returns: iter.into_iter().collect(),
        }
    }
}
