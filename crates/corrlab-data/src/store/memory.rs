//! 메모리 기반 가격 저장소.

use std::collections::HashMap;

use corrlab_core::{CorrLabError, CorrLabResult, PricePoint, PriceSeries};

use super::PriceStore;

/// 미리 적재한 시계열을 돌려주는 저장소.
#[derive(Debug, Clone, Default)]
pub struct MemoryPriceStore {
    series: HashMap<String, PriceSeries>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 자산 시계열을 추가합니다 (빌더 스타일).
    pub fn with_series(mut self, asset_id: impl Into<String>, points: Vec<PricePoint>) -> Self {
        self.insert(asset_id, points);
        self
    }

    /// 자산 시계열을 추가하거나 교체합니다.
    pub fn insert(&mut self, asset_id: impl Into<String>, points: Vec<PricePoint>) {
        let asset_id = asset_id.into();
        let series = PriceSeries::new(asset_id.clone(), points);
        self.series.insert(asset_id, series);
    }
}

impl PriceStore for MemoryPriceStore {
    fn load(&self, asset_id: &str) -> CorrLabResult<PriceSeries> {
        self.series
            .get(asset_id)
            .cloned()
            .ok_or_else(|| CorrLabError::asset_not_found(asset_id))
    }
}
