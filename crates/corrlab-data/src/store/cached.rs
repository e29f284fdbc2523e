//! 자산 ID 단위 읽기 캐시.
//!
//! 같은 자산을 여러 번 요청해도 저장소를 한 번만 읽습니다.
//! 로드 실패는 캐시하지 않습니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

use corrlab_core::{CorrLabResult, PriceSeries};

use super::PriceStore;

/// 캐시 통계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 캐시 적중 수
    pub hits: u64,
    /// 캐시 미스 수
    pub misses: u64,
    /// 캐시된 자산 수
    pub entries: usize,
}

/// 내부 저장소 앞에 두는 읽기 캐시.
pub struct CachedPriceStore<S> {
    inner: S,
    cache: RwLock<HashMap<String, PriceSeries>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: PriceStore> CachedPriceStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// 캐시를 비웁니다.
    pub fn clear(&self) {
        // 오염된 락이어도 맵 자체는 일관성이 있으므로 그대로 사용
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self
            .cache
            .read()
            .map(|c| c.len())
            .unwrap_or_else(|e| e.into_inner().len());

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}

impl<S: PriceStore> PriceStore for CachedPriceStore<S> {
    fn load(&self, asset_id: &str) -> CorrLabResult<PriceSeries> {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(series) = cache.get(asset_id) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(series.clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let series = self.inner.load(asset_id)?;

        debug!(asset_id, rows = series.len(), "Caching price series");
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(asset_id.to_string(), series.clone());

        Ok(series)
    }
}
