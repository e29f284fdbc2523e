//! 애플리케이션 공유 상태.
//!
//! 모든 API 핸들러에서 공유되는 상태를 정의합니다.
//! 엔진은 읽기 전용이며, 선택적 가격 캐시만 내부적으로 잠금을 사용합니다.

use std::sync::Arc;

use corrlab_analytics::CorrelationEngine;
use corrlab_core::{AppConfig, CorrLabError, CorrLabResult};
use corrlab_data::{CacheStats, CachedPriceStore, CsvPriceStore, PriceStore};
use tracing::info;

use crate::error::{error_response, ApiResult};

/// 애플리케이션 공유 상태.
pub struct AppState {
    /// 상관관계 분석 엔진
    pub engine: Arc<CorrelationEngine>,

    /// 가격 캐시 (활성화된 경우)
    pub cache: Option<Arc<CachedPriceStore<CsvPriceStore>>>,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 엔진으로 AppState 생성.
    pub fn new(engine: CorrelationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            cache: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 설정에서 CSV 저장소와 엔진을 구성합니다.
    ///
    /// `data.cache_enabled`가 켜져 있으면 CSV 저장소를 읽기 캐시로 감쌉니다.
    pub fn from_config(config: &AppConfig) -> Self {
        let registry = config.registry();
        let csv = CsvPriceStore::new(config.data.dir.clone(), registry.clone());

        info!(
            data_dir = %config.data.dir.display(),
            assets = registry.len(),
            cache_enabled = config.data.cache_enabled,
            "Price store configured"
        );

        if config.data.cache_enabled {
            let cache = Arc::new(CachedPriceStore::new(csv));
            let store: Arc<dyn PriceStore> = cache.clone();
            let mut state = Self::new(CorrelationEngine::new(registry, store));
            state.cache = Some(cache);
            state
        } else {
            Self::new(CorrelationEngine::new(registry, Arc::new(csv)))
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 캐시 통계 (캐시 비활성화 시 None).
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// 엔진 호출을 블로킹 스레드 풀에서 실행합니다.
    ///
    /// 파일 읽기와 계산이 async 런타임을 막지 않도록 `spawn_blocking`을 사용합니다.
    pub async fn run_engine<T, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&CorrelationEngine) -> CorrLabResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || f(engine.as_ref()))
            .await
            .map_err(|e| {
                error_response(CorrLabError::Internal(format!(
                    "분석 작업 실행 실패: {}",
                    e
                )))
            })?
            .map_err(error_response)
    }
}

/// 테스트용 AppState 생성.
///
/// 메모리 저장소에 두 자산(AAA, BBB)의 가격을 넣어 둡니다.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    use chrono::{Duration, NaiveDate};
    use corrlab_core::{Asset, AssetRegistry, PricePoint};
    use corrlab_data::MemoryPriceStore;

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = |closes: &[f64]| -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(start + Duration::days(i as i64), *c))
            .collect()
    };

    let registry = AssetRegistry::new(vec![
        Asset::new("AAA", "Asset A"),
        Asset::new("BBB", "Asset B"),
    ]);
    let store = MemoryPriceStore::new()
        .with_series("AAA", points(&[100.0, 102.0, 101.0, 104.0, 103.0]))
        .with_series("BBB", points(&[50.0, 49.0, 50.5, 49.5, 51.0]));

    AppState::new(CorrelationEngine::new(registry, Arc::new(store)))
}
