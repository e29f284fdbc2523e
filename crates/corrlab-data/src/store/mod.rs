//! 가격 저장소 트레이트와 구현체.

pub mod cached;
pub mod csv;
pub mod memory;

use corrlab_core::{CorrLabResult, PriceSeries};

/// 자산별 가격 시계열 제공자.
///
/// 구현체는 읽기 전용이며 여러 요청에서 동시에 호출될 수 있습니다.
pub trait PriceStore: Send + Sync {
    /// 자산의 가격 시계열을 날짜 오름차순으로 로드합니다.
    ///
    /// # Errors
    ///
    /// 알 수 없는 자산이거나 데이터가 없거나 읽을 수 없으면 `NotFound`.
    fn load(&self, asset_id: &str) -> CorrLabResult<PriceSeries>;
}

impl<S: PriceStore + ?Sized> PriceStore for std::sync::Arc<S> {
    fn load(&self, asset_id: &str) -> CorrLabResult<PriceSeries> {
        (**self).load(asset_id)
    }
}
