//! 가격 데이터 저장소.
//!
//! 이 crate는 다음을 제공합니다:
//! - [`PriceStore`] 트레이트: 자산 ID로 날짜순 가격 시계열 로드
//! - [`CsvPriceStore`]: 자산별 `{ASSET_ID}.csv` 파일 기반 저장소
//! - [`MemoryPriceStore`]: 메모리 기반 저장소 (픽스처/테스트)
//! - [`CachedPriceStore`]: 자산 ID 단위 읽기 캐시

pub mod error;
pub mod store;

pub use error::DataError;
pub use store::cached::{CacheStats, CachedPriceStore};
pub use store::csv::{parse_price_csv, CsvPriceStore};
pub use store::memory::MemoryPriceStore;
pub use store::PriceStore;
