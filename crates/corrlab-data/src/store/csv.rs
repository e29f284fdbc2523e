//! CSV 파일 기반 가격 저장소.
//!
//! ## CSV 파일 형식
//!
//! 자산마다 `{data_dir}/{ASSET_ID}.csv` 파일 하나를 사용합니다.
//! 헤더에 `date`, `close` 컬럼이 있어야 하며 순서와 추가 컬럼은 자유입니다.
//!
//! ```csv
//! date,open,high,low,close,volume
//! 2024-01-02,472.16,473.67,470.49,472.65,123623700
//! 2024-01-03,470.43,471.19,468.17,468.79,103585900
//! ```
//!
//! 파싱할 수 없는 행은 경고 로그를 남기고 건너뜁니다.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use corrlab_core::{AssetRegistry, CorrLabError, CorrLabResult, PricePoint, PriceSeries};

use super::PriceStore;
use crate::error::DataError;

/// 자산별 CSV 파일을 읽는 저장소.
#[derive(Debug, Clone)]
pub struct CsvPriceStore {
    data_dir: PathBuf,
    registry: AssetRegistry,
}

impl CsvPriceStore {
    /// 새 저장소를 생성합니다.
    ///
    /// # 인자
    ///
    /// * `data_dir` - CSV 파일 디렉토리
    /// * `registry` - 로드를 허용할 자산 목록
    pub fn new(data_dir: impl Into<PathBuf>, registry: AssetRegistry) -> Self {
        Self {
            data_dir: data_dir.into(),
            registry,
        }
    }

    /// 자산의 CSV 파일 경로.
    pub fn path_for(&self, asset_id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", asset_id))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl PriceStore for CsvPriceStore {
    fn load(&self, asset_id: &str) -> CorrLabResult<PriceSeries> {
        // 등록되지 않은 ID로 임의 경로에 접근하지 않도록 먼저 확인
        if !self.registry.contains(asset_id) {
            return Err(CorrLabError::asset_not_found(asset_id));
        }

        let path = self.path_for(asset_id);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            debug!(asset_id, path = %path.display(), error = %e, "Price file unreadable");
            DataError::from(e).into_not_found(asset_id)
        })?;

        let series =
            parse_price_csv(asset_id, &content).map_err(|e| e.into_not_found(asset_id))?;

        debug!(
            asset_id,
            rows = series.len(),
            last_date = ?series.last_date(),
            "Loaded price series"
        );

        Ok(series)
    }
}

/// CSV 내용을 가격 시계열로 파싱합니다.
///
/// 결과는 날짜 오름차순으로 정렬됩니다. 중복 날짜는 제거하지 않습니다.
pub fn parse_price_csv(asset_id: &str, content: &str) -> Result<PriceSeries, DataError> {
    // 스프레드시트 내보내기의 UTF-8 BOM
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    let header = lines
        .by_ref()
        .find(|line| !line.trim().is_empty())
        .ok_or(DataError::Empty)?;
    let columns: Vec<String> = split_fields(header)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let date_idx = columns
        .iter()
        .position(|c| c == "date")
        .ok_or(DataError::MissingColumn("date"))?;
    let close_idx = columns
        .iter()
        .position(|c| c == "close")
        .ok_or(DataError::MissingColumn("close"))?;

    let mut points = Vec::new();
    let mut skipped = 0usize;

    // 헤더가 1번째 줄
    for (offset, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = split_fields(line).collect();
        let parsed = fields
            .get(date_idx)
            .and_then(|raw| parse_date(raw))
            .zip(fields.get(close_idx).and_then(|raw| raw.parse::<f64>().ok()));

        match parsed {
            Some((date, close)) => points.push(PricePoint::new(date, close)),
            None => {
                skipped += 1;
                warn!(asset_id, line_no = offset + 2, "Skipping unparseable price row");
            }
        }
    }

    if skipped > 0 {
        warn!(asset_id, skipped, kept = points.len(), "Some price rows were skipped");
    }

    Ok(PriceSeries::new(asset_id, points))
}

/// 쉼표로 분리하고 공백/따옴표를 제거합니다.
fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|f| f.trim().trim_matches('"'))
}

/// `YYYY-MM-DD` 날짜를 파싱합니다. `T` 또는 공백 뒤의 시간 부분은 무시합니다.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
