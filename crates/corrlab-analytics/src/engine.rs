//! 요청 단위 분석 엔진.
//!
//! [`CorrelationEngine`]은 자산 레지스트리와 가격 저장소를 주입받아
//! 상관행렬, 두 자산 비교, 인사이트를 계산합니다.
//!
//! 각 요청은 전체 자산을 한 번 로드하여 기준일 보고서를 만들고,
//! 같은 로드 결과를 계산에 재사용합니다.

use chrono::{NaiveDate, Utc};
use corrlab_core::{
    Asset, AssetNames, AssetRegistry, CorrLabError, CorrLabResult, PriceSeries, RangeToken,
    ReturnSeries,
};
use corrlab_data::PriceStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::comparison::{compare_returns, IndexPoint};
use crate::correlation::{CorrelationCell, CorrelationMatrix};
use crate::insights::{generate_insights, Insight};
use crate::returns::to_log_returns;
use crate::window::filter_by_range;

/// 자산별 로드 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// 로드 성공 (마지막 거래일)
    Loaded { last_date: NaiveDate },
    /// 로드는 되었으나 가격이 없음
    Empty,
    /// 로드 실패
    Unavailable { reason: String },
}

/// 자산 ID와 로드 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetLoadOutcome {
    pub asset_id: String,
    #[serde(flatten)]
    pub outcome: LoadOutcome,
}

/// 기준일 계산 보고서.
///
/// 기준일은 로드된 자산들의 마지막 거래일 중 최솟값입니다.
/// 로드된 자산이 하나도 없으면 오늘(UTC) 날짜입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDateReport {
    pub reference_date: NaiveDate,
    pub outcomes: Vec<AssetLoadOutcome>,
}

impl ReferenceDateReport {
    /// 로드 결과에서 기준일을 도출합니다.
    pub fn from_outcomes(outcomes: Vec<AssetLoadOutcome>) -> Self {
        let reference_date = outcomes
            .iter()
            .filter_map(|o| match o.outcome {
                LoadOutcome::Loaded { last_date } => Some(last_date),
                _ => None,
            })
            .min()
            .unwrap_or_else(|| Utc::now().date_naive());

        Self {
            reference_date,
            outcomes,
        }
    }

    /// 로드에 실패한 자산 ID.
    pub fn unavailable(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, LoadOutcome::Unavailable { .. }))
            .map(|o| o.asset_id.as_str())
            .collect()
    }

    /// 기준일에 기여한 자산이 있는지.
    pub fn has_loaded(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.outcome, LoadOutcome::Loaded { .. }))
    }
}

/// 상관행렬 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrixReport {
    pub assets: Vec<String>,
    pub asset_names: AssetNames,
    pub matrix: Vec<Vec<CorrelationCell>>,
    pub reference_date: NaiveDate,
    pub range: RangeToken,
}

/// 비교 응답의 한쪽 자산.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSide {
    pub id: String,
    pub name: String,
    pub timeseries: Vec<IndexPoint>,
}

/// 두 자산 비교 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub asset_a: ComparisonSide,
    pub asset_b: ComparisonSide,
    pub common_dates: Vec<String>,
    pub sample_count: usize,
    pub correlation: f64,
    pub reference_date: NaiveDate,
    pub range: RangeToken,
    pub volatility_a: f64,
    pub volatility_b: f64,
}

/// 인사이트 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub insights: Vec<Insight>,
    pub range: RangeToken,
    pub reference_date: NaiveDate,
}

/// 한 요청 동안 로드한 자산 전체.
struct LoadedUniverse {
    series: Vec<(String, CorrLabResult<PriceSeries>)>,
    report: ReferenceDateReport,
}

impl LoadedUniverse {
    /// 자산의 로드 결과를 꺼냅니다. 실패했다면 그 오류를 반환합니다.
    fn take(&mut self, asset_id: &str) -> CorrLabResult<PriceSeries> {
        let slot = self
            .series
            .iter_mut()
            .find(|(id, _)| id == asset_id)
            .ok_or_else(|| CorrLabError::asset_not_found(asset_id))?;

        std::mem::replace(&mut slot.1, Err(CorrLabError::asset_not_found(asset_id)))
    }
}

/// 상관관계 분석 엔진.
pub struct CorrelationEngine {
    registry: AssetRegistry,
    store: Arc<dyn PriceStore>,
}

impl CorrelationEngine {
    pub fn new(registry: AssetRegistry, store: Arc<dyn PriceStore>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// 자산 목록 (레지스트리 순서).
    pub fn list_assets(&self) -> Vec<Asset> {
        self.registry.assets().to_vec()
    }

    /// 전체 자산을 로드해 기준일 보고서만 반환합니다.
    pub fn reference_date_report(&self) -> ReferenceDateReport {
        self.load_universe().report
    }

    /// 전체 자산의 상관행렬.
    ///
    /// 로드에 실패한 자산이 하나라도 있으면 `NotFound`.
    pub fn correlation_matrix(&self, range: &RangeToken) -> CorrLabResult<CorrelationMatrixReport> {
        let universe = self.load_universe();
        let reference_date = universe.report.reference_date;
        let matrix = self.compute_matrix(universe, range)?;

        info!(
            range = %range,
            %reference_date,
            assets = matrix.size(),
            "Correlation matrix computed"
        );

        Ok(CorrelationMatrixReport {
            assets: matrix.assets,
            asset_names: self.registry.names(),
            matrix: matrix.cells,
            reference_date,
            range: range.clone(),
        })
    }

    /// 두 자산 비교.
    ///
    /// 모르는 자산 ID이거나 해당 자산 데이터를 읽지 못하면 `NotFound`.
    /// 공통 거래일이 2일 미만이면 빈 결과입니다 (오류 아님).
    pub fn comparison(
        &self,
        asset_a: &str,
        asset_b: &str,
        range: &RangeToken,
    ) -> CorrLabResult<ComparisonReport> {
        let meta_a = self
            .registry
            .get(asset_a)
            .cloned()
            .ok_or_else(|| CorrLabError::asset_not_found(asset_a))?;
        let meta_b = self
            .registry
            .get(asset_b)
            .cloned()
            .ok_or_else(|| CorrLabError::asset_not_found(asset_b))?;

        let mut universe = self.load_universe();
        let reference_date = universe.report.reference_date;

        let series_a = universe.take(asset_a)?;
        let returns_a = filter_by_range(&to_log_returns(&series_a), range, reference_date);
        let series_b = if asset_a == asset_b {
            series_a
        } else {
            universe.take(asset_b)?
        };
        let returns_b = filter_by_range(&to_log_returns(&series_b), range, reference_date);

        let pair = compare_returns(&returns_a, &returns_b);

        info!(
            asset_a,
            asset_b,
            range = %range,
            %reference_date,
            sample_count = pair.sample_count,
            "Comparison computed"
        );

        Ok(ComparisonReport {
            asset_a: ComparisonSide {
                id: meta_a.id,
                name: meta_a.name,
                timeseries: pair.timeseries_a,
            },
            asset_b: ComparisonSide {
                id: meta_b.id,
                name: meta_b.name,
                timeseries: pair.timeseries_b,
            },
            common_dates: pair.common_dates,
            sample_count: pair.sample_count,
            correlation: pair.correlation,
            reference_date,
            range: range.clone(),
            volatility_a: pair.volatility_a,
            volatility_b: pair.volatility_b,
        })
    }

    /// 상관행렬 기반 인사이트.
    pub fn insights(&self, range: &RangeToken) -> CorrLabResult<InsightsReport> {
        let universe = self.load_universe();
        let reference_date = universe.report.reference_date;
        let matrix = self.compute_matrix(universe, range)?;
        let insights = generate_insights(&matrix);

        info!(range = %range, count = insights.len(), "Insights generated");

        Ok(InsightsReport {
            insights,
            range: range.clone(),
            reference_date,
        })
    }

    fn compute_matrix(
        &self,
        universe: LoadedUniverse,
        range: &RangeToken,
    ) -> CorrLabResult<CorrelationMatrix> {
        let reference_date = universe.report.reference_date;
        let mut returns: HashMap<String, ReturnSeries> = HashMap::new();

        for (asset_id, loaded) in universe.series {
            let series = loaded?;
            let filtered = filter_by_range(&to_log_returns(&series), range, reference_date);
            debug!(asset_id = %asset_id, returns = filtered.len(), "Returns filtered");
            returns.insert(asset_id, filtered);
        }

        Ok(CorrelationMatrix::compute(&self.registry.ids(), &returns))
    }

    fn load_universe(&self) -> LoadedUniverse {
        let mut series = Vec::with_capacity(self.registry.len());
        let mut outcomes = Vec::with_capacity(self.registry.len());

        for asset in self.registry.assets() {
            let loaded = self.store.load(&asset.id);
            let outcome = match &loaded {
                Ok(s) => match s.last_date() {
                    Some(last_date) => LoadOutcome::Loaded { last_date },
                    None => LoadOutcome::Empty,
                },
                Err(e) => {
                    warn!(asset_id = %asset.id, error = %e, "Asset unavailable");
                    LoadOutcome::Unavailable {
                        reason: e.to_string(),
                    }
                }
            };

            outcomes.push(AssetLoadOutcome {
                asset_id: asset.id.clone(),
                outcome,
            });
            series.push((asset.id.clone(), loaded));
        }

        let report = ReferenceDateReport::from_outcomes(outcomes);
        if !report.has_loaded() {
            warn!(
                reference_date = %report.reference_date,
                "No asset data loaded, using today as reference date"
            );
        }
        debug!(reference_date = %report.reference_date, "Reference date resolved");

        LoadedUniverse { series, report }
    }
}
