//! 상관행렬 인사이트.
//!
//! 상삼각(i < j) 자산 쌍을 훑어 최대 3개의 요약을 만듭니다.
//! 순서는 고정입니다: 최고 양의 상관 → 최강 음의 상관 → 0에 가까운 상관.
//! 동률이면 레지스트리 순서상 먼저 나온 쌍이 선택됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::correlation::{CorrelationCell, CorrelationMatrix};

/// 최대 인사이트 수.
pub const MAX_INSIGHTS: usize = 3;

/// 인사이트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// 가장 높은 양의 상관
    HighestPositive,
    /// 가장 강한 음의 상관
    StrongestNegative,
    /// 상관이 0에 가장 가까운 조합
    NearZero,
}

impl InsightKind {
    /// 화면 제목.
    pub fn title(&self) -> &'static str {
        match self {
            InsightKind::HighestPositive => "가장 높은 양(+)의 상관",
            InsightKind::StrongestNegative => "가장 강한 음(-)의 상관",
            InsightKind::NearZero => "상관이 0에 가까운 조합",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::HighestPositive => "highest_positive",
            InsightKind::StrongestNegative => "strongest_negative",
            InsightKind::NearZero => "near_zero",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 인사이트 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    /// 예: `SPY–QQQ (0.912, n=251)`
    pub text: String,
    pub correlation: f64,
    pub sample_count: usize,
}

impl Insight {
    fn from_cell(kind: InsightKind, cell: &CorrelationCell) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            text: format!(
                "{}–{} ({:.3}, n={})",
                cell.asset_a, cell.asset_b, cell.correlation, cell.sample_count
            ),
            correlation: cell.correlation,
            sample_count: cell.sample_count,
        }
    }
}

/// 상관행렬에서 인사이트를 생성합니다.
///
/// 자산이 2개 미만이면 쌍이 없으므로 빈 목록을 반환합니다.
pub fn generate_insights(matrix: &CorrelationMatrix) -> Vec<Insight> {
    let pairs: Vec<&CorrelationCell> = matrix
        .cells
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().skip(i + 1))
        .collect();

    let Some(first) = pairs.first().copied() else {
        return Vec::new();
    };

    let mut max_pos = first;
    let mut min_neg = first;
    let mut near_zero = first;

    for cell in pairs.iter().skip(1).copied() {
        if cell.correlation > max_pos.correlation {
            max_pos = cell;
        }
        if cell.correlation < min_neg.correlation {
            min_neg = cell;
        }
        if cell.correlation.abs() < near_zero.correlation.abs() {
            near_zero = cell;
        }
    }

    let mut insights = Vec::with_capacity(MAX_INSIGHTS);
    if max_pos.correlation > 0.0 {
        insights.push(Insight::from_cell(InsightKind::HighestPositive, max_pos));
    }
    if min_neg.correlation < 0.0 {
        insights.push(Insight::from_cell(InsightKind::StrongestNegative, min_neg));
    }
    insights.push(Insight::from_cell(InsightKind::NearZero, near_zero));

    insights.truncate(MAX_INSIGHTS);
    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 상관계수 목록(상삼각, 행 우선)으로 행렬 구성.
    fn matrix(ids: &[&str], upper: &[f64]) -> CorrelationMatrix {
        let n = ids.len();
        let mut values = vec![vec![1.0; n]; n];
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                values[i][j] = upper[k];
                values[j][i] = upper[k];
                k += 1;
            }
        }

        let cells = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| CorrelationCell {
                        asset_a: ids[i].to_string(),
                        asset_b: ids[j].to_string(),
                        correlation: values[i][j],
                        sample_count: 250,
                    })
                    .collect()
            })
            .collect();

        CorrelationMatrix {
            assets: ids.iter().map(|s| s.to_string()).collect(),
            cells,
        }
    }

    #[test]
    fn test_all_three_insights() {
        // (SPY,QQQ)=0.9, (SPY,GLD)=0.05, (QQQ,GLD)=-0.3
        let m = matrix(&["SPY", "QQQ", "GLD"], &[0.9, 0.05, -0.3]);
        let insights = generate_insights(&m);

        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].kind, InsightKind::HighestPositive);
        assert_eq!(insights[0].text, "SPY–QQQ (0.900, n=250)");
        assert_eq!(insights[0].title, "가장 높은 양(+)의 상관");

        assert_eq!(insights[1].kind, InsightKind::StrongestNegative);
        assert_eq!(insights[1].text, "QQQ–GLD (-0.300, n=250)");

        assert_eq!(insights[2].kind, InsightKind::NearZero);
        assert_eq!(insights[2].text, "SPY–GLD (0.050, n=250)");
    }

    #[test]
    fn test_no_negative_pairs() {
        let m = matrix(&["A", "B", "C"], &[0.8, 0.4, 0.2]);
        let insights = generate_insights(&m);

        let kinds: Vec<_> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![InsightKind::HighestPositive, InsightKind::NearZero]);
        assert_eq!(insights[1].correlation, 0.2);
    }

    #[test]
    fn test_all_zero_only_near_zero() {
        let m = matrix(&["A", "B", "C"], &[0.0, 0.0, 0.0]);
        let insights = generate_insights(&m);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::NearZero);
        // 동률이면 첫 쌍
        assert_eq!(insights[0].text, "A–B (0.000, n=250)");
    }

    #[test]
    fn test_ties_pick_first_pair() {
        let m = matrix(&["A", "B", "C", "D"], &[0.5, 0.7, 0.7, -0.2, 0.7, -0.2]);
        let insights = generate_insights(&m);

        assert_eq!(insights[0].text, "A–C (0.700, n=250)");
        assert_eq!(insights[1].text, "B–C (-0.200, n=250)");
        assert_eq!(insights[2].text, "B–C (-0.200, n=250)");
    }

    #[test]
    fn test_fewer_than_two_assets() {
        assert!(generate_insights(&matrix(&["A"], &[])).is_empty());
        assert!(generate_insights(&matrix(&[], &[])).is_empty());
    }

    #[test]
    fn test_invariants() {
        let m = matrix(
            &["A", "B", "C", "D", "E"],
            &[0.3, -0.6, 0.1, 0.9, -0.05, 0.44, -0.12, 0.0, 0.77, -0.91],
        );
        let insights = generate_insights(&m);

        assert!(insights.len() <= MAX_INSIGHTS);
        for insight in &insights {
            match insight.kind {
                InsightKind::HighestPositive => assert!(insight.correlation > 0.0),
                InsightKind::StrongestNegative => assert!(insight.correlation < 0.0),
                InsightKind::NearZero => assert_eq!(insight.correlation, 0.0),
            }
        }
    }

    #[test]
    fn test_serialized_shape() {
        let m = matrix(&["SPY", "QQQ"], &[0.5]);
        let json = serde_json::to_value(&generate_insights(&m)[0]).unwrap();

        assert_eq!(json["type"], "highest_positive");
        assert_eq!(json["sample_count"], 250);
        assert!(json.get("kind").is_none());
    }
}
