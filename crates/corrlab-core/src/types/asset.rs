//! 자산 및 자산 레지스트리 정의.
//!
//! 레지스트리는 프로세스 수명 동안 변하지 않는 값으로, 엔진에 주입됩니다.
//! 등록 순서가 상관행렬의 행/열 순서이자 인사이트 동률 처리 순서입니다.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 분석 대상 자산.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    /// 짧은 자산 코드 (예: SPY, BTCUSD)
    pub id: String,
    /// 표시 이름 (예: "S&P 500 (SPY)")
    pub name: String,
}

impl Asset {
    /// 새 자산을 생성합니다.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// 기본 자산 유니버스 (주식, 원자재, 암호화폐, 채권, 달러 인덱스).
pub fn default_assets() -> Vec<Asset> {
    vec![
        Asset::new("SPY", "S&P 500 (SPY)"),
        Asset::new("QQQ", "Nasdaq 100 (QQQ)"),
        Asset::new("GLD", "Gold (GLD)"),
        Asset::new("BTCUSD", "Bitcoin (BTC-USD)"),
        Asset::new("TLT", "US 20Y+ Treasury (TLT)"),
        Asset::new("DXY", "US Dollar Index (DXY)"),
    ]
}

/// 불변 자산 레지스트리.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistry {
    assets: Vec<Asset>,
}

impl AssetRegistry {
    /// 자산 목록으로 레지스트리를 생성합니다.
    ///
    /// 동일한 ID가 여러 번 나오면 처음 등록된 자산만 유지합니다.
    pub fn new(assets: Vec<Asset>) -> Self {
        let mut unique: Vec<Asset> = Vec::with_capacity(assets.len());
        for asset in assets {
            if unique.iter().any(|a| a.id == asset.id) {
                tracing::warn!(asset_id = %asset.id, "Duplicate asset id ignored");
                continue;
            }
            unique.push(asset);
        }
        Self { assets: unique }
    }

    /// ID로 자산을 조회합니다.
    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// 등록된 자산인지 확인합니다.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 등록 순서대로 자산을 반환합니다.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// 등록 순서대로 자산 ID를 반환합니다.
    pub fn ids(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.id.clone()).collect()
    }

    /// 자산 ID → 표시 이름 맵 (등록 순서).
    pub fn names(&self) -> AssetNames {
        AssetNames(
            self.assets
                .iter()
                .map(|a| (a.id.clone(), a.name.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new(default_assets())
    }
}

/// 자산 ID → 표시 이름 맵.
///
/// JSON 객체로 직렬화되며 키 순서는 레지스트리 등록 순서를 따릅니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetNames(Vec<(String, String)>);

impl AssetNames {
    /// 자산 ID로 표시 이름 조회.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(asset_id, _)| asset_id == id)
            .map(|(_, name)| name.as_str())
    }

    /// 등록 순서대로 자산 ID 반환.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for AssetNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, name)| (id, name)))
    }
}

impl<'de> Deserialize<'de> for AssetNames {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NamesVisitor;

        impl<'de> Visitor<'de> for NamesVisitor {
            type Value = AssetNames;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of asset id to display name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AssetNames, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, name)) = map.next_entry::<String, String>()? {
                    entries.push((id, name));
                }
                Ok(AssetNames(entries))
            }
        }

        deserializer.deserialize_map(NamesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = AssetRegistry::default();
        assert_eq!(
            registry.ids(),
            vec!["SPY", "QQQ", "GLD", "BTCUSD", "TLT", "DXY"]
        );
        assert_eq!(registry.get("GLD").unwrap().name, "Gold (GLD)");
        assert!(registry.get("AAPL").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let registry = AssetRegistry::new(vec![
            Asset::new("A", "First"),
            Asset::new("B", "Bee"),
            Asset::new("A", "Second"),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("A").unwrap().name, "First");
    }

    #[test]
    fn test_names_map() {
        let registry = AssetRegistry::default();
        let names = registry.names();
        assert_eq!(names.len(), 6);
        assert_eq!(names.get("BTCUSD"), Some("Bitcoin (BTC-USD)"));
        assert_eq!(names.get("XYZ"), None);
    }

    #[test]
    fn test_names_serialize_in_registry_order() {
        let registry = AssetRegistry::new(vec![
            Asset::new("SPY", "S&P 500 (SPY)"),
            Asset::new("GLD", "Gold (GLD)"),
            Asset::new("BTCUSD", "Bitcoin (BTC-USD)"),
        ]);
        let json = serde_json::to_string(&registry.names()).unwrap();
        assert_eq!(
            json,
            r#"{"SPY":"S&P 500 (SPY)","GLD":"Gold (GLD)","BTCUSD":"Bitcoin (BTC-USD)"}"#
        );

        let back: AssetNames = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ids().collect::<Vec<_>>(), vec!["SPY", "GLD", "BTCUSD"]);
    }
}
