//! 설정 관리.
//!
//! 기본값 → `config/default.toml`(선택) → `CORRLAB__` 환경 변수 순으로 덮어씁니다.
//! 예: `CORRLAB__SERVER__PORT=9000`, `CORRLAB__DATA__DIR=/srv/prices`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CorrLabResult;
use crate::logging::{LogConfig, LogFormat};
use crate::types::{default_assets, Asset, AssetRegistry};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 가격 데이터 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 분석 대상 자산 (등록 순서 = 행렬 순서)
    #[serde(default = "default_assets")]
    pub assets: Vec<Asset>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            logging: LoggingConfig::default(),
            assets: default_assets(),
        }
    }
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 프론트엔드 정적 파일 디렉토리
    pub frontend_dir: PathBuf,
    /// 허용 CORS origin 목록 (비어 있으면 모두 허용)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            frontend_dir: PathBuf::from("frontend"),
            cors_origins: Vec::new(),
        }
    }
}

/// 가격 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 자산별 CSV 파일 디렉토리 (`{dir}/{ASSET_ID}.csv`)
    pub dir: PathBuf,
    /// 읽기 캐시 활성화 여부
    #[serde(default)]
    pub cache_enabled: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            cache_enabled: false,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 로그에 소스 파일/라인 포함
    #[serde(default)]
    pub with_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            with_file: false,
        }
    }
}

impl LoggingConfig {
    /// 로깅 초기화용 설정으로 변환합니다. 알 수 없는 형식은 pretty.
    pub fn to_log_config(&self) -> LogConfig {
        let format = self.format.parse().unwrap_or(LogFormat::Pretty);
        LogConfig::new(self.level.clone())
            .with_format(format)
            .with_file(self.with_file)
    }
}

impl AppConfig {
    /// 파일(없어도 됨)과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CorrLabResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.frontend_dir", "frontend")?
            .set_default("data.dir", "data")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("CORRLAB")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CorrLabResult<Self> {
        Self::load("config/default.toml")
    }

    /// 설정된 자산으로 레지스트리를 만듭니다.
    pub fn registry(&self) -> AssetRegistry {
        AssetRegistry::new(self.assets.clone())
    }

    /// `host:port` 문자열.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert!(!config.data.cache_enabled);
        assert_eq!(config.registry().len(), 6);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_default_matches_empty_file() {
        let built = AppConfig::default();
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        let ids = |c: &AppConfig| c.assets.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&built), ids(&parsed));
        assert_eq!(ids(&built)[0], "SPY");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.assets.len(), 6);
        assert_eq!(config.assets[0].id, "SPY");
    }

    #[test]
    fn test_logging_config_conversion() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
            with_file: true,
        };
        let log_config = logging.to_log_config();
        assert_eq!(log_config.level, "debug");
        assert_eq!(log_config.format, LogFormat::Json);
        assert!(log_config.with_file);

        let unknown = LoggingConfig {
            level: "info".to_string(),
            format: "fancy".to_string(),
            with_file: false,
        };
        assert_eq!(unknown.to_log_config().format, LogFormat::Pretty);
        assert!(!unknown.to_log_config().with_file);
    }
}
