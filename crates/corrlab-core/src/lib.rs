//! # Corrlab Core
//!
//! 자산 상관관계 분석 시스템의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 자산 및 자산 레지스트리
//! - 조회 기간 토큰 (1M, 3M, ..., MAX, YTD)
//! - 가격/수익률 시계열
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
