//! 자산 상관관계 분석 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 자산 목록, 상관행렬, 두 자산 비교, 인사이트 엔드포인트와 정적 프론트엔드를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use corrlab_api::{create_app, AppState};
use corrlab_core::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드
    let config = AppConfig::load_default().context("설정을 로드할 수 없습니다")?;

    // tracing 초기화
    init_logging(config.logging.to_log_config())
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting Asset Correlation Lab API server...");

    let addr: SocketAddr = config.bind_address().parse().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. CORRLAB__SERVER__HOST, CORRLAB__SERVER__PORT 환경변수를 확인하세요."
        );
        anyhow::anyhow!("invalid bind address {}: {}", config.bind_address(), e)
    })?;

    if !config.data.dir.is_dir() {
        warn!(dir = %config.data.dir.display(), "Data directory not found");
    }

    let state = Arc::new(AppState::from_config(&config));
    info!(
        version = %state.version,
        assets = state.engine.registry().len(),
        has_cache = state.cache.is_some(),
        "Application state initialized"
    );

    // 라우터 생성
    let app = create_app(
        state,
        &config.server.frontend_dir,
        &config.server.cors_origins,
    );

    // 서버 시작
    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{} 에 바인딩할 수 없습니다", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
