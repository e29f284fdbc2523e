//! 자산 목록 endpoint.
//!
//! - `GET /api/assets` - 등록된 자산 목록 (레지스트리 순서)

use axum::{extract::State, routing::get, Json, Router};
use corrlab_core::Asset;
use std::sync::Arc;

use crate::state::AppState;

/// 자산 목록 조회.
///
/// GET /api/assets
pub async fn list_assets(State(state): State<Arc<AppState>>) -> Json<Vec<Asset>> {
    Json(state.engine.list_assets())
}

pub fn assets_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_assets))
}
