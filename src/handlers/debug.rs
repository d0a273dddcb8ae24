// handlers/debug.rs - Diagnostics, only routed in debug mode

use axum::extract::State;

use crate::config::AppConfig;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/debug/config - configuration without secrets
pub async fn config_snapshot(State(state): State<AppState>) -> ApiResult<AppConfig> {
    Ok(ApiResponse::success(state.config.as_ref().clone()))
}
