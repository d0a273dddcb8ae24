use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::database;
use crate::error::ApiError;
use crate::middleware::debug::INVALID_URL;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "GeoEdit API (Rust)",
            "version": version,
            "endpoints": {
                "health": "/health (public)",
                "login": "/auth/login/fake/ (debug mode only)",
                "logout": "/auth/logout (token)",
                "whoami": "/api/auth/whoami (token)",
                "import": "/api/import/shapefile?table_name= (token)",
                "database": "/api/admin/database (administrator)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

/// Router fallback.
pub async fn not_found() -> ApiError {
    ApiError::not_found(INVALID_URL)
}
