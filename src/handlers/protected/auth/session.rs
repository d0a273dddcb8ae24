use axum::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/whoami
pub async fn whoami(Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "user_id": user.user_id(),
        "is_the_admin": user.is_administrator(),
        "claims": user.claims,
    })))
}

/// GET /auth/logout
///
/// Tokens are not stored server-side, so there is nothing to revoke; the
/// client drops its copy.
pub async fn logout(Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    tracing::info!("User {:?} logged out", user.user_id());
    Ok(ApiResponse::success(json!({ "logged_out": true })))
}
