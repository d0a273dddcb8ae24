// handlers/public/auth/fake_login.rs - GET /auth/login/fake/ (debug mode only)

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::middleware::auth::{ADMIN_CLAIM, USER_ID_CLAIM};
use crate::middleware::ApiResponse;
use crate::state::AppState;
use crate::util::{current_timestamp, random_token_default};

pub const FAKE_USER_ID: i64 = 1;
pub const FAKE_USERNAME: &str = "admin";

pub fn fake_claims() -> Claims {
    let mut claims = Claims::new();
    claims.insert(USER_ID_CLAIM.into(), Value::from(FAKE_USER_ID));
    claims.insert("username".into(), Value::from(FAKE_USERNAME));
    claims.insert(ADMIN_CLAIM.into(), Value::Bool(true));
    claims.insert(
        "login_date".into(),
        Value::from(current_timestamp(true).to_string()),
    );
    claims.insert("session".into(), Value::from(random_token_default()));
    claims.insert("jti".into(), Value::from(Uuid::new_v4().to_string()));
    claims
}

/// Log in as a fixed administrator without credentials. The token is
/// returned both in the body and in the Authorization response header.
pub async fn fake_login(State(state): State<AppState>) -> Result<Response, ApiError> {
    let claims = fake_claims();
    let token = state.tokens.issue(&claims)?;

    let header_value = HeaderValue::from_str(&token)
        .map_err(|e| ApiError::internal_server_error(format!("Unusable token: {}", e)))?;

    tracing::info!("Fake login issued for user {}", FAKE_USER_ID);

    let mut response = ApiResponse::success(json!({
        "token": token,
        "user": claims,
    }))
    .into_response();
    response
        .headers_mut()
        .insert(header::AUTHORIZATION, header_value);

    Ok(response)
}
