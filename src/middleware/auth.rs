use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::auth::{Claims, TokenService};
use crate::error::ApiError;
use crate::state::AppState;

/// Boolean claim granting administrator access.
pub const ADMIN_CLAIM: &str = "is_the_admin";

pub const USER_ID_CLAIM: &str = "user_id";

const MISSING_HEADER: &str = "It is necessary an Authorization header valid.";

/// Authenticated caller, injected into request extensions by
/// [`token_auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    pub fn user_id(&self) -> Option<i64> {
        self.claims.get(USER_ID_CLAIM).and_then(Value::as_i64)
    }

    pub fn is_administrator(&self) -> bool {
        self.claims
            .get(ADMIN_CLAIM)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Token from the Authorization header. The raw value is the token; a
/// `Bearer ` prefix is tolerated.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized(MISSING_HEADER))?;

    let raw = value.to_str().map_err(|_| {
        ApiError::invalid_token("Invalid Token. (error: Authorization header is not valid text)")
    })?;

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        return Err(ApiError::invalid_token("Invalid Token. (error: empty token)"));
    }

    Ok(token)
}

/// 401 without a header, 400 for a token the caller got wrong, 500 when
/// verification itself fails.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthUser, ApiError> {
    let token = extract_token(headers)?;
    let claims = tokens.verify(token)?;

    Ok(AuthUser { claims })
}

/// Token-presence middleware
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authenticate(request.headers(), &state.tokens).map_err(|e| {
        tracing::warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            e.error_code()
        );
        e
    })?;

    tracing::debug!("Authenticated user {:?}", auth_user.user_id());
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
