use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::error::ApiError;

/// Administrator-only check. Needs the identity set by the token middleware.
pub fn require_administrator(user: Option<&AuthUser>) -> Result<(), ApiError> {
    let user = user.ok_or_else(|| {
        ApiError::unauthorized("JWT authentication required before administrator check")
    })?;

    if !user.is_administrator() {
        tracing::warn!("User {:?} denied administrator resource", user.user_id());
        return Err(ApiError::forbidden(
            "The administrator is who can use this resource.",
        ));
    }

    Ok(())
}

pub async fn admin_only_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    require_administrator(request.extensions().get::<AuthUser>())?;
    Ok(next.run(request).await)
}
