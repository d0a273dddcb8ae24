use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Same message as the router fallback so a hidden route looks nonexistent.
pub const INVALID_URL: &str = "Invalid URL.";

pub fn require_debug_mode(debug_mode: bool) -> Result<(), ApiError> {
    if debug_mode {
        Ok(())
    } else {
        Err(ApiError::not_found(INVALID_URL))
    }
}

pub async fn debug_only_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_debug_mode(state.debug_mode())?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn gate_follows_flag() {
        assert!(require_debug_mode(true).is_ok());

        let err = require_debug_mode(false).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), INVALID_URL);
    }
}
