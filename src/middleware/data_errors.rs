use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::database::DbSession;
use crate::error::DataFailure;
use crate::state::AppState;

/// Error-translation middleware.
///
/// Gives the inner handlers a request-scoped [`DbSession`]; when the
/// response is a data-layer failure the session is rolled back before the
/// 500 goes out, leaving the connection reusable.
pub async fn data_error_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = DbSession::new(state.pool.clone());
    request.extensions_mut().insert(session.clone());

    let response = next.run(request).await;
    translate_data_failure(&session, response).await
}

pub async fn translate_data_failure(session: &DbSession, response: Response) -> Response {
    if response.extensions().get::<DataFailure>().is_none() {
        return response;
    }

    match session.rollback().await {
        Ok(true) => tracing::info!("Rolled back request connection after data layer failure"),
        Ok(false) => tracing::debug!("Data layer failure before a connection was acquired"),
        Err(e) => tracing::error!("Rollback after data layer failure failed: {}", e),
    }

    response
}
