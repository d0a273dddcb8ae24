use axum::Extension;
use serde_json::{json, Value};

use crate::database::DbSession;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/admin/database - server version through the request session
pub async fn database_info(Extension(session): Extension<DbSession>) -> ApiResult<Value> {
    let version = session
        .run(|conn| {
            Box::pin(async move {
                sqlx::query_scalar::<_, String>("SELECT version()")
                    .fetch_one(conn)
                    .await
            })
        })
        .await?;

    Ok(ApiResponse::success(json!({ "version": version })))
}
