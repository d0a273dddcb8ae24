// handlers/protected/import.rs - POST /api/import/shapefile

use axum::{body::Bytes, extract::Query, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::archive;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::util::is_valid_identifier;

#[derive(Debug, Deserialize)]
pub struct ImportParams {
    pub table_name: Option<String>,
}

/// Validate an uploaded shapefile ZIP ahead of import. The body is the raw
/// archive; `table_name` names the layer table it will feed.
pub async fn import_shapefile(
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ImportParams>,
    body: Bytes,
) -> ApiResult<Value> {
    let table_name = params
        .table_name
        .ok_or_else(|| ApiError::bad_request("It is necessary to pass the table_name argument."))?;

    if !is_valid_identifier(&table_name) {
        return Err(ApiError::bad_request(format!(
            "Invalid table name: '{}'. It must start with a letter or underscore and have no special characters.",
            table_name
        )));
    }

    let names = archive::list_entry_names(&body)?;
    let shapefile = archive::validate_bundle(&names)?.to_string();

    tracing::info!(
        "User {:?} uploaded shapefile '{}' for table '{}'",
        user.user_id(),
        shapefile,
        table_name
    );

    Ok(ApiResponse::success(json!({
        "table_name": table_name,
        "shapefile": shapefile,
        "files": names,
    })))
}
