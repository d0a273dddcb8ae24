use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::io::{Cursor, Write};
use tower::ServiceExt;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::config::AppConfig;
use crate::state::AppState;

pub const TEST_SECRET: &str = "unit-test-secret";

/// Development config pointing at a database that refuses connections fast.
pub fn test_config(debug_mode: bool) -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.debug_mode = debug_mode;
    config.database.url = "postgres://nobody@127.0.0.1:1/geoedit".to_string();
    config.database.connection_timeout = 1;
    config
}

/// Needs a Tokio runtime (the lazy pool spawns its maintenance task).
pub fn test_state(debug_mode: bool) -> AppState {
    AppState::new(test_config(debug_mode)).unwrap()
}

pub fn token(state: &AppState, claims: Value) -> String {
    state.tokens.issue(claims.as_object().unwrap()).unwrap()
}

pub fn admin_token(state: &AppState) -> String {
    token(state, json!({"user_id": 1, "is_the_admin": true}))
}

pub fn user_token(state: &AppState) -> String {
    token(state, json!({"user_id": 2, "is_the_admin": false}))
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(body).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, Body::empty())
}

/// Drive one request through `router`; an empty body comes back as `Null`.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, body)
}

pub fn zip_with(names: &[&str]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);
    for name in names {
        writer.start_file(*name, options).unwrap();
        writer.write_all(b"content").unwrap();
    }
    writer.finish().unwrap().into_inner()
}
