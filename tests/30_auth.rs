mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::Value;

#[tokio::test]
async fn whoami_requires_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/api/auth/whoami")).await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn tampered_token_is_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/auth/whoami"))
        .header(header::AUTHORIZATION, "not.a.token")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Invalid Token."));
    Ok(())
}

#[tokio::test]
async fn fake_login_token_opens_session_routes() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::fake_login(server).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/auth/whoami"))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["user_id"], 1);

    // Raw token without the Bearer prefix is accepted as well
    let res = client
        .get(server.url("/auth/logout"))
        .header(header::AUTHORIZATION, token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn fake_login_returns_token_header() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/auth/login/fake/")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let header_token = res
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = res.json::<Value>().await?;
    assert_eq!(header_token.as_deref(), body["data"]["token"].as_str());
    Ok(())
}

#[tokio::test]
async fn admin_route_translates_database_failure() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::fake_login(server).await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/admin/database"))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("Please, contact the administrator."));
    Ok(())
}
