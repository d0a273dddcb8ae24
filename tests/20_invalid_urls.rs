mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn misspelled_urls_are_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/layer_referencce",
        "/api/layer_referenc/",
        "/api/layer_referen",
        "/api/auth/whoam",
        "/auth/loginn/fake/",
        "/auth/log",
    ] {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["error"], "Invalid URL.", "{path}");
    }
    Ok(())
}
