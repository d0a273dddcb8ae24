#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

pub const TEST_SECRET: &str = "integration-test-secret";

// One server per test binary. The child is never reaped: statics are not
// dropped at exit, so it is left to the OS once the test process ends.
static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Nothing listens on the database port; data routes fail fast with 500
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_geoedit-api-rust"));
        cmd.env("HOST", "127.0.0.1")
            .env("PORT", port.to_string())
            .env("APP_ENV", "development")
            .env("JWT_SECRET", TEST_SECRET)
            .env("JWT_ALGORITHM", "HS512")
            .env("DEBUG_MODE", "true")
            .env("DATABASE_URL", "postgres://nobody@127.0.0.1:1/geoedit")
            .env("DATABASE_CONNECTION_TIMEOUT", "1")
            .env_remove("JWT_EXPIRY_HOURS")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Without a database the health check answers 503
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Server started with debug routes enabled. Hidden debug routes are
/// covered in-process by the router tests.
pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(server)
}

/// Token from the fake login route of the debug server.
pub async fn fake_login(server: &TestServer) -> Result<String> {
    let body: Value = reqwest::get(server.url("/auth/login/fake/")).await?.json().await?;
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .context("fake login returned no token")
}

/// In-memory ZIP containing empty entries with the given names.
pub fn zip_with(names: &[&str]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    for name in names {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(b"").expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}
