#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use taskboard_api::config::AppConfig;
use taskboard_api::database::MemoryStore;
use taskboard_api::routes::{app, AppState};

/// The full router over a fresh in-memory store, driven without a socket
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(AppConfig::development(), MemoryStore::new().repositories());
        Self { router: app(state) }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body from {}", uri))?
        };
        Ok((status, value))
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Sign up and sign in; returns (user id, bearer token)
    pub async fn login(&self, nickname: &str) -> Result<(i64, String)> {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/users/signup",
                None,
                Some(json!({
                    "nickname": nickname,
                    "email": format!("{}@example.com", nickname),
                    "password": "secret"
                })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "signup failed: {}", body);
        let uid = body["data"]["uid"].as_i64().context("uid missing")?;

        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/users/signin",
                None,
                Some(json!({ "nickname": nickname, "password": "secret" })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "signin failed: {}", body);
        let token = body["data"]["token"].as_str().context("token missing")?.to_string();

        Ok((uid, token))
    }

    /// POST that must succeed; returns `data[key]` as an id
    pub async fn create(&self, uri: &str, token: &str, body: Value, key: &str) -> Result<i64> {
        let (status, response) = self.post(uri, token, body).await?;
        anyhow::ensure!(status == StatusCode::OK, "POST {} failed: {}", uri, response);
        response["data"][key]
            .as_i64()
            .with_context(|| format!("{} missing in {}", key, response))
    }
}

/// The compiled binary running `serve --in-memory` on a free port;
/// killed when dropped
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let server = Self::spawn()?;
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_taskboard"))
            .args(["serve", "--in-memory", "--host", "127.0.0.1", "--port", &port.to_string()])
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
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

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
