mod common;

use anyhow::Result;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn binary_serves_health_and_signin() -> Result<()> {
    let server = TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["database"], "ok");

    let res = client
        .post(server.url("/api/v1/users/signup"))
        .json(&json!({ "nickname": "smoke", "email": "smoke@example.com", "password": "pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), 200);

    let res = client
        .post(server.url("/api/v1/users/signin"))
        .json(&json!({ "nickname": "smoke", "password": "pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;
    let token = body["data"]["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let res = client
        .get(server.url("/api/v1/users"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["user"]["nickname"], "smoke");
    Ok(())
}

#[tokio::test]
async fn binary_rejects_missing_token() -> Result<()> {
    let server = TestServer::start().await?;
    let res = reqwest::get(server.url("/api/v1/projects")).await?;
    assert_eq!(res.status(), 401);
    Ok(())
}
