mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn signup_then_signin_returns_token() -> Result<()> {
    let app = TestApp::new();
    let (uid, token) = app.login("alice").await?;
    assert!(uid > 0);
    assert!(!token.is_empty());

    let (status, body) = app.get("/api/v1/users", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "OK");
    assert_eq!(body["data"]["user"]["nickname"], "alice");
    assert!(body["data"]["user"].get("password").is_none());

    // Trailing slash is served too
    let (status, _) = app.get("/api/v1/users/", &token).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let app = TestApp::new();
    app.login("bob").await?;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/users/signin",
            None,
            Some(json!({ "nickname": "bob", "password": "nope" })),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
    assert_eq!(body["data"], json!({}));
    Ok(())
}

#[tokio::test]
async fn duplicate_nickname_conflicts() -> Result<()> {
    let app = TestApp::new();
    app.login("carol").await?;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/users/signup",
            None,
            Some(json!({ "nickname": "carol", "email": "other@example.com", "password": "x" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn invalid_signup_fields_are_bad_requests() -> Result<()> {
    let app = TestApp::new();

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/users/signup",
            None,
            Some(json!({ "nickname": "a b", "email": "ab@example.com", "password": "x" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/users/signup",
            None,
            Some(json!({ "nickname": "dave", "email": "not-an-email", "password": "x" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app
        .request(Method::POST, "/api/v1/users/signin", None, Some(json!({ "nickname": 7 })))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_bearer_token() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/v1/projects", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, _) = app.get("/api/v1/projects", "not-a-jwt").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn root_and_health_are_public() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "taskboard-api");

    let (status, body) = app.request(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}
