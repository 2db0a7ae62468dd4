mod support;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use models::user::Role;
use support::test_app;

#[tokio::test]
async fn register_login_me_flow() -> anyhow::Result<()> {
    let t = test_app();

    let (status, body) = t
        .send("POST", "/api/auth/register", None, Some(json!({"email": "Ravi@Example.com", "password": "password123", "role": "driver"})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ravi@example.com");
    assert_eq!(body["role"], "driver");
    assert!(body["token"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(body.get("passwordHash").is_none());

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"email": "ravi@example.com", "password": "password123"}))?))?;
    let resp = t.app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    // Cookie alone authenticates.
    let pair = cookie.split(';').next().unwrap_or_default().to_string();
    let req = Request::builder().uri("/api/auth/me").header(header::COOKIE, pair).body(Body::empty())?;
    let resp = t.app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn register_defaults_to_customer_and_rejects_duplicates() {
    let t = test_app();
    let body = json!({"email": "c@example.com", "password": "password123"});
    let (status, created) = t.send("POST", "/api/auth/register", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "customer");

    let (status, err) = t.send("POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "User already exists");
}

#[tokio::test]
async fn bad_credentials_are_401() {
    let t = test_app();
    t.send("POST", "/api/auth/register", None, Some(json!({"email": "d@example.com", "password": "password123"})))
        .await;
    let (status, err) = t
        .send("POST", "/api/auth/login", None, Some(json!({"email": "d@example.com", "password": "wrong-password"})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err["message"], "Invalid email or password");
}

#[tokio::test]
async fn short_password_is_400() {
    let t = test_app();
    let (status, _) = t
        .send("POST", "/api/auth/register", None, Some(json!({"email": "e@example.com", "password": "short"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let t = test_app();
    let (status, err) = t.send("GET", "/api/trucks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err["message"], "Not authorized, no token");

    let (status, err) = t.get("/api/trucks", "garbage.token.value").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err["message"], "Not authorized, token failed");
}

#[tokio::test]
async fn me_returns_caller() {
    let t = test_app();
    let admin = t.caller(Role::Admin).await;
    let (status, me) = t.get("/api/auth/me", &admin.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], admin.user.id.to_string());
    assert_eq!(me["role"], "admin");
}

#[tokio::test]
async fn logout_clears_cookie() {
    let t = test_app();
    let resp = t
        .app
        .clone()
        .oneshot(Request::builder().method("POST").uri("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
}

#[tokio::test]
async fn public_routes_and_fallback() {
    let t = test_app();
    let (status, body) = t.send("GET", "/health", None, None).await;
    assert_eq!((status, body["status"].as_str()), (StatusCode::OK, Some("ok")));

    let (status, body) = t.send("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Welcome to LogiTrack API. Visit /api/auth, /api/trucks, /api/parcels, or /api/tolls.");

    let (status, body) = t.send("GET", "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found - /api/nope");
}
