mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::body_json;
use common::TestApp;
use common::TOKEN_TTL_MINUTES;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn();

    let response = app
        .post_json(
            "/api/accounts",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "correct-horse"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"]["id"].is_string());
    // The hash must never leak into a response.
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;

    let response = app
        .post_json(
            "/api/accounts",
            json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "correct-horse"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn();

    let response = app
        .post_json(
            "/api/accounts",
            json!({
                "username": "alice",
                "email": "not-an-email",
                "password": "correct-horse"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn();

    let response = app
        .post_json(
            "/api/accounts",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": ""
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;

    let response = app
        .post_json(
            "/api/auth/login",
            json!({
                "username": "alice",
                "password": "correct-horse"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["token_type"], "bearer");
    let token = body["data"]["access_token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;

    let unknown = app
        .post_json(
            "/api/auth/login",
            json!({"username": "nobody", "password": "correct-horse"}),
        )
        .await;
    let wrong_password = app
        .post_json(
            "/api/auth/login",
            json!({"username": "alice", "password": "wrong-horse"}),
        )
        .await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // Identical body: no hint about which usernames exist.
    let unknown_body = body_json(unknown).await;
    let wrong_body = body_json(wrong_password).await;
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_protected_access_within_ttl() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;
    let token = app.login("alice", "correct-horse").await;

    let response = app.get("/api/accounts/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_protected_access_after_ttl_elapses() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;
    let token = app.login("alice", "correct-horse").await;

    // Same token, later clock.
    app.clock
        .advance(Duration::minutes(TOKEN_TTL_MINUTES) + Duration::seconds(1));

    let response = app.get("/api/accounts/me", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_access_without_token() {
    let app = TestApp::spawn();

    let response = app.get("/api/accounts/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_access_with_garbage_token() {
    let app = TestApp::spawn();

    let response = app.get("/api/accounts/me", Some("not.a.token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_access_with_malformed_header() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;
    let token = app.login("alice", "correct-horse").await;

    // Token is valid but the scheme is not Bearer.
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/accounts/me")
        .header(axum::http::header::AUTHORIZATION, format!("Basic {}", token))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_requires_current_password() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;
    let token = app.login("alice", "correct-horse").await;

    // Valid token, wrong current password: rejected.
    let response = app
        .patch_json(
            "/api/accounts/me",
            &token,
            json!({
                "current_password": "wrong-horse",
                "email": "new@example.com"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Email unchanged.
    let me = body_json(app.get("/api/accounts/me", Some(&token)).await).await;
    assert_eq!(me["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_update_email_with_correct_password() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;
    let token = app.login("alice", "correct-horse").await;

    let response = app
        .patch_json(
            "/api/accounts/me",
            &token,
            json!({
                "current_password": "correct-horse",
                "email": "new@example.com"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], "new@example.com");
    assert_eq!(body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_update_password_and_relogin() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;
    let token = app.login("alice", "correct-horse").await;

    let response = app
        .patch_json(
            "/api/accounts/me",
            &token,
            json!({
                "current_password": "correct-horse",
                "password": "battery-staple"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer works; new one does.
    let old = app
        .post_json(
            "/api/auth/login",
            json!({"username": "alice", "password": "correct-horse"}),
        )
        .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    app.login("alice", "battery-staple").await;
}

#[tokio::test]
async fn test_concurrent_logins_yield_independent_tokens() {
    let app = TestApp::spawn();
    app.register("alice", "alice@example.com", "correct-horse").await;

    let first = app.login("alice", "correct-horse").await;
    app.clock.advance(Duration::seconds(1));
    let second = app.login("alice", "correct-horse").await;

    // Both remain valid; neither invalidates the other.
    assert_ne!(first, second);
    assert_eq!(
        app.get("/api/accounts/me", Some(&first)).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        app.get("/api/accounts/me", Some(&second)).await.status(),
        StatusCode::OK
    );
}
