//! Authentication API integration tests (token mode)
//!
//! Tests for register, login, me, logout and admin over HTTP.

use std::time::Duration;

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;

use crate::common::{credentials, TestApp, TestMember, ALICE};
use membergate::shared::AuthMode;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new(AuthMode::Token).await;

    let response = app.register(&ALICE).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["member"]["username"], "alice");
    assert_eq!(body["member"]["id"], "M0001");
    assert!(body["member"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate() {
    let app = TestApp::new(AuthMode::Token).await;
    app.register(&ALICE).await;

    let response = app.register(&ALICE).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["status"], 409);
    assert_eq!(app.gateway.store().len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new(AuthMode::Token).await;

    for (username, password) in [("ab", "secret123"), ("   ", "secret123"), ("alice", "abc"), ("alice", "")] {
        let response = app
            .post_json(
                "/api/auth/register",
                serde_json::json!({ "username": username, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", (username, password));
    }
    assert!(app.gateway.store().is_empty().await.unwrap());
}

#[tokio::test]
async fn test_login_and_me() {
    let app = TestApp::new(AuthMode::Token).await;
    app.register(&ALICE).await;

    let token = app.login(&ALICE).await;
    let response = app.get("/api/auth/me", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        serde_json::json!({ "identity": "alice", "member_id": "M0001" })
    );
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = TestApp::new(AuthMode::Token).await;
    app.register(&ALICE).await;

    let wrong_password = app
        .post_json(
            "/api/auth/login",
            credentials(&TestMember {
                username: "alice",
                password: "wrongpass",
            }),
            None,
        )
        .await;
    let unknown_user = app
        .post_json(
            "/api/auth/login",
            credentials(&TestMember {
                username: "mallory",
                password: "secret123",
            }),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_me_rejections_share_one_body() {
    let app = TestApp::new(AuthMode::Token).await;
    app.register(&ALICE).await;
    let token = app.login(&ALICE).await;

    let missing = app.get("/api/auth/me", None).await;
    let garbage = app.get("/api/auth/me", Some("not-a-token")).await;

    app.clock.advance(Duration::from_secs(3600));
    let expired = app.get("/api/auth/me", Some(&token)).await;

    for response in [&missing, &garbage, &expired] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.json()["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new(AuthMode::Token).await;
    app.register(&ALICE).await;
    let token = app.login(&ALICE).await;

    let logout = app.post_json("/api/auth/logout", serde_json::json!({}), Some(&token)).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.json()["logged_out"], true);

    let me = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_proof() {
    let app = TestApp::new(AuthMode::Token).await;

    let response = app.post_json("/api/auth/logout", serde_json::json!({}), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_route() {
    let app = TestApp::new(AuthMode::Token).await;
    app.gateway
        .register_with_role("alex", "pass123", Some("admin".to_string()))
        .await
        .unwrap();
    app.gateway
        .register_with_role("yoyo", "pass456", Some("user".to_string()))
        .await
        .unwrap();

    let admin = app
        .login(&TestMember {
            username: "alex",
            password: "pass123",
        })
        .await;
    let user = app
        .login(&TestMember {
            username: "yoyo",
            password: "pass456",
        })
        .await;

    let allowed = app.get("/api/admin", Some(&admin)).await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.json()["role"], "admin");

    assert_eq!(app.get("/api/admin", Some(&user)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get("/api/admin", None).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_security_headers_on_api_responses() {
    let app = TestApp::new(AuthMode::Token).await;

    let response = app.register(&ALICE).await;

    assert_eq!(response.headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(response.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert!(response.headers.get(header::CONTENT_SECURITY_POLICY).is_some());
    assert!(response.headers.get("x-powered-by").is_none());
}
