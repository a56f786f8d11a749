//! Authentication API integration tests (session mode)

use std::time::Duration;

use axum::http::StatusCode;

use crate::common::{credentials, TestApp, ALICE};
use crate::assert_contains;
use membergate::shared::{AuthMode, RenewalPolicy};

#[tokio::test]
async fn test_login_sets_cookie_without_token() {
    let app = TestApp::new(AuthMode::Session).await;
    app.register(&ALICE).await;

    let response = app.post_json("/api/auth/login", credentials(&ALICE), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json().get("token").is_none());
    let cookie = response.set_cookie().unwrap();
    assert_contains!(cookie, "HttpOnly");
    assert_contains!(cookie, "SameSite=Lax");
    assert_contains!(cookie, "Path=/");
    assert_contains!(cookie, "Max-Age=1800");
}

#[tokio::test]
async fn test_session_me_and_logout() {
    let app = TestApp::new(AuthMode::Session).await;
    app.register(&ALICE).await;
    let handle = app.login(&ALICE).await;

    let me = app.get("/api/auth/me", Some(&handle)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["identity"], "alice");

    let logout = app.post_json("/api/auth/logout", serde_json::json!({}), Some(&handle)).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_contains!(logout.set_cookie().unwrap(), "Max-Age=0");

    assert_eq!(app.get("/api/auth/me", Some(&handle)).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rolling_session_stays_alive_with_activity() {
    let app = TestApp::with_config(|b| {
        b.auth_mode(AuthMode::Session)
            .session_policy(RenewalPolicy::Rolling)
            .session_ttl(Duration::from_secs(60))
    })
    .await;
    app.register(&ALICE).await;
    let handle = app.login(&ALICE).await;

    for _ in 0..5 {
        app.clock.advance(Duration::from_secs(45));
        assert_eq!(app.get("/api/auth/me", Some(&handle)).await.status, StatusCode::OK);
    }

    app.clock.advance(Duration::from_secs(60));
    assert_eq!(app.get("/api/auth/me", Some(&handle)).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_fixed_session_expires_despite_activity() {
    let app = TestApp::with_config(|b| {
        b.auth_mode(AuthMode::Session)
            .session_policy(RenewalPolicy::Fixed)
            .session_ttl(Duration::from_secs(60))
    })
    .await;
    app.register(&ALICE).await;
    let handle = app.login(&ALICE).await;

    app.clock.advance(Duration::from_secs(45));
    assert_eq!(app.get("/api/auth/me", Some(&handle)).await.status, StatusCode::OK);

    app.clock.advance(Duration::from_secs(15));
    assert_eq!(app.get("/api/auth/me", Some(&handle)).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_custom_cookie_name() {
    let app = TestApp::with_config(|b| b.auth_mode(AuthMode::Session).cookie_name("member_sid")).await;
    app.register(&ALICE).await;

    let handle = app.login(&ALICE).await;

    assert_eq!(app.get("/api/auth/me", Some(&handle)).await.status, StatusCode::OK);
}
