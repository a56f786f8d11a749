//! Authentication test helpers
//!
//! Provides a self-contained app (temporary member file, manual clock) and
//! request helpers for testing authentication flows over HTTP.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use membergate::backend::auth::{AuthGateway, ManualClock};
use membergate::backend::server::create_app_with_gateway;
use membergate::shared::{AuthConfig, AuthConfigBuilder, AuthMode};

/// Test member credentials
pub struct TestMember {
    pub username: &'static str,
    pub password: &'static str,
}

pub const ALICE: TestMember = TestMember {
    username: "alice",
    password: "secret123",
};

/// App under test with handles on its gateway and clock
pub struct TestApp {
    pub dir: TempDir,
    pub clock: ManualClock,
    pub gateway: AuthGateway,
    pub config: AuthConfig,
    router: Router,
}

impl TestApp {
    pub async fn new(mode: AuthMode) -> Self {
        Self::with_config(|builder| builder.auth_mode(mode)).await
    }

    /// Build an app from the default configuration adjusted by `customize`
    ///
    /// The member file always lives in a fresh temporary directory.
    pub async fn with_config<F>(customize: F) -> Self
    where
        F: FnOnce(AuthConfigBuilder) -> AuthConfigBuilder,
    {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let builder = AuthConfig::builder()
            .store_path(dir.path().join("members.json"))
            .jwt_secret("integration-test-secret");
        let config = customize(builder).build().expect("Invalid test config");

        let clock = ManualClock::starting_now();
        let gateway = AuthGateway::from_config_with_clock(&config, Arc::new(clock.clone()))
            .await
            .expect("Failed to build gateway");
        let router = create_app_with_gateway(gateway.clone(), config.clone());

        Self {
            dir,
            clock,
            gateway,
            config,
            router,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.config.auth_mode
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value, proof: Option<&str>) -> TestResponse {
        let request = self
            .with_proof(Request::post(path), proof)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn get(&self, path: &str, proof: Option<&str>) -> TestResponse {
        let request = self
            .with_proof(Request::get(path), proof)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn register(&self, member: &TestMember) -> TestResponse {
        self.post_json("/api/auth/register", credentials(member), None).await
    }

    /// Log in and return the proof from the body (token) or the cookie (session)
    pub async fn login(&self, member: &TestMember) -> String {
        let response = self.post_json("/api/auth/login", credentials(member), None).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.text());

        match self.mode() {
            AuthMode::Token => response.json()["token"]
                .as_str()
                .expect("token in body")
                .to_string(),
            AuthMode::Session => response
                .cookie_value(&self.config.cookie_name)
                .expect("session cookie"),
        }
    }

    fn with_proof(
        &self,
        builder: axum::http::request::Builder,
        proof: Option<&str>,
    ) -> axum::http::request::Builder {
        match (proof, self.mode()) {
            (None, _) => builder,
            (Some(token), AuthMode::Token) => builder.header(header::AUTHORIZATION, auth_header(token)),
            (Some(handle), AuthMode::Session) => {
                builder.header(header::COOKIE, format!("{}={}", self.config.cookie_name, handle))
            }
        }
    }
}

/// Collected response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// Value of cookie `name` from `Set-Cookie`
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let cookie = self.set_cookie()?;
        let first = cookie.split(';').next()?;
        let (key, value) = first.split_once('=')?;
        (key == name).then(|| value.to_string())
    }
}

pub fn credentials(member: &TestMember) -> serde_json::Value {
    serde_json::json!({
        "username": member.username,
        "password": member.password,
    })
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
