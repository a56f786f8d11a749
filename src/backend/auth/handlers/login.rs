/**
 * Login Handler
 *
 * This module implements the member authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Validate the input and trim the username
 * 2. Verify the credentials against the member store
 * 3. Issue a proof for the configured auth mode
 * 4. Return the member summary, with the token in the body (token mode) or
 *    the session handle in a `Set-Cookie` header (session mode)
 *
 * # Security
 *
 * - Unknown usernames and wrong passwords both return 401 with the same body
 * - The session cookie is `HttpOnly` and `SameSite=Lax`
 * - Passwords are never logged or returned in responses
 */

use std::sync::Arc;

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::gateway::{AuthGateway, Proof};
use crate::backend::auth::handlers::cookie::session_cookie;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::error::AuthResult;
use crate::shared::{AuthConfig, MemberSummary};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If the username or password breaks a validation rule
/// * `401 Unauthorized` - If the username is unknown or the password is wrong
/// * `500 Internal Server Error` - If the member store cannot be read or token signing fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "password": "secret123" }
/// ```
///
/// # Example Response (token mode)
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "member": { "username": "alice", "id": "M0001" }
/// }
/// ```
pub async fn login(
    State(gateway): State<Arc<AuthGateway>>,
    State(config): State<Arc<AuthConfig>>,
    Json(request): Json<LoginRequest>,
) -> AuthResult<Response> {
    let request = request.validated()?;
    tracing::info!("Login request for: {}", request.username);

    let (member, proof) = gateway
        .login_member(&request.username, &request.password, config.auth_mode)
        .await?;

    let summary = MemberSummary::from(&member);
    let response = match proof {
        Proof::Token(token) => Json(AuthResponse {
            token: Some(token),
            member: summary,
        })
        .into_response(),
        Proof::Session(handle) => {
            let cookie = session_cookie(&config.cookie_name, &handle, gateway.sessions().ttl())?;
            (
                [(SET_COOKIE, cookie)],
                Json(AuthResponse {
                    token: None,
                    member: summary,
                }),
            )
                .into_response()
        }
    };

    Ok(response)
}
