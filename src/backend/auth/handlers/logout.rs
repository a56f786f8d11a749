/**
 * Logout Handler
 *
 * POST /api/auth/logout. In token mode the bearer token is added to the
 * revocation set; in session mode the session is destroyed and the cookie
 * cleared. The proof is not validated first, so logging out with an already
 * expired or revoked proof still succeeds.
 */

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::handlers::cookie::clear_cookie;
use crate::backend::auth::handlers::types::LogoutResponse;
use crate::backend::error::AuthResult;
use crate::backend::middleware::auth::extract_proof;
use crate::shared::{AuthConfig, AuthMode};

/// Logout handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the request carries no proof at all
pub async fn logout(
    State(gateway): State<Arc<AuthGateway>>,
    State(config): State<Arc<AuthConfig>>,
    headers: HeaderMap,
) -> AuthResult<Response> {
    let mode = config.auth_mode;
    let proof = extract_proof(&headers, mode, &config.cookie_name)?;

    gateway.logout(&proof, mode).await;

    let body = Json(LogoutResponse { logged_out: true });
    let response = match mode {
        AuthMode::Token => body.into_response(),
        AuthMode::Session => ([(SET_COOKIE, clear_cookie(&config.cookie_name)?)], body).into_response(),
    };

    Ok(response)
}
