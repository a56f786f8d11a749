/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require an
 * authenticated member. It extracts the proof for the configured auth mode
 * (a bearer token from the `Authorization` header, or the session cookie),
 * authorizes it through the gateway and hands the resulting claim to
 * handlers via request extensions.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::handlers::cookie::read_cookie;
use crate::backend::error::{AuthError, AuthResult, RejectReason};
use crate::backend::server::state::AppState;
use crate::shared::{AuthMode, Claim};

/// Authenticated member data attached by [`auth_middleware`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedMember {
    pub claim: Claim,
    /// The proof the request was authorized with
    pub proof: String,
}

/// Pull the proof for `mode` out of the request headers
///
/// Token mode reads `Authorization: Bearer <token>`; session mode reads the
/// cookie called `cookie_name`. Anything else is `MissingProof`.
pub fn extract_proof(headers: &HeaderMap, mode: AuthMode, cookie_name: &str) -> Result<String, RejectReason> {
    let proof = match mode {
        AuthMode::Token => headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string),
        AuthMode::Session => read_cookie(headers, cookie_name),
    };

    proof.ok_or_else(|| {
        tracing::warn!("No {} proof on request", mode);
        RejectReason::MissingProof
    })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the proof for the configured auth mode
/// 2. Authorizes it through the gateway
/// 3. Attaches the claim to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the proof is missing or rejected
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AuthResult<Response> {
    let mode = app_state.config.auth_mode;
    let proof = extract_proof(request.headers(), mode, &app_state.config.cookie_name)?;

    let claim = app_state.gateway.authorize(&proof, mode).await?;

    request
        .extensions_mut()
        .insert(AuthenticatedMember { claim, proof });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated member
///
/// Only usable on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthMember(pub AuthenticatedMember);

impl<S> axum::extract::FromRequestParts<S> for AuthMember
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let member = parts
            .extensions
            .get::<AuthenticatedMember>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedMember not found in request extensions");
                AuthError::Unauthorized(RejectReason::MissingProof)
            })?;

        Ok(AuthMember(member))
    }
}
