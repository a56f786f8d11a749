/**
 * Admin Handler
 *
 * GET /api/admin is only open to members whose role is `admin`. A missing or
 * rejected proof is 401; a valid proof without the role is 403.
 */

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, response::Json};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::error::AuthResult;
use crate::backend::middleware::auth::extract_proof;
use crate::shared::{AuthConfig, Claim};

/// Role required by [`admin`]
pub const ADMIN_ROLE: &str = "admin";

pub async fn admin(
    State(gateway): State<Arc<AuthGateway>>,
    State(config): State<Arc<AuthConfig>>,
    headers: HeaderMap,
) -> AuthResult<Json<Claim>> {
    let proof = extract_proof(&headers, config.auth_mode, &config.cookie_name)?;
    let claim = gateway
        .authorize_role(&proof, config.auth_mode, ADMIN_ROLE)
        .await?;

    tracing::info!("Admin access by {}", claim.identity);
    Ok(Json(claim))
}
