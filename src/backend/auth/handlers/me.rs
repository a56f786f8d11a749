/**
 * Get Current Member Handler
 *
 * GET /api/auth/me returns the identity claim of the authenticated member.
 * The route sits behind the auth middleware, which has already validated the
 * proof by the time this handler runs.
 */

use axum::response::Json;

use crate::backend::middleware::auth::AuthMember;
use crate::shared::Claim;

/// Get current member handler
///
/// # Example Response
///
/// ```json
/// { "identity": "alice", "member_id": "M0001" }
/// ```
pub async fn get_me(AuthMember(member): AuthMember) -> Json<Claim> {
    tracing::debug!("Claim requested by {}", member.claim.identity);
    Json(member.claim)
}
