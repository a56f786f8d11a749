/**
 * Register Handler
 *
 * This module implements the member registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Trim the username and apply the length rules
 * 2. Append the member to the store (rejecting a taken username)
 * 3. Return the new member without its password
 *
 * Registration does not log the member in; the client calls
 * `/api/auth/login` afterwards.
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::handlers::types::{MemberResponse, RegisterRequest};
use crate::backend::error::AuthResult;
use crate::shared::MemberSummary;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - If the username or password breaks a validation rule
/// * `409 Conflict` - If the username is already registered
/// * `500 Internal Server Error` - If the member store cannot be read or written
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "password": "secret123" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "member": { "username": "alice", "id": "M0001" } }
/// ```
pub async fn register(
    State(gateway): State<Arc<AuthGateway>>,
    Json(request): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<MemberResponse>)> {
    let request = request.validated().map_err(|e| {
        tracing::warn!("Rejected registration input: {}", e);
        e
    })?;
    tracing::info!("Register request for username: {}", request.username);

    let member = gateway.register(&request.username, &request.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MemberResponse {
            member: MemberSummary::from(&member),
        }),
    ))
}
