/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/register` - Member registration
 * - `POST /api/auth/login` - Member login
 * - `POST /api/auth/logout` - Revoke token or destroy session
 * - `GET /api/admin` - Admin-only (role checked in the handler)
 *
 * ## Behind the auth middleware
 * - `GET /api/auth/me` - Claim of the current member
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{admin, get_me, login, logout, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// `app_state` is needed here because the auth middleware reads the gateway
/// and the configured auth mode from it.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/admin", get(admin))
        .merge(protected)
}
