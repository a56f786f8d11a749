/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * Outermost first:
 * 1. `TraceLayer` - request/response spans through `tracing`
 * 2. Security response headers
 * 3. Routes (API routes, `/health`, JSON 404 fallback)
 */

use axum::{http::StatusCode, response::Json, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::middleware::with_security_headers;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, &app_state);

    let router = router.fallback(not_found);

    let router = with_security_headers(router).layer(TraceLayer::new_for_http());

    router.with_state(app_state)
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "status": StatusCode::NOT_FOUND.as_u16(),
        })),
    )
}
