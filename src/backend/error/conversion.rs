/**
 * Error Conversion
 *
 * Converts `AuthError` into an HTTP response so handlers can return it
 * directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Unauthorized",
 *   "status": 401
 * }
 * ```
 *
 * The body only carries [`AuthError::message`]; rejection reasons and
 * internal details go to the log.
 */

use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
