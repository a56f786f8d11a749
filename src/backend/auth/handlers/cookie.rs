/**
 * Session Cookie Helpers
 *
 * Builds the `Set-Cookie` values used in session mode and reads the session
 * handle back out of a request's `Cookie` headers.
 */

use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue};

use crate::backend::error::AuthResult;

/// `Set-Cookie` value carrying a session handle
pub fn session_cookie(name: &str, handle: &str, max_age: Duration) -> AuthResult<HeaderValue> {
    header_value(format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name,
        handle,
        max_age.as_secs()
    ))
}

/// `Set-Cookie` value that makes the client drop the session cookie
pub fn clear_cookie(name: &str) -> AuthResult<HeaderValue> {
    header_value(format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", name))
}

/// Value of cookie `name`, searching every `Cookie` header
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn header_value(raw: String) -> AuthResult<HeaderValue> {
    Ok(HeaderValue::from_str(&raw)?)
}
