/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * Request types carry their own validation so handlers reject bad input with 400
 * before touching the member store.
 */

use serde::{Deserialize, Serialize};

use crate::shared::{MemberSummary, SharedError};

/// Minimum username length, counted after trimming
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 4;

/// Register request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// Desired username; surrounding whitespace is trimmed
    pub username: String,
    /// Password (stored according to the configured password scheme)
    pub password: String,
}

impl RegisterRequest {
    /// Check the input rules and return the request with a trimmed username
    pub fn validated(self) -> Result<Self, SharedError> {
        let username = validate_credentials(&self.username, &self.password)?;
        Ok(Self {
            username,
            password: self.password,
        })
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Check the input rules and return the request with a trimmed username
    pub fn validated(self) -> Result<Self, SharedError> {
        let username = validate_credentials(&self.username, &self.password)?;
        Ok(Self {
            username,
            password: self.password,
        })
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<String, SharedError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(SharedError::validation("username", "is required"));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(SharedError::validation(
            "username",
            format!("must be at least {} characters", MIN_USERNAME_LEN),
        ));
    }
    if password.is_empty() {
        return Err(SharedError::validation("password", "is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(username.to_string())
}

/// Auth response
///
/// Returned by login. `token` is only present in token mode; in session
/// mode the proof travels in the `Set-Cookie` header instead.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub member: MemberSummary,
}

/// Registration response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberResponse {
    pub member: MemberSummary,
}

/// Logout response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogoutResponse {
    pub logged_out: bool,
}
