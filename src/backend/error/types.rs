/**
 * Auth Error Types
 *
 * This module defines the failure taxonomy of the authentication core.
 * Every operation of the credential store, token service, session manager
 * and gateway returns one of these as a plain value.
 *
 * # Error Categories
 *
 * ## Credential and store errors
 *
 * - `InvalidCredentials` - login rejected; never says which field was wrong
 * - `DuplicateIdentity` - registration with a username that already exists
 * - `StoreCorrupt` - the member file is not the expected structure
 * - `Io` - the member file could not be read or written
 *
 * ## Authorization errors
 *
 * - `Unauthorized` - a proof was rejected; the [`RejectReason`] is kept for
 *   logging but is never shown to the client
 * - `Forbidden` - the proof is valid but lacks the required role
 *
 * ## Internal errors
 *
 * - `TokenEncoding`, `PasswordHash`, `InvalidHeader` - 500 with a generic body
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{MemberIdError, SharedError};

/// Why a token or session was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    #[error("signature invalid")]
    SignatureInvalid,

    #[error("expired")]
    Expired,

    #[error("revoked")]
    Revoked,

    #[error("no such session")]
    NoSuchSession,

    #[error("no proof supplied")]
    MissingProof,
}

impl RejectReason {
    /// Stable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::SignatureInvalid => "signature_invalid",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::NoSuchSession => "no_such_session",
            Self::MissingProof => "missing_proof",
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("username '{username}' is already registered")]
    DuplicateIdentity { username: String },

    #[error("member store is corrupt: {reason}")]
    StoreCorrupt { reason: String },

    #[error("member store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] RejectReason),

    #[error("role '{required}' required")]
    Forbidden { required: String },

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("token encoding failed: {0}")]
    TokenEncoding(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("invalid response header: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),
}

impl From<MemberIdError> for AuthError {
    fn from(err: MemberIdError) -> Self {
        Self::store_corrupt(err.to_string())
    }
}

impl AuthError {
    pub fn store_corrupt(reason: impl Into<String>) -> Self {
        Self::StoreCorrupt {
            reason: reason.into(),
        }
    }

    pub fn duplicate(username: impl Into<String>) -> Self {
        Self::DuplicateIdentity {
            username: username.into(),
        }
    }

    pub fn forbidden(required: impl Into<String>) -> Self {
        Self::Forbidden {
            required: required.into(),
        }
    }

    /// The rejection reason behind an `Unauthorized` error
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Unauthorized(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::DuplicateIdentity { .. } => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::StoreCorrupt { .. }
            | Self::Io(_)
            | Self::TokenEncoding(_)
            | Self::PasswordHash(_)
            | Self::InvalidHeader(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid username or password".to_string(),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
            Self::Forbidden { .. } => "Forbidden".to_string(),
            Self::DuplicateIdentity { .. } => "Username already taken".to_string(),
            Self::Validation(SharedError::ValidationError { field, message }) => {
                format!("{}: {}", field, message)
            }
            Self::StoreCorrupt { .. }
            | Self::Io(_)
            | Self::TokenEncoding(_)
            | Self::PasswordHash(_)
            | Self::InvalidHeader(_) => "Internal server error".to_string(),
        }
    }
}
