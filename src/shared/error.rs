//! Shared Error Types
//!
//! This module defines error types that do not depend on the server stack.
//! They describe malformed input and are wrapped by
//! `backend::error::AuthError` when they reach an HTTP handler.
//!
//! # Usage
//!
//! ```rust
//! use membergate::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "must be at least 3 characters");
//! assert!(error.to_string().contains("username"));
//! ```
use thiserror::Error;

/// Error types that can occur outside the server stack
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
