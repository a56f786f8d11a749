//! Backend Error Module
//!
//! Error types of the authentication core and their HTTP conversion.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - AuthError and RejectReason
//! └── conversion.rs - IntoResponse for AuthError
//! ```
//!
//! # HTTP Response Conversion
//!
//! `AuthError` implements `IntoResponse`, so handlers return
//! `Result<_, AuthError>` and the status code and JSON body follow from the
//! variant. All rejected proofs become the same 401 response.

pub mod types;

pub mod conversion;

pub use types::{AuthError, RejectReason};

/// Result alias used throughout the backend
pub type AuthResult<T> = Result<T, AuthError>;
