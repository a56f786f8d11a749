//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - Member registration
//! - **`login`** - POST /api/auth/login - Credential check, proof issuance
//! - **`logout`** - POST /api/auth/logout - Revoke token or destroy session
//! - **`get_me`** - GET /api/auth/me - Claim of the current member
//! - **`admin`** - GET /api/admin - Admin-only claim echo
//!
//! Handlers return `AuthResult`, so every failure is rendered by
//! `AuthError`'s `IntoResponse` implementation.

/// Request and response types
pub mod types;

/// Session cookie helpers
pub mod cookie;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current member handler
pub mod me;

/// Admin handler
pub mod admin;

pub use types::{AuthResponse, LoginRequest, LogoutResponse, MemberResponse, RegisterRequest};

pub use admin::admin;
pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
