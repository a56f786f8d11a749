//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Authorizes the request's proof and attaches the member claim
//! - **`security_headers`** - Hardening headers on every response
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use membergate::backend::middleware::{auth_middleware, with_security_headers};
//! use membergate::backend::server::state::AppState;
//!
//! # fn example(state: AppState) {
//! let protected: Router<AppState> = Router::new()
//!     .route("/api/auth/me", get(|| async { "me" }))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
//! let app: Router = with_security_headers(protected.with_state(state));
//! # }
//! ```

pub mod auth;

pub mod security_headers;

pub use auth::{auth_middleware, extract_proof, AuthMember, AuthenticatedMember};
pub use security_headers::with_security_headers;
