//! Backend Module
//!
//! This module contains all server-side code: the authentication core and
//! the JSON-over-HTTP adapter in front of it.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`auth`** - Member store, tokens, sessions, the gateway and HTTP handlers
//! - **`server`** - Application state, configuration loading, app creation
//! - **`routes`** - Route configuration and router assembly
//! - **`middleware`** - Auth middleware and security headers
//! - **`error`** - `AuthError`, `RejectReason` and their HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── auth/           - Authentication core and handlers
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds an `Arc<AuthGateway>` and an `Arc<AuthConfig>`. The
//! revocation set and the session table are owned by the gateway's services
//! and guarded by `tokio::sync::RwLock`; the member file is guarded by a
//! `tokio::sync::Mutex` inside the credential store.
//!
//! # Error Handling
//!
//! Handlers return `AuthResult<T>`; `AuthError` converts itself into a JSON
//! error response with the matching status code.

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and member management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

#[cfg(feature = "ssr")]
pub use auth::{AuthGateway, Proof};
#[cfg(feature = "ssr")]
pub use error::{AuthError, AuthResult, RejectReason};
#[cfg(feature = "ssr")]
pub use server::create_app;
