//! membergate - member authentication and session authorization
//!
//! membergate verifies username/password pairs against a flat JSON member
//! file, issues proof of identity, and authorizes later requests with that
//! proof. Two interchangeable mechanisms are supported:
//!
//! - **Token mode** - a signed, expiring JWT held by the client, checked
//!   against an in-process revocation set on every request
//! - **Session mode** - a server-held session record referenced by an opaque
//!   cookie handle, with fixed or rolling expiry
//!
//! # Module Structure
//!
//! - **`shared`** - Member/claim types, configuration, validation errors
//! - **`backend`** - Credential store, token and session services, the auth
//!   gateway, and a JSON HTTP adapter (only compiled with `ssr`)
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend: axum server, bcrypt, JWT
//!
//! # Usage
//!
//! ```rust,no_run
//! use membergate::backend::auth::AuthGateway;
//! use membergate::shared::{AuthConfig, AuthMode};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig::load()?;
//! let gateway = AuthGateway::from_config(&config).await?;
//!
//! gateway.register("alice", "secret123").await?;
//! let proof = gateway.login("alice", "secret123", AuthMode::Token).await?;
//! let claim = gateway.authorize(proof.as_str(), AuthMode::Token).await?;
//! assert_eq!(claim.identity, "alice");
//! # Ok(())
//! # }
//! ```
pub mod shared;

#[cfg(feature = "ssr")]
pub mod backend;
