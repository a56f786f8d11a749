//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers, health and fallback
//! └── api_routes.rs   - Authentication and admin endpoints
//! ```
//!
//! # Routes
//!
//! - `GET /health` - Liveness check
//! - `POST /api/auth/register` - Member registration
//! - `POST /api/auth/login` - Member login
//! - `POST /api/auth/logout` - Logout
//! - `GET /api/auth/me` - Current member claim
//! - `GET /api/admin` - Admin-only endpoint
//!
//! Every other path gets a JSON 404.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
