//! Authentication Module
//!
//! This module verifies member credentials, issues proof of identity and
//! authorizes later requests with that proof.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - Member store backed by a flat JSON file
//! - **`tokens`** - Signed JWT issuance, verification and revocation
//! - **`sessions`** - Server-side session records with fixed or rolling expiry
//! - **`gateway`** - Login, authorize and logout over either mechanism
//! - **`clock`** - Injectable time source for expiry checks
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - CredentialStore
//! ├── tokens.rs       - TokenService and RevocationSet
//! ├── sessions.rs     - SessionManager and SessionTable
//! ├── gateway.rs      - AuthGateway and Proof
//! ├── clock.rs        - Clock trait, SystemClock, ManualClock
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── cookie.rs   - Session cookie helpers
//!     ├── register.rs - Member registration handler
//!     ├── login.rs    - Login handler
//!     ├── logout.rs   - Logout handler
//!     ├── me.rs       - Current member handler
//!     └── admin.rs    - Admin-only handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username and password → member appended to the store with the next ID
//! 2. **Login**: credentials verified → JWT returned, or session cookie set
//! 3. **Authorize**: proof verified → identity claim handed to the handler
//! 4. **Logout**: token revoked, or session destroyed and cookie cleared
//!
//! # Security
//!
//! - Wrong username and wrong password produce the same 401 response
//! - Token signatures are checked before expiry is looked at
//! - Revoked tokens are refused even while their signature and expiry are valid
//! - Passwords are stored in plain text or as bcrypt hashes, per configuration

/// Member store
pub mod users;

/// JWT tokens and revocation
pub mod tokens;

/// Server-side sessions
pub mod sessions;

/// Auth gateway
pub mod gateway;

/// Time source
pub mod clock;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use gateway::{AuthGateway, Proof};
pub use handlers::{admin, get_me, login, logout, register};
pub use sessions::{SessionHandle, SessionManager, SessionTable};
pub use tokens::{RevocationSet, TokenService};
pub use users::CredentialStore;
