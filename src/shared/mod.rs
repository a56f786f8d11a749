//! Shared Module
//!
//! Types that do not depend on the server stack: the member and claim data
//! model, configuration, and validation errors. The backend builds on these,
//! and they are usable on their own without the `ssr` feature.

pub mod config;

pub mod error;

pub mod member;

pub use config::{AuthConfig, AuthConfigBuilder, AuthMode, ConfigError, PasswordScheme, RenewalPolicy};
pub use error::SharedError;
pub use member::{Claim, MemberId, MemberIdError, MemberRecord, MemberSummary};
