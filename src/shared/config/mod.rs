//! Application configuration module
//!
//! Provides [`AuthConfig`], the process-wide settings for the member store,
//! token signing, and session handling.
//!
//! # Configuration Sources
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file named by `MEMBERGATE_CONFIG`
//! 3. Environment variables (`JWT_SECRET`, `MEMBERGATE_*`, `SERVER_PORT`)
//!
//! ```toml
//! store_path = "members.json"
//! token_ttl_secs = 3600
//! session_ttl_secs = 1800
//! session_policy = "rolling"
//! auth_mode = "session"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Secret used when `JWT_SECRET` is not set. Development only.
pub const DEV_JWT_SECRET: &str = "membergate-development-secret";

/// Matches `bcrypt::DEFAULT_COST`
pub const DEFAULT_BCRYPT_COST: u32 = 12;

const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);
const DEFAULT_COOKIE_NAME: &str = "sid";
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Which proof of identity a login produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Stateless signed bearer token
    #[default]
    Token,
    /// Server-held session referenced by a cookie
    Session,
}

/// Session expiry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalPolicy {
    /// Expiry is set once at creation
    Fixed,
    /// Every successful read pushes the expiry forward by the session ttl
    #[default]
    Rolling,
}

/// How stored credential secrets are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Stored verbatim, compared exactly
    #[default]
    Plain,
    /// Stored as a bcrypt hash
    Bcrypt,
}

macro_rules! impl_keyword_enum {
    ($ty:ty, $field:literal, { $($variant:path => $word:literal),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($word => Ok($variant),)+
                    other => Err(ConfigError::InvalidValue {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let word = match self {
                    $($variant => $word,)+
                };
                f.write_str(word)
            }
        }
    };
}

impl_keyword_enum!(AuthMode, "auth_mode", {
    AuthMode::Token => "token",
    AuthMode::Session => "session",
});

impl_keyword_enum!(RenewalPolicy, "session_policy", {
    RenewalPolicy::Fixed => "fixed",
    RenewalPolicy::Rolling => "rolling",
});

impl_keyword_enum!(PasswordScheme, "password_scheme", {
    PasswordScheme::Plain => "plain",
    PasswordScheme::Bcrypt => "bcrypt",
});

/// Process-wide authentication settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Path of the JSON member file
    pub store_path: PathBuf,
    /// HMAC secret for token signing
    pub jwt_secret: String,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Lifetime of a session (and of each renewal under the rolling policy)
    pub session_ttl: Duration,
    /// Session renewal policy
    pub session_policy: RenewalPolicy,
    /// Mechanism used by the HTTP layer
    pub auth_mode: AuthMode,
    /// How stored passwords are compared
    pub password_scheme: PasswordScheme,
    /// bcrypt work factor for new registrations
    pub bcrypt_cost: u32,
    /// Drop revoked tokens once their natural expiry has passed
    pub prune_revoked: bool,
    /// Name of the session cookie
    pub cookie_name: String,
    /// HTTP listen port
    pub server_port: u16,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("members.json"),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            session_ttl: DEFAULT_SESSION_TTL,
            session_policy: RenewalPolicy::default(),
            auth_mode: AuthMode::default(),
            password_scheme: PasswordScheme::default(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            prune_revoked: true,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

/// On-disk TOML shape; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    store_path: Option<PathBuf>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    session_ttl_secs: Option<u64>,
    session_policy: Option<RenewalPolicy>,
    auth_mode: Option<AuthMode>,
    password_scheme: Option<PasswordScheme>,
    bcrypt_cost: Option<u32>,
    prune_revoked: Option<bool>,
    cookie_name: Option<String>,
    server_port: Option<u16>,
}

impl AuthConfig {
    /// Create a new AuthConfigBuilder
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Load from the optional TOML file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("MEMBERGATE_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;

        if std::env::var("JWT_SECRET").is_err() && config.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set, using the development secret");
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(source)?;
        let mut config = Self::default();

        if let Some(v) = file.store_path {
            config.store_path = v;
        }
        if let Some(v) = file.jwt_secret {
            config.jwt_secret = v;
        }
        if let Some(v) = file.token_ttl_secs {
            config.token_ttl = Duration::from_secs(v);
        }
        if let Some(v) = file.session_ttl_secs {
            config.session_ttl = Duration::from_secs(v);
        }
        if let Some(v) = file.session_policy {
            config.session_policy = v;
        }
        if let Some(v) = file.auth_mode {
            config.auth_mode = v;
        }
        if let Some(v) = file.password_scheme {
            config.password_scheme = v;
        }
        if let Some(v) = file.bcrypt_cost {
            config.bcrypt_cost = v;
        }
        if let Some(v) = file.prune_revoked {
            config.prune_revoked = v;
        }
        if let Some(v) = file.cookie_name {
            config.cookie_name = v;
        }
        if let Some(v) = file.server_port {
            config.server_port = v;
        }

        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Override fields from environment-style key lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MEMBERGATE_STORE_PATH") {
            self.store_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("JWT_SECRET") {
            self.jwt_secret = v;
        }
        if let Some(v) = lookup("MEMBERGATE_TOKEN_TTL_SECS") {
            self.token_ttl = Duration::from_secs(parse_number("token_ttl_secs", &v)?);
        }
        if let Some(v) = lookup("MEMBERGATE_SESSION_TTL_SECS") {
            self.session_ttl = Duration::from_secs(parse_number("session_ttl_secs", &v)?);
        }
        if let Some(v) = lookup("MEMBERGATE_SESSION_POLICY") {
            self.session_policy = v.parse()?;
        }
        if let Some(v) = lookup("MEMBERGATE_AUTH_MODE") {
            self.auth_mode = v.parse()?;
        }
        if let Some(v) = lookup("MEMBERGATE_PASSWORD_SCHEME") {
            self.password_scheme = v.parse()?;
        }
        if let Some(v) = lookup("MEMBERGATE_BCRYPT_COST") {
            self.bcrypt_cost = parse_number("bcrypt_cost", &v)?;
        }
        if let Some(v) = lookup("MEMBERGATE_PRUNE_REVOKED") {
            self.prune_revoked = parse_flag("prune_revoked", &v)?;
        }
        if let Some(v) = lookup("MEMBERGATE_COOKIE_NAME") {
            self.cookie_name = v;
        }
        if let Some(v) = lookup("SERVER_PORT") {
            self.server_port = parse_number("server_port", &v)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.token_ttl.is_zero() {
            return Err(ConfigError::invalid("token_ttl_secs", "0"));
        }
        if self.session_ttl.is_zero() {
            return Err(ConfigError::invalid("session_ttl_secs", "0"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("bcrypt_cost", self.bcrypt_cost.to_string()));
        }
        let cookie_ok = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.');
        if !cookie_ok {
            return Err(ConfigError::invalid("cookie_name", self.cookie_name.clone()));
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, raw))
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(field, raw)),
    }
}

/// Builder for AuthConfig
#[derive(Debug, Default)]
pub struct AuthConfigBuilder {
    config: AuthConfig,
}

impl AuthConfigBuilder {
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.config.token_ttl = ttl;
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.config.session_ttl = ttl;
        self
    }

    pub fn session_policy(mut self, policy: RenewalPolicy) -> Self {
        self.config.session_policy = policy;
        self
    }

    pub fn auth_mode(mut self, mode: AuthMode) -> Self {
        self.config.auth_mode = mode;
        self
    }

    pub fn password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.config.password_scheme = scheme;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn prune_revoked(mut self, prune: bool) -> Self {
        self.config.prune_revoked = prune;
        self
    }

    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.config.cookie_name = name.into();
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AuthConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
