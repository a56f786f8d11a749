/**
 * Auth Gateway
 *
 * The gateway is the one entry point the HTTP layer talks to. It combines
 * the member store with one of two proof mechanisms, chosen per call by
 * [`AuthMode`]:
 *
 * | mode      | login issues             | authorize checks            | logout             |
 * |-----------|--------------------------|-----------------------------|--------------------|
 * | `Token`   | signed JWT               | revocation, signature, exp  | add to revocations |
 * | `Session` | session handle (cookie)  | session exists, not expired | destroy session    |
 *
 * Every rejected proof comes back as `AuthError::Unauthorized` with the
 * specific [`RejectReason`] attached and logged.
 */

use std::sync::Arc;

use crate::backend::auth::clock::{system_clock, SharedClock};
use crate::backend::auth::sessions::{SessionHandle, SessionManager, SessionTable};
use crate::backend::auth::tokens::{RevocationSet, TokenService};
use crate::backend::auth::users::CredentialStore;
use crate::backend::error::{AuthError, AuthResult, RejectReason};
use crate::shared::{AuthConfig, AuthMode, Claim, MemberRecord};

/// Proof of identity handed to the client at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proof {
    /// Bearer token
    Token(String),
    /// Session cookie value
    Session(SessionHandle),
}

impl Proof {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Token(token) => token,
            Self::Session(handle) => handle,
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Token(_) => AuthMode::Token,
            Self::Session(_) => AuthMode::Session,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Token(value) | Self::Session(value) => value,
        }
    }
}

/// Login, authorization and logout over both proof mechanisms
#[derive(Debug, Clone)]
pub struct AuthGateway {
    store: Arc<CredentialStore>,
    tokens: Arc<TokenService>,
    sessions: Arc<SessionManager>,
}

impl AuthGateway {
    pub fn new(
        store: Arc<CredentialStore>,
        tokens: Arc<TokenService>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            store,
            tokens,
            sessions,
        }
    }

    /// Build every component from configuration, using wall-clock time
    pub async fn from_config(config: &AuthConfig) -> AuthResult<Self> {
        Self::from_config_with_clock(config, system_clock()).await
    }

    /// Build every component from configuration with an explicit clock
    ///
    /// The revocation set and the session table are created here and live as
    /// long as the returned gateway and its clones.
    pub async fn from_config_with_clock(config: &AuthConfig, clock: SharedClock) -> AuthResult<Self> {
        let store = CredentialStore::open(
            &config.store_path,
            config.password_scheme,
            config.bcrypt_cost,
        )
        .await?;

        let tokens = TokenService::new(
            &config.jwt_secret,
            config.token_ttl,
            clock.clone(),
            Arc::new(RevocationSet::new()),
        )
        .with_pruning(config.prune_revoked);

        let sessions = SessionManager::new(
            Arc::new(SessionTable::new()),
            config.session_ttl,
            config.session_policy,
            clock,
        );

        Ok(Self::new(Arc::new(store), Arc::new(tokens), Arc::new(sessions)))
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub async fn register(&self, username: &str, password: &str) -> AuthResult<MemberRecord> {
        self.store.register(username, password).await
    }

    pub async fn register_with_role(
        &self,
        username: &str,
        password: &str,
        role: Option<String>,
    ) -> AuthResult<MemberRecord> {
        self.store.register_with_role(username, password, role).await
    }

    pub async fn exists(&self, username: &str) -> AuthResult<bool> {
        self.store.exists(username).await
    }

    /// Check credentials without issuing a proof
    ///
    /// An unknown user and a wrong password both give `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthResult<MemberRecord> {
        match self.store.verify(username, password).await? {
            Some(member) => Ok(member),
            None => {
                tracing::warn!("Invalid credentials for: {}", username);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Issue a token or create a session for `claim`
    pub async fn issue_proof(&self, claim: Claim, mode: AuthMode) -> AuthResult<Proof> {
        match mode {
            AuthMode::Token => {
                let token = self.tokens.issue(&claim, self.tokens.ttl())?;
                Ok(Proof::Token(token))
            }
            AuthMode::Session => {
                let handle = self.sessions.create(claim, self.sessions.ttl()).await;
                Ok(Proof::Session(handle))
            }
        }
    }

    /// Verify credentials and hand out a proof
    pub async fn login(&self, username: &str, password: &str, mode: AuthMode) -> AuthResult<Proof> {
        let (_, proof) = self.login_member(username, password, mode).await?;
        Ok(proof)
    }

    /// [`login`](Self::login), also returning the member the proof was issued to
    pub async fn login_member(
        &self,
        username: &str,
        password: &str,
        mode: AuthMode,
    ) -> AuthResult<(MemberRecord, Proof)> {
        let member = self.authenticate(username, password).await?;
        let proof = self.issue_proof(member.claim(), mode).await?;
        tracing::info!("Member logged in: {} ({}) via {}", member.username, member.id, mode);
        Ok((member, proof))
    }

    /// Validate a proof and return its claim
    pub async fn authorize(&self, proof: &str, mode: AuthMode) -> AuthResult<Claim> {
        let checked = match mode {
            AuthMode::Token => self.tokens.verify(proof).await,
            AuthMode::Session => self.sessions.read(proof).await,
        };

        checked.map_err(|reason| reject(mode, reason))
    }

    /// Validate a proof and require `role` on its claim
    pub async fn authorize_role(&self, proof: &str, mode: AuthMode, role: &str) -> AuthResult<Claim> {
        let claim = self.authorize(proof, mode).await?;
        if claim.has_role(role) {
            Ok(claim)
        } else {
            tracing::warn!("{} lacks role {}", claim.identity, role);
            Err(AuthError::forbidden(role))
        }
    }

    /// Revoke a token or destroy a session; always succeeds
    pub async fn logout(&self, proof: &str, mode: AuthMode) {
        match mode {
            AuthMode::Token => self.tokens.revoke(proof).await,
            AuthMode::Session => self.sessions.destroy(proof).await,
        }
        tracing::info!("Logged out {} proof", mode);
    }
}

fn reject(mode: AuthMode, reason: RejectReason) -> AuthError {
    tracing::warn!(reason = reason.code(), "Rejected {} proof", mode);
    AuthError::Unauthorized(reason)
}
