/**
 * Signed Tokens
 *
 * This module issues and verifies HS256 JWTs that carry a member claim, and
 * keeps the set of tokens revoked by logout.
 *
 * # Verification Order
 *
 * 1. Revocation set lookup (`Revoked`)
 * 2. Signature check (`SignatureInvalid`); nothing inside the token is read
 *    before this passes
 * 3. Expiry against the injected clock (`Expired` once `now >= exp`)
 *
 * The JWT library's own `exp` check is switched off so that step 3 uses the
 * same clock as the rest of the service.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::backend::auth::clock::SharedClock;
use crate::backend::error::{AuthResult, RejectReason};
use crate::shared::{Claim, MemberId};

/// JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Member username
    pub sub: String,
    /// Member ID
    pub mid: MemberId,
    /// Member role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration time (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    fn claim(self) -> Claim {
        Claim {
            identity: self.sub,
            member_id: self.mid,
            role: self.role,
        }
    }
}

/// Tokens invalidated before their natural expiry
///
/// Each entry remembers when its token would have expired anyway, if that
/// could be established from a correctly signed token. Entries past that
/// point can be pruned: the token fails as `Expired` without them.
#[derive(Debug, Default)]
pub struct RevocationSet {
    entries: RwLock<HashMap<String, Option<DateTime<Utc>>>>,
}

impl RevocationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token; a second insert of the same token keeps the first entry
    pub async fn insert(&self, token: &str, natural_expiry: Option<DateTime<Utc>>) {
        self.entries
            .write()
            .await
            .entry(token.to_string())
            .or_insert(natural_expiry);
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.entries.read().await.contains_key(token)
    }

    /// Drop entries whose token expired at or before `now`
    pub async fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expiry| expiry.map_or(true, |at| at > now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Issues, verifies and revokes signed tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: SharedClock,
    revoked: Arc<RevocationSet>,
    prune_revoked: bool,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .field("prune_revoked", &self.prune_revoked)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `ttl` - default lifetime of issued tokens
    /// * `clock` - time source for `iat`, `exp` and expiry checks
    /// * `revoked` - process-wide revocation set
    pub fn new(secret: &str, ttl: Duration, clock: SharedClock, revoked: Arc<RevocationSet>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            clock,
            revoked,
            prune_revoked: true,
        }
    }

    /// Whether `revoke` drops revocation entries of already-expired tokens
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune_revoked = prune;
        self
    }

    /// Default token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn revocations(&self) -> &Arc<RevocationSet> {
        &self.revoked
    }

    /// Create a signed token for `claim`, valid for `ttl`
    ///
    /// `exp` is `now + ttl` rounded up to the next whole second, so a token
    /// never expires before its full lifetime has passed. A `ttl` under one
    /// second counts as one second.
    pub fn issue(&self, claim: &Claim, ttl: Duration) -> AuthResult<String> {
        let now = self.clock.now();
        let iat = now.timestamp();
        let exp = expiry_secs(now, ttl);

        let claims = TokenClaims {
            sub: claim.identity.clone(),
            mid: claim.member_id,
            role: claim.role.clone(),
            iat,
            exp,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Check a token and return the claim it carries
    pub async fn verify(&self, token: &str) -> Result<Claim, RejectReason> {
        if self.revoked.contains(token).await {
            return Err(RejectReason::Revoked);
        }

        let claims = self.decode_signed(token)?;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(RejectReason::Expired);
        }

        Ok(claims.claim())
    }

    /// Add `token` to the revocation set
    ///
    /// Revoking an expired token succeeds. A token that does not carry a valid
    /// signature is not recorded: it already fails as `SignatureInvalid`, and
    /// recording it would let any caller grow the set.
    pub async fn revoke(&self, token: &str) {
        let claims = match self.decode_signed(token) {
            Ok(claims) => claims,
            Err(_) => return,
        };

        self.revoked
            .insert(token, DateTime::from_timestamp(claims.exp, 0))
            .await;

        if self.prune_revoked {
            let pruned = self.revoked.prune(self.clock.now()).await;
            if pruned > 0 {
                tracing::debug!("Pruned {} expired revocation entries", pruned);
            }
        }
    }

    fn decode_signed(&self, token: &str) -> Result<TokenClaims, RejectReason> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {:?}", e.kind());
                RejectReason::SignatureInvalid
            })
    }
}

/// Unix second at which a token issued at `now` with `ttl` expires
fn expiry_secs(now: DateTime<Utc>, ttl: Duration) -> i64 {
    let ttl = ttl.max(Duration::from_secs(1));
    let nanos = u64::from(now.timestamp_subsec_nanos()) + u64::from(ttl.subsec_nanos());
    let secs = ttl.as_secs().saturating_add(nanos.div_ceil(1_000_000_000));
    now.timestamp()
        .saturating_add(i64::try_from(secs).unwrap_or(i64::MAX / 2))
}
