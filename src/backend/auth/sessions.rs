/**
 * Server-Side Sessions
 *
 * This module keeps session records in process memory, keyed by an opaque
 * handle that the client holds as a cookie.
 *
 * # Expiry
 *
 * A session is expired once `now >= expires_at`. Under [`RenewalPolicy::Fixed`]
 * `expires_at` is set at creation and never moves. Under
 * [`RenewalPolicy::Rolling`] every successful read sets it to `now + ttl`.
 * Expired records are evicted by the read that finds them; there is no
 * background sweep.
 */

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::clock::SharedClock;
use crate::backend::error::RejectReason;
use crate::shared::{Claim, RenewalPolicy};

/// Opaque session handle
pub type SessionHandle = String;

/// Server-held session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub claim: Claim,
    /// Lifetime granted at creation, reused for rolling renewal
    pub ttl: Duration,
    pub expires_at: DateTime<Utc>,
}

/// Process-wide session map
#[derive(Debug, Default)]
pub struct SessionTable {
    records: RwLock<HashMap<SessionHandle, SessionRecord>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Creates, reads, renews and destroys sessions
pub struct SessionManager {
    table: Arc<SessionTable>,
    ttl: Duration,
    policy: RenewalPolicy,
    clock: SharedClock,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(
        table: Arc<SessionTable>,
        ttl: Duration,
        policy: RenewalPolicy,
        clock: SharedClock,
    ) -> Self {
        Self {
            table,
            ttl,
            policy,
            clock,
        }
    }

    /// Default session lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn policy(&self) -> RenewalPolicy {
        self.policy
    }

    /// Store a new session for `claim` and return its handle
    pub async fn create(&self, claim: Claim, ttl: Duration) -> SessionHandle {
        let handle = Uuid::new_v4().simple().to_string();
        let expires_at = expiry_after(self.clock.now(), ttl);

        tracing::debug!("Session created for {} until {}", claim.identity, expires_at);

        self.table.records.write().await.insert(
            handle.clone(),
            SessionRecord {
                claim,
                ttl,
                expires_at,
            },
        );

        handle
    }

    /// Claim of a live session
    ///
    /// An expired record is removed. Under the rolling policy a successful
    /// read extends the session by its ttl.
    pub async fn read(&self, handle: &str) -> Result<Claim, RejectReason> {
        let now = self.clock.now();
        let mut records = self.table.records.write().await;

        match records.entry(handle.to_owned()) {
            Entry::Vacant(_) => Err(RejectReason::NoSuchSession),
            Entry::Occupied(entry) if now >= entry.get().expires_at => {
                let record = entry.remove();
                tracing::debug!("Session for {} expired at {}", record.claim.identity, record.expires_at);
                Err(RejectReason::Expired)
            }
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                if self.policy == RenewalPolicy::Rolling {
                    record.expires_at = expiry_after(now, record.ttl);
                }
                Ok(record.claim.clone())
            }
        }
    }

    /// Remove a session; unknown handles are ignored
    pub async fn destroy(&self, handle: &str) {
        if let Some(record) = self.table.records.write().await.remove(handle) {
            tracing::debug!("Session destroyed for {}", record.claim.identity);
        }
    }

    /// Current expiry of a session, without renewing it
    pub async fn expires_at(&self, handle: &str) -> Option<DateTime<Utc>> {
        self.table
            .records
            .read()
            .await
            .get(handle)
            .map(|record| record.expires_at)
    }

    /// Number of stored sessions, expired-but-unread ones included
    pub async fn len(&self) -> usize {
        self.table.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn to_delta(ttl: Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX)
}

fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now.checked_add_signed(to_delta(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
