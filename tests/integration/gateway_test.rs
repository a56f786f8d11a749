//! Gateway integration tests
//!
//! End-to-end flows through `AuthGateway` with a manual clock.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use tempfile::TempDir;

use crate::{assert_err, assert_ok};
use membergate::backend::auth::{AuthGateway, ManualClock};
use membergate::backend::{AuthError, RejectReason};
use membergate::shared::{AuthConfig, AuthMode, RenewalPolicy};

async fn gateway(dir: &TempDir, clock: &ManualClock, policy: RenewalPolicy) -> AuthGateway {
    let config = AuthConfig::builder()
        .store_path(dir.path().join("members.json"))
        .jwt_secret("gateway-integration")
        .token_ttl(Duration::from_secs(3600))
        .session_ttl(Duration::from_secs(1800))
        .session_policy(policy)
        .build()
        .unwrap();
    AuthGateway::from_config_with_clock(&config, Arc::new(clock.clone()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_alice_scenario_token_mode() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::starting_now();
    let gateway = gateway(&dir, &clock, RenewalPolicy::Rolling).await;

    let member = assert_ok!(gateway.register("alice", "secret123").await);
    assert_eq!(member.id.to_string(), "M0001");

    let proof = assert_ok!(gateway.login("alice", "secret123", AuthMode::Token).await);
    let claim = assert_ok!(gateway.authorize(proof.as_str(), AuthMode::Token).await);
    assert_eq!(claim.identity, "alice");

    gateway.logout(proof.as_str(), AuthMode::Token).await;
    assert_err!(
        gateway.authorize(proof.as_str(), AuthMode::Token).await,
        AuthError::Unauthorized(RejectReason::Revoked)
    );

    assert_err!(
        gateway.register("alice", "other").await,
        AuthError::DuplicateIdentity { .. }
    );
    assert_eq!(gateway.store().len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_alice_scenario_session_mode() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::starting_now();
    let gateway = gateway(&dir, &clock, RenewalPolicy::Rolling).await;

    assert_ok!(gateway.register("alice", "secret123").await);

    let proof = assert_ok!(gateway.login("alice", "secret123", AuthMode::Session).await);
    let claim = assert_ok!(gateway.authorize(proof.as_str(), AuthMode::Session).await);
    assert_eq!(claim.member_id.to_string(), "M0001");

    gateway.logout(proof.as_str(), AuthMode::Session).await;
    assert_err!(
        gateway.authorize(proof.as_str(), AuthMode::Session).await,
        AuthError::Unauthorized(RejectReason::NoSuchSession)
    );
}

#[tokio::test]
async fn test_token_expires_at_issued_plus_ttl() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::starting_now();
    let gateway = gateway(&dir, &clock, RenewalPolicy::Rolling).await;
    gateway.register("alice", "secret123").await.unwrap();

    let proof = gateway.login("alice", "secret123", AuthMode::Token).await.unwrap();

    clock.advance(Duration::from_secs(3599));
    assert_ok!(gateway.authorize(proof.as_str(), AuthMode::Token).await);

    clock.advance(Duration::from_secs(1));
    assert_err!(
        gateway.authorize(proof.as_str(), AuthMode::Token).await,
        AuthError::Unauthorized(RejectReason::Expired)
    );
}

#[tokio::test]
async fn test_revocation_is_shared_between_clones() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::starting_now();
    let gateway = gateway(&dir, &clock, RenewalPolicy::Fixed).await;
    let other = gateway.clone();
    gateway.register("alice", "secret123").await.unwrap();

    let proof = gateway.login("alice", "secret123", AuthMode::Token).await.unwrap();
    other.logout(proof.as_str(), AuthMode::Token).await;

    assert_matches!(
        gateway.authorize(proof.as_str(), AuthMode::Token).await,
        Err(AuthError::Unauthorized(RejectReason::Revoked))
    );
}

#[tokio::test]
async fn test_concurrent_logins_get_distinct_sessions() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::starting_now();
    let gateway = gateway(&dir, &clock, RenewalPolicy::Fixed).await;
    gateway.register("alice", "secret123").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let gateway = gateway.clone();
        handles.push(tokio::spawn(async move {
            gateway
                .login("alice", "secret123", AuthMode::Session)
                .await
                .unwrap()
                .into_string()
        }));
    }

    let mut proofs = Vec::new();
    for handle in handles {
        proofs.push(handle.await.unwrap());
    }
    proofs.sort();
    proofs.dedup();

    assert_eq!(proofs.len(), 8);
    assert_eq!(gateway.sessions().len().await, 8);
}
