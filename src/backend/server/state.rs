/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The auth gateway (member store, token service, session manager)
 * - The loaded configuration, which selects the auth mode and cookie name
 *
 * Both are behind `Arc`, so cloning the state per request is cheap and every
 * handler sees the same revocation set and session table.
 *
 * # Example
 *
 * ```rust,no_run
 * use std::sync::Arc;
 * use axum::extract::State;
 * use membergate::backend::auth::AuthGateway;
 *
 * async fn handler(State(gateway): State<Arc<AuthGateway>>) {
 *     let _ = gateway.exists("alice").await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::gateway::AuthGateway;
use crate::shared::AuthConfig;

/// Application state shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// Login, authorize and logout
    pub gateway: Arc<AuthGateway>,

    /// Configuration the server was started with
    pub config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(gateway: AuthGateway, config: AuthConfig) -> Self {
        Self {
            gateway: Arc::new(gateway),
            config: Arc::new(config),
        }
    }
}

/// Implement FromRef for AuthGateway
///
/// This allows Axum handlers to extract `Arc<AuthGateway>` directly
/// from `AppState` using `State(Arc<AuthGateway>)`.
impl FromRef<AppState> for Arc<AuthGateway> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.gateway.clone()
    }
}

/// Implement FromRef for AuthConfig
impl FromRef<AppState> for Arc<AuthConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
