/**
 * Server Initialization
 *
 * This module handles the initialization of the Axum HTTP server: opening
 * the member store, constructing the token and session services, and
 * configuring the router.
 *
 * # Initialization Process
 *
 * 1. Open (or create) the member file
 * 2. Create the revocation set and session table
 * 3. Create app state
 * 4. Create the router with all routes and layers
 */

use axum::Router;

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::error::AuthResult;
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::shared::AuthConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the member file cannot be created or read.
pub async fn create_app(config: AuthConfig) -> AuthResult<Router<()>> {
    tracing::info!("Initializing membergate server");

    let gateway = AuthGateway::from_config(&config).await?;
    let members = gateway.store().len().await?;
    tracing::info!(
        "Member store ready at {} ({} members)",
        config.store_path.display(),
        members
    );

    Ok(create_app_with_gateway(gateway, config))
}

/// Create the router around an already-built gateway
///
/// Tests use this to inject a gateway driven by a manual clock.
pub fn create_app_with_gateway(gateway: AuthGateway, config: AuthConfig) -> Router<()> {
    let app_state = AppState::new(gateway, config);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
