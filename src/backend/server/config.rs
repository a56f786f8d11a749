/**
 * Server Configuration
 *
 * Loads the `AuthConfig` the server starts with.
 *
 * # Configuration Sources
 *
 * In increasing priority:
 * 1. Built-in defaults
 * 2. The TOML file named by `MEMBERGATE_CONFIG`, if set
 * 3. Environment variables (a `.env` file is loaded by the binary first)
 *
 * # Error Handling
 *
 * Unlike optional services, a bad auth configuration stops startup: the
 * error is logged and returned.
 */

use crate::shared::{AuthConfig, ConfigError};

/// Load and validate the auth configuration
///
/// # Example
///
/// ```rust,no_run
/// use membergate::backend::server::config::load_config;
///
/// let config = load_config().expect("valid configuration");
/// println!("store: {}", config.store_path.display());
/// ```
pub fn load_config() -> Result<AuthConfig, ConfigError> {
    match AuthConfig::load() {
        Ok(config) => {
            tracing::info!(
                store = %config.store_path.display(),
                mode = %config.auth_mode,
                policy = %config.session_policy,
                scheme = %config.password_scheme,
                "Configuration loaded"
            );
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            Err(e)
        }
    }
}
