//! Session token commands.
//!
//! # Usage
//!
//! ```bash
//! sl-cli token mint -i admin@laundry.com
//! sl-cli token inspect <token>
//! ```
//!
//! # Environment Variables
//!
//! - `LAUNDRY_JWT_SECRET` - Signing secret, same as the API server
//! - `LAUNDRY_SESSION_TTL_HOURS` - Token lifetime (default: 24)

use chrono::{DateTime, Utc};
use thiserror::Error;

use smart_laundry_api::config::{ConfigError, LaundryConfig};
use smart_laundry_api::services::auth::{AuthError, SessionTokens};
use smart_laundry_core::{Identifier, IdentifierError};

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The identifier is neither an email address nor a phone number.
    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    /// Signing or verification failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Claims could not be rendered.
    #[error("Failed to render claims: {0}")]
    Render(#[from] serde_json::Error),
}

/// Mint a token for `identifier` using the environment's configuration.
///
/// # Errors
///
/// Returns `TokenError` if configuration is missing or the identifier is invalid.
pub fn mint(identifier: &str) -> Result<String, TokenError> {
    let config = LaundryConfig::from_env()?;
    mint_with(&config, identifier, Utc::now())
}

/// Verify `token` and render its claims as JSON.
///
/// # Errors
///
/// Returns `TokenError` if the token is malformed, forged or expired.
pub fn inspect(token: &str) -> Result<String, TokenError> {
    let config = LaundryConfig::from_env()?;
    inspect_with(&config, token, Utc::now())
}

fn tokens(config: &LaundryConfig) -> SessionTokens {
    SessionTokens::new(&config.jwt_secret, config.session_ttl)
}

fn mint_with(
    config: &LaundryConfig,
    identifier: &str,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let identifier = Identifier::parse(identifier)?;
    let token = tokens(config).mint(&identifier, now)?;
    tracing::info!(identifier = %identifier, "minted session token");
    Ok(token)
}

fn inspect_with(
    config: &LaundryConfig,
    token: &str,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = tokens(config).verify(token.trim(), now)?;
    Ok(serde_json::to_string_pretty(&claims)?)
}
