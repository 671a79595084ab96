//! API server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LAUNDRY_JWT_SECRET` - Session token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `LAUNDRY_HOST` - Bind address (default: 127.0.0.1)
//! - `LAUNDRY_PORT` - Listen port (default: 5000)
//! - `LAUNDRY_ADMIN_IDENTIFIERS` - Comma-separated identifiers granted the admin
//!   role on first login (default: `admin@laundry.com,admin`)
//! - `LAUNDRY_CORS_ORIGINS` - Comma-separated allowed browser origins
//!   (default: `http://localhost:5173,http://localhost:3000`)
//! - `LAUNDRY_OTP_TTL_SECS` - OTP lifetime in seconds (default: 300)
//! - `LAUNDRY_SESSION_TTL_HOURS` - Session token lifetime in hours (default: 24)
//! - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_FROM` -
//!   Email delivery for OTP codes. All but `SMTP_PORT` (default: 587) must be
//!   set to enable email; otherwise codes are written to the log.
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_ADMIN_IDENTIFIERS: &str = "admin@laundry.com,admin";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "change-me",
    "replace",
    "placeholder",
    "example",
    "secret-key",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct LaundryConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Session token signing secret
    pub jwt_secret: SecretString,
    /// How long an issued session token stays valid
    pub session_ttl: chrono::Duration,
    /// How long an issued OTP stays valid
    pub otp_ttl: chrono::Duration,
    /// Identifiers that receive the admin role when their account is created
    pub admin_identifiers: Vec<String>,
    /// Browser origins allowed by CORS
    pub cors_origins: Vec<String>,
    /// SMTP settings for OTP email delivery
    pub email: Option<EmailConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced by Sentry
    pub sentry_traces_sample_rate: f32,
}

/// SMTP configuration for OTP email delivery.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub from_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl LaundryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the signing secret fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("LAUNDRY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("LAUNDRY_HOST".to_string(), e.to_string()))?;
        let port = parse_env("LAUNDRY_PORT", "5000")?;
        let jwt_secret = get_required_env("LAUNDRY_JWT_SECRET").map(SecretString::from)?;
        validate_jwt_secret(&jwt_secret, "LAUNDRY_JWT_SECRET")?;

        let session_ttl = chrono::Duration::hours(parse_env("LAUNDRY_SESSION_TTL_HOURS", "24")?);
        let otp_ttl = chrono::Duration::seconds(parse_env("LAUNDRY_OTP_TTL_SECS", "300")?);

        let admin_identifiers = split_list(&get_env_or_default(
            "LAUNDRY_ADMIN_IDENTIFIERS",
            DEFAULT_ADMIN_IDENTIFIERS,
        ));
        let cors_origins = split_list(&get_env_or_default(
            "LAUNDRY_CORS_ORIGINS",
            DEFAULT_CORS_ORIGINS,
        ));

        let email = EmailConfig::from_env()?;

        Ok(Self {
            host,
            port,
            jwt_secret,
            session_ttl,
            otp_ttl,
            admin_identifiers,
            cors_origins,
            email,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Configuration with development defaults and the given signing secret.
    ///
    /// Used by tests and tools that never read the environment.
    #[must_use]
    pub fn with_secret(jwt_secret: SecretString) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            jwt_secret,
            session_ttl: chrono::Duration::hours(24),
            otp_ttl: chrono::Duration::seconds(300),
            admin_identifiers: split_list(DEFAULT_ADMIN_IDENTIFIERS),
            cors_origins: split_list(DEFAULT_CORS_ORIGINS),
            email: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    /// Email is enabled only when host, credentials and sender are all set.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(smtp_host), Some(smtp_username), Some(smtp_password), Some(from_address)) = (
            get_optional_env("SMTP_HOST"),
            get_optional_env("SMTP_USERNAME"),
            get_optional_env("SMTP_PASSWORD"),
            get_optional_env("SMTP_FROM"),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            smtp_host,
            smtp_port: parse_env("SMTP_PORT", "587")?,
            smtp_username,
            smtp_password: SecretString::from(smtp_password),
            from_address,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Split a comma-separated list, dropping blank entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Validate that a signing secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Check a signing secret for length, placeholder text and entropy.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` naming `var_name` if any check fails.
pub fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    validate_secret_strength(secret.expose_secret(), var_name)?;
    validate_secret_length(secret, var_name)
}
