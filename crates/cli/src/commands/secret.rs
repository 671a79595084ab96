//! Signing secret generation.
//!
//! Generated secrets are checked with the same rules the API server applies
//! to `LAUNDRY_JWT_SECRET` at startup, so the output can be pasted straight
//! into `.env`.

use rand::seq::IndexedRandom;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use smart_laundry_api::config::validate_jwt_secret;

pub const DEFAULT_LENGTH: usize = 48;

const MIN_LENGTH: usize = 32;
const MAX_ATTEMPTS: usize = 16;

const CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*-_=+";

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret length must be at least {MIN_LENGTH} (got {0})")]
    TooShort(usize),

    #[error("Could not generate a secret that passes validation")]
    Exhausted,
}

/// Generate a random secret of `length` characters.
///
/// # Errors
///
/// Returns `SecretError::TooShort` below the server's minimum length.
pub fn generate(length: usize) -> Result<String, SecretError> {
    if length < MIN_LENGTH {
        return Err(SecretError::TooShort(length));
    }

    let mut rng = rand::rng();
    for _ in 0..MAX_ATTEMPTS {
        let candidate: String = (0..length)
            .filter_map(|_| CHARSET.choose(&mut rng).map(|&b| char::from(b)))
            .collect();
        let candidate = SecretString::from(candidate);

        // Random text can still spell a placeholder word
        if validate_jwt_secret(&candidate, "LAUNDRY_JWT_SECRET").is_ok() {
            return Ok(candidate.expose_secret().to_owned());
        }
    }
    Err(SecretError::Exhausted)
}
