//! Session tokens.
//!
//! Sessions are HS256 JWTs carrying the user's identifier as `sub`. Expiry is
//! checked against the injected clock rather than the system time, so the
//! library's own `exp` validation is switched off.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use smart_laundry_core::Identifier;

use super::AuthError;

/// Prefix of the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The user's identifier.
    pub sub: String,
    /// Issued at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expires at, seconds since the Unix epoch.
    pub exp: i64,
    /// Unique token ID.
    pub jti: String,
}

/// Mints and verifies session tokens.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionTokens {
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let key = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            validation,
            ttl,
        }
    }

    /// Mint a token for `subject`, valid from `now` for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if signing fails.
    pub fn mint(&self, subject: &Identifier, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Decode a token and check it has not expired at `now`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed, signed with
    /// another key or missing required claims, and `AuthError::TokenExpired`
    /// if `now` is past its `exp`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected session token");
                AuthError::InvalidToken
            })?
            .claims;

        if now.timestamp() > claims.exp {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Extract the token from an `Authorization` header value.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the value is not `Bearer <token>`.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidToken)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tokens(secret: &str) -> SessionTokens {
        SessionTokens::new(&SecretString::from(secret), Duration::hours(24))
    }

    fn subject() -> Identifier {
        Identifier::parse("priya@example.com").unwrap()
    }

    #[test]
    fn test_mint_and_verify() {
        let tokens = tokens("k7#Qp9$vL2@xR5!mN8&wT3*jF6^hB4%d");
        let now = Utc::now();
        let token = tokens.mint(&subject(), now).unwrap();

        let claims = tokens.verify(&token, now).unwrap();
        assert_eq!(claims.sub, "priya@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens = tokens("k7#Qp9$vL2@xR5!mN8&wT3*jF6^hB4%d");
        let now = Utc::now();
        let a = tokens.mint(&subject(), now).unwrap();
        let b = tokens.mint(&subject(), now).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_expired_token() {
        let tokens = tokens("k7#Qp9$vL2@xR5!mN8&wT3*jF6^hB4%d");
        let now = Utc::now();
        let token = tokens.mint(&subject(), now).unwrap();

        assert!(tokens.verify(&token, now + Duration::hours(24)).is_ok());
        assert!(matches!(
            tokens.verify(&token, now + Duration::hours(24) + Duration::seconds(1)),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let now = Utc::now();
        let token = tokens("k7#Qp9$vL2@xR5!mN8&wT3*jF6^hB4%d")
            .mint(&subject(), now)
            .unwrap();
        let result = tokens("Zq8!rT4#nW1@yP6$kM3&vC9*sH2^gX5%").verify(&token, now);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token() {
        let tokens = tokens("k7#Qp9$vL2@xR5!mN8&wT3*jF6^hB4%d");
        assert!(matches!(
            tokens.verify("not.a.jwt", Utc::now()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(bearer_token("Basic abc").is_err());
        assert!(bearer_token("Bearer ").is_err());
        assert!(bearer_token("abc.def.ghi").is_err());
    }
}
