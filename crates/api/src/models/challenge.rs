//! One-time passcode challenges.

use chrono::{DateTime, Utc};

use smart_laundry_core::Identifier;

/// A pending OTP for one identifier.
///
/// Issuing a new challenge for the same identifier replaces this one.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub identifier: Identifier,
    /// Six ASCII digits.
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    #[must_use]
    pub const fn new(identifier: Identifier, code: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            identifier,
            code,
            expires_at,
        }
    }

    /// Whether the challenge is past its expiry at `now`.
    ///
    /// The expiry instant itself is still valid.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compare a submitted code against this challenge, ignoring surrounding
    /// whitespace on both sides.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.trim() == submitted.trim()
    }
}

// The code must never end up in logs via `{:?}`.
impl std::fmt::Debug for OtpChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpChallenge")
            .field("identifier", &self.identifier)
            .field("code", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn challenge(expires_at: DateTime<Utc>) -> OtpChallenge {
        OtpChallenge::new(
            Identifier::parse("priya@example.com").unwrap(),
            "482913".to_owned(),
            expires_at,
        )
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let c = challenge(now);
        assert!(!c.is_expired(now));
        assert!(c.is_expired(now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_matches_trims() {
        let c = challenge(Utc::now());
        assert!(c.matches("482913"));
        assert!(c.matches(" 482913\n"));
        assert!(!c.matches("482914"));
        assert!(!c.matches(""));
    }

    #[test]
    fn test_debug_redacts_code() {
        let c = challenge(Utc::now());
        let debug = format!("{c:?}");
        assert!(!debug.contains("482913"));
        assert!(debug.contains("[REDACTED]"));
    }
}
