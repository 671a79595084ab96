//! Order identifiers.
//!
//! Order IDs have the external shape `ORD_<digits>`, where the digits are a
//! time-derived sequence number. The API crate guarantees uniqueness by
//! handing out strictly increasing sequence numbers; this module only owns
//! the format.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every order ID.
pub const ORDER_ID_PREFIX: &str = "ORD_";

/// A type-safe order identifier.
///
/// # Example
///
/// ```rust
/// use smart_laundry_core::OrderId;
///
/// let id = OrderId::from_sequence(1_700_000_000_123);
/// assert_eq!(id.as_str(), "ORD_1700000000123");
/// assert_eq!(id.sequence(), Some(1_700_000_000_123));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create an order ID from a sequence number.
    #[must_use]
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{ORDER_ID_PREFIX}{sequence}"))
    }

    /// Wrap a path segment as an order ID for lookups.
    ///
    /// Lookups by a malformed ID simply find nothing, so no validation is
    /// performed here.
    #[must_use]
    pub fn from_path(s: &str) -> Self {
        Self(s.to_owned())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric sequence part, if well formed.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0
            .strip_prefix(ORDER_ID_PREFIX)
            .and_then(|digits| digits.parse().ok())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequence_shape() {
        let id = OrderId::from_sequence(42);
        assert_eq!(id.to_string(), "ORD_42");
    }

    #[test]
    fn test_sequence_round_trips() {
        let id = OrderId::from_sequence(1_700_000_000);
        assert_eq!(id.sequence(), Some(1_700_000_000));
    }

    #[test]
    fn test_from_path_is_unchecked() {
        let id = OrderId::from_path("whatever");
        assert_eq!(id.as_str(), "whatever");
        assert_eq!(id.sequence(), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = OrderId::from_sequence(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ORD_7\"");
    }
}
