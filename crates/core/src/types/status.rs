//! Order status.
//!
//! Orders start as `Pending`. Administrators may overwrite the status with
//! any string; the well-known lifecycle values are exposed as constants so
//! callers can recognize them without rejecting anything else.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// An open string: status updates from the admin API are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub const PENDING: &'static str = "Pending";
    pub const CONFIRMED: &'static str = "Confirmed";
    pub const IN_PROGRESS: &'static str = "InProgress";
    pub const DELIVERED: &'static str = "Delivered";
    pub const CANCELLED: &'static str = "Cancelled";

    /// Well-known lifecycle values, in lifecycle order.
    pub const KNOWN: [&'static str; 5] = [
        Self::PENDING,
        Self::CONFIRMED,
        Self::IN_PROGRESS,
        Self::DELIVERED,
        Self::CANCELLED,
    ];

    /// Status of a freshly placed order.
    #[must_use]
    pub fn pending() -> Self {
        Self(Self::PENDING.to_owned())
    }

    /// Wrap an arbitrary status value.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is one of the well-known lifecycle statuses.
    #[must_use]
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::pending()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default().as_str(), "Pending");
    }

    #[test]
    fn test_is_known() {
        assert!(OrderStatus::new("Delivered").is_known());
        assert!(!OrderStatus::new("Lost in dryer").is_known());
    }
}
