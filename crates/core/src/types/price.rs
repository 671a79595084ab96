//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole rupee amounts today, but totals are carried as
//! [`Decimal`] so fractional prices never lose precision. On the wire a price
//! is a JSON number, never a string.

use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount in the store's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole amount.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units at this price.
    #[must_use]
    pub fn times(self, quantity: i64) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<i64> for Price {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self::from_whole(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        assert_eq!(Price::from_whole(25).times(3), Price::from_whole(75));
        assert_eq!(Price::from_whole(25) * -1, Price::from_whole(-25));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_whole(50), Price::from_whole(40)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_whole(90));

        let empty: Price = std::iter::empty().sum();
        assert_eq!(empty, Price::ZERO);
    }

    #[test]
    fn test_json_is_a_number() {
        let json = serde_json::to_value(Price::from_whole(25)).unwrap();
        assert!(json.is_number());
        assert_eq!(json.as_f64(), Some(25.0));

        let parsed: Price = serde_json::from_str("199.5").unwrap();
        assert_eq!(parsed.amount(), Decimal::new(1995, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_whole(120).to_string(), "₹120");
    }
}
