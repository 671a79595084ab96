//! Login identifier type (email address or phone number).

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("static email pattern is valid")
});

/// Number of digits in an accepted phone number.
const PHONE_DIGITS: usize = 10;

/// Errors that can occur when parsing an [`Identifier`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The input string is empty (after trimming).
    #[error("identifier cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("identifier must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is neither a valid email nor a 10-digit phone number.
    #[error("identifier must be an email address or a 10-digit phone number")]
    Malformed,
}

/// Which kind of identifier a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// An email address.
    Email,
    /// A 10-digit phone number.
    Phone,
}

/// A login identifier: an email address or a 10-digit phone number.
///
/// The identifier is the primary key of a user and the key under which OTP
/// challenges, carts and orders are stored.
///
/// ## Constraints
///
/// - Leading and trailing whitespace is trimmed
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Must match `^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$` or be
///   exactly 10 ASCII digits
///
/// ## Examples
///
/// ```
/// use smart_laundry_core::Identifier;
///
/// assert!(Identifier::parse("user@example.com").is_ok());
/// assert!(Identifier::parse("9876543210").is_ok());
///
/// assert!(Identifier::parse("").is_err());
/// assert!(Identifier::parse("12345").is_err());
/// assert!(Identifier::parse("user@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Maximum length of an identifier (RFC 5321 email limit).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Identifier` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, or neither an email address nor a 10-digit phone number.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(IdentifierError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if is_phone_number(s) || EMAIL_PATTERN.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(IdentifierError::Malformed)
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is an email address or a phone number.
    #[must_use]
    pub fn kind(&self) -> IdentifierKind {
        if self.0.contains('@') {
            IdentifierKind::Email
        } else {
            IdentifierKind::Phone
        }
    }

    /// Display name derived from the identifier.
    ///
    /// The local part of an email address, or the identifier itself.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }

    /// The phone number, if the identifier is all digits.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        (!self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())).then_some(&self.0)
    }
}

fn is_phone_number(s: &str) -> bool {
    s.len() == PHONE_DIGITS && s.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
