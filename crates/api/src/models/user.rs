//! User domain types.

use chrono::NaiveDateTime;
use serde::Serialize;

use smart_laundry_core::{Identifier, Role};

/// A registered customer or operator.
///
/// Users are created on their first successful OTP login and never edited
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Primary key: the email address or phone number used to log in.
    pub id: Identifier,
    /// Same value as `id`, kept for clients that read `email`.
    pub email: Identifier,
    /// Display name derived from the identifier.
    pub name: String,
    /// The identifier when it is a phone number, otherwise empty.
    pub phone: String,
    pub role: Role,
    /// Local time the account was created.
    pub created_at: NaiveDateTime,
}

impl User {
    /// Build a new user record for `identifier`.
    #[must_use]
    pub fn new(identifier: Identifier, role: Role, created_at: NaiveDateTime) -> Self {
        Self {
            name: identifier.display_name().to_owned(),
            phone: identifier.phone().unwrap_or_default().to_owned(),
            email: identifier.clone(),
            id: identifier,
            role,
            created_at,
        }
    }
}
