//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identifier is neither an email address nor a 10-digit phone number.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] smart_laundry_core::IdentifierError),

    /// Login request without an identifier or a code.
    #[error("identifier and code are required")]
    MissingFields,

    /// No pending OTP for this identifier.
    #[error("no pending challenge")]
    ChallengeNotFound,

    /// The pending OTP has expired and was discarded.
    #[error("challenge expired")]
    ChallengeExpired,

    /// The submitted code does not match the pending OTP.
    #[error("code mismatch")]
    CodeMismatch,

    /// No `Authorization` header on a protected request.
    #[error("missing credential")]
    MissingCredential,

    /// Token is malformed, tampered with or signed with another key.
    #[error("invalid token")]
    InvalidToken,

    /// Token is past its expiry.
    #[error("token expired")]
    TokenExpired,

    /// Authenticated, but not allowed to perform the operation.
    #[error("forbidden")]
    Forbidden,

    /// Token subject has no user record.
    #[error("user not found")]
    UserNotFound,

    /// Token signing failed.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Repository error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
