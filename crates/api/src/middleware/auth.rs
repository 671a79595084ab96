//! Authentication extractors.
//!
//! Protected handlers take [`RequireAuth`] or [`RequireAdmin`] as an argument;
//! a missing, invalid or expired bearer token short-circuits the request with
//! a 401, and a non-admin on an admin route gets a 403.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use smart_laundry_core::{Identifier, IdentifierKind, Role};

use crate::error::{AppError, set_sentry_user};
use crate::models::User;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// The subject of a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub identifier: Identifier,
}

/// Extractor that requires a valid session token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.identifier)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidToken)?),
            None => None,
        };

        let identifier = state.auth().authenticate(header)?;

        let email = (identifier.kind() == IdentifierKind::Email).then(|| identifier.as_str());
        set_sentry_user(&identifier, email);

        Ok(Self(AuthUser { identifier }))
    }
}

/// Extractor that requires a valid session token belonging to an admin.
///
/// Resolves to the admin's user record.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        let admin = state
            .auth()
            .require_role(&user.identifier, Role::Admin)
            .await?;
        Ok(Self(admin))
    }
}
