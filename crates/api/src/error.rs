//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`,
//! and every error reaches the client as `{"message": "..."}`.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::orders::OrderError;

/// Message sent in place of any server-side error detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Resource not found. The message is sent to the client.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client. The message is sent to the client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Endpoint exists but is not available yet.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidIdentifier(_)
                | AuthError::MissingFields
                | AuthError::ChallengeNotFound
                | AuthError::ChallengeExpired
                | AuthError::CodeMismatch => StatusCode::BAD_REQUEST,
                AuthError::MissingCredential
                | AuthError::InvalidToken
                | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
                AuthError::Forbidden => StatusCode::FORBIDDEN,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::Token(_) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Cart(err) => match err {
                CartError::ItemNotFound(_) | CartError::CartNotFound | CartError::NotInCart(_) => {
                    StatusCode::NOT_FOUND
                }
                CartError::QuantityOverflow(_) => StatusCode::BAD_REQUEST,
                CartError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Order(err) => match err {
                OrderError::EmptyCart | OrderError::MissingStatus => StatusCode::BAD_REQUEST,
                OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Message safe to show the client.
    #[must_use]
    pub fn client_message(&self) -> String {
        let message = match self {
            Self::Database(_) | Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
            Self::Auth(err) => match err {
                AuthError::InvalidIdentifier(_) => "Invalid email or phone number",
                AuthError::MissingFields => "Email and OTP are required",
                AuthError::ChallengeNotFound => "OTP not found or expired",
                AuthError::ChallengeExpired => "OTP expired",
                AuthError::CodeMismatch => "Invalid OTP",
                AuthError::MissingCredential => "Token is required",
                AuthError::InvalidToken => "Invalid token",
                AuthError::TokenExpired => "Token has expired",
                AuthError::Forbidden => "Access denied",
                AuthError::UserNotFound => "User not found",
                AuthError::Token(_) | AuthError::Repository(_) => INTERNAL_ERROR_MESSAGE,
            },
            Self::Cart(err) => match err {
                CartError::ItemNotFound(_) => "Item not found",
                CartError::CartNotFound => "Cart not found",
                CartError::NotInCart(_) => "Item not found in cart",
                CartError::QuantityOverflow(_) => "Quantity out of range",
                CartError::Repository(_) => INTERNAL_ERROR_MESSAGE,
            },
            Self::Order(err) => match err {
                OrderError::EmptyCart => "Cart is empty",
                OrderError::MissingStatus => "Status is required",
                OrderError::NotFound(_) => "Order not found",
                OrderError::Repository(_) => INTERNAL_ERROR_MESSAGE,
            },
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::NotImplemented(msg) => msg.as_str(),
        };
        message.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(json!({ "message": self.client_message() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Self::BadRequest("Invalid request body".to_string())
    }
}

/// JSON body extractor whose rejections are `AppError`s.
///
/// Malformed or mistyped bodies become a 400 with the usual `{"message"}`
/// shape instead of axum's plain-text rejection.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("item_id", "shirt")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_message(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json["message"].as_str().unwrap().to_string())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Service not found".to_string());
        assert_eq!(err.to_string(), "Not found: Service not found");

        let err = AppError::BadRequest("All fields are required".to_string());
        assert_eq!(err.to_string(), "Bad request: All fields are required");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::NotFound("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Auth(AuthError::CodeMismatch).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Auth(AuthError::TokenExpired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Auth(AuthError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Cart(CartError::CartNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Order(OrderError::EmptyCart).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotImplemented("x".to_string()).status(),
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[tokio::test]
    async fn test_json_message_body() {
        let (status, message) = body_message(AppError::Auth(AuthError::ChallengeExpired)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "OTP expired");
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let err = AppError::Database(RepositoryError::Backend("connection refused".to_string()));
        let (status, message) = body_message(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");

        let err = AppError::Cart(CartError::Repository(RepositoryError::Backend(
            "disk full".to_string(),
        )));
        let (_, message) = body_message(err).await;
        assert_eq!(message, "Internal server error");
    }
}
