//! Authentication route handlers.
//!
//! Login is two steps: `send-otp` issues a one-time code for an email or
//! phone number, and `login` exchanges it for a bearer token.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::MessageResponse;
use crate::error::{ApiJson, AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::state::AppState;

/// Body of `POST /api/auth/send-otp`.
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    /// Email address or 10-digit phone number.
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: Option<OtpCode>,
}

/// An OTP as submitted by the client, either `"123456"` or `123456`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OtpCode {
    Text(String),
    Number(u64),
}

impl OtpCode {
    fn into_string(self) -> String {
        match self {
            Self::Text(code) => code,
            Self::Number(code) => code.to_string(),
        }
    }
}

/// Successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub message: &'static str,
}

/// Issue an OTP.
///
/// POST /api/auth/send-otp
///
/// The code is delivered out of band and never included in the response.
#[instrument(skip_all)]
pub async fn send_otp(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SendOtpRequest>,
) -> Result<Json<MessageResponse>> {
    state.auth().issue_challenge(&body.email).await?;
    Ok(Json(MessageResponse::new("OTP sent successfully")))
}

/// Exchange an OTP for a session token.
///
/// POST /api/auth/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let code = body.otp.map(OtpCode::into_string).unwrap_or_default();
    let login = state.auth().verify(&body.email, &code).await?;

    Ok(Json(LoginResponse {
        token: login.token,
        user: login.user,
        message: "Login successful",
    }))
}

/// The authenticated user's profile.
///
/// GET /api/auth/me
#[instrument(skip_all, fields(user = %user.identifier))]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<User>> {
    Ok(Json(state.auth().current_user(&user.identifier).await?))
}

/// GET /api/auth/google
pub async fn google() -> AppError {
    AppError::NotImplemented("Google auth not implemented yet".to_string())
}
