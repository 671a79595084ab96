//! Contact form route handler.
//!
//! Submissions are not stored; they are written to the log as structured
//! events for whoever watches the log stream.

use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use super::MessageResponse;
use crate::error::{ApiJson, AppError, Result};

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Submit a contact message.
///
/// POST /api/contact
#[instrument(skip_all)]
pub async fn submit(ApiJson(form): ApiJson<ContactForm>) -> Result<Json<MessageResponse>> {
    if !form.is_complete() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    tracing::info!(
        name = %form.name.trim(),
        email = %form.email.trim(),
        message = %form.message.trim(),
        "contact form submission"
    );

    Ok(Json(MessageResponse::new("Message sent successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_is_complete() {
        assert!(form("Priya", "priya@example.com", "Do you iron sarees?").is_complete());
        assert!(!form("Priya", "", "Hello").is_complete());
        assert!(!form("  ", "priya@example.com", "Hello").is_complete());
    }
}
