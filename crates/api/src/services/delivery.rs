//! OTP delivery channels.
//!
//! Codes are handed to an [`OtpDelivery`] from a background task; delivery
//! failures are logged by the caller and never reach the client.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use smart_laundry_core::{Identifier, IdentifierKind};

use crate::config::EmailConfig;

const OTP_SUBJECT: &str = "Smart Laundry - Your OTP Code";

/// Errors that can occur when delivering a code.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The channel cannot reach this kind of identifier.
    #[error("no delivery route for {0}")]
    Unsupported(Identifier),
}

/// A way of getting an OTP to the person who asked for it.
#[async_trait]
pub trait OtpDelivery: Send + Sync {
    /// Send `code` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the code could not be handed off.
    async fn deliver(&self, to: &Identifier, code: &str) -> Result<(), DeliveryError>;
}

/// Development channel: writes the code to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDelivery;

#[async_trait]
impl OtpDelivery for LogDelivery {
    async fn deliver(&self, to: &Identifier, code: &str) -> Result<(), DeliveryError> {
        tracing::info!(to = %to, code = %code, "OTP issued (log delivery)");
        Ok(())
    }
}

/// Email channel over SMTP with STARTTLS.
///
/// Only email identifiers can be reached; phone numbers are rejected with
/// `DeliveryError::Unsupported`.
#[derive(Clone)]
pub struct SmtpDelivery {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpDelivery {
    /// Create the SMTP channel from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    fn build_message(&self, to: &Identifier, code: &str) -> Result<Message, DeliveryError> {
        if to.kind() != IdentifierKind::Email {
            return Err(DeliveryError::Unsupported(to.clone()));
        }

        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| DeliveryError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .as_str()
                .parse()
                .map_err(|_| DeliveryError::InvalidAddress(to.to_string()))?)
            .subject(OTP_SUBJECT)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(otp_text_body(code)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(otp_html_body(code)),
                    ),
            )?;
        Ok(message)
    }
}

#[async_trait]
impl OtpDelivery for SmtpDelivery {
    async fn deliver(&self, to: &Identifier, code: &str) -> Result<(), DeliveryError> {
        let message = self.build_message(to, code)?;
        self.mailer.send(message).await?;

        tracing::info!(to = %to, "OTP email sent");
        Ok(())
    }
}

impl std::fmt::Debug for SmtpDelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpDelivery")
            .field("from_address", &self.from_address)
            .finish_non_exhaustive()
    }
}

fn otp_text_body(code: &str) -> String {
    format!(
        "Smart Laundry - Login OTP\n\n\
         Your OTP code is: {code}\n\n\
         This code will expire in 5 minutes.\n\
         If you didn't request this, please ignore this email.\n"
    )
}

fn otp_html_body(code: &str) -> String {
    format!(
        "<h2>Smart Laundry - Login OTP</h2>\
         <p>Your OTP code is: <strong>{code}</strong></p>\
         <p>This code will expire in 5 minutes.</p>\
         <p>If you didn't request this, please ignore this email.</p>"
    )
}
