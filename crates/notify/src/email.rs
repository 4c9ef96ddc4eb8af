//! SMTP delivery via `lettre`.
//!
//! [`SmtpNotifier`] wraps the async SMTP transport to send plain-text
//! guest and staff emails. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`MailerConfig::from_env`]
//! returns `None` and the caller should fall back to [`crate::NoopNotifier`].

use async_trait::async_trait;
use tavola_db::models::contact_message::ContactMessage;
use tavola_db::models::reservation::Reservation;

use crate::templates;
use crate::Notifier;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@tavola.local";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl MailerConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                |
    /// |-----------------|----------|------------------------|
    /// | `SMTP_HOST`     | yes      | --                     |
    /// | `SMTP_PORT`     | no       | `587`                  |
    /// | `SMTP_FROM`     | no       | `noreply@tavola.local` |
    /// | `SMTP_USER`     | no       | --                     |
    /// | `SMTP_PASSWORD` | no       | --                     |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Restaurant identity woven into outbound mail bodies and used as the
/// destination for contact notifications.
#[derive(Debug, Clone)]
pub struct RestaurantInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl RestaurantInfo {
    /// Load restaurant identity from environment variables with defaults
    /// suitable for local development.
    ///
    /// | Variable           | Default                |
    /// |--------------------|------------------------|
    /// | `RESTAURANT_NAME`  | `Tavola`               |
    /// | `RESTAURANT_EMAIL` | `info@tavola.local`    |
    /// | `RESTAURANT_PHONE` | `+1 (555) 123-4567`    |
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("RESTAURANT_NAME").unwrap_or_else(|_| "Tavola".to_string()),
            email: std::env::var("RESTAURANT_EMAIL")
                .unwrap_or_else(|_| "info@tavola.local".to_string()),
            phone: std::env::var("RESTAURANT_PHONE")
                .unwrap_or_else(|_| "+1 (555) 123-4567".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Sends guest and staff emails via SMTP.
pub struct SmtpNotifier {
    config: MailerConfig,
    restaurant: RestaurantInfo,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier with the given configuration.
    pub fn new(config: MailerConfig, restaurant: RestaurantInfo) -> Self {
        Self { config, restaurant }
    }

    /// Send a single plain-text email.
    async fn send(&self, to_email: &str, subject: &str, body: String) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_reservation_confirmation(&self, reservation: &Reservation) -> bool {
        let subject = templates::reservation_confirmation_subject(&self.restaurant);
        let body = templates::reservation_confirmation_body(reservation, &self.restaurant);

        match self.send(&reservation.email, &subject, body).await {
            Ok(()) => {
                tracing::info!(
                    reservation_id = reservation.id,
                    to = %reservation.email,
                    "Reservation confirmation email sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    reservation_id = reservation.id,
                    error = %e,
                    "Failed to send reservation confirmation email"
                );
                false
            }
        }
    }

    async fn send_contact_notification(&self, message: &ContactMessage) -> bool {
        let subject = templates::contact_notification_subject(message);
        let body = templates::contact_notification_body(message);

        match self.send(&self.restaurant.email, &subject, body).await {
            Ok(()) => {
                tracing::info!(message_id = message.id, "Contact notification email sent");
                true
            }
            Err(e) => {
                tracing::error!(
                    message_id = message.id,
                    error = %e,
                    "Failed to send contact notification email"
                );
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(MailerConfig::from_env().is_none());
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
