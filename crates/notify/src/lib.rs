//! Outbound guest notifications.
//!
//! The [`Notifier`] trait is the seam between the reservation engine and
//! email delivery: the engine receives an `Arc<dyn Notifier>` explicitly
//! rather than reaching for a global mail client. Sends are best-effort
//! by contract -- a failed send is logged and reported as `false`, never
//! surfaced to the guest.
//!
//! - [`SmtpNotifier`] -- production implementation over `lettre`'s async
//!   SMTP transport.
//! - [`NoopNotifier`] -- stand-in when SMTP is not configured.

pub mod email;
pub mod templates;

use async_trait::async_trait;
use tavola_db::models::contact_message::ContactMessage;
use tavola_db::models::reservation::Reservation;

pub use email::{EmailError, MailerConfig, RestaurantInfo, SmtpNotifier};

/// Outbound notification seam consumed by the reservation engine and the
/// contact endpoint.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Email the guest about their reservation. Returns whether the send
    /// succeeded; failures are logged by the implementation.
    async fn send_reservation_confirmation(&self, reservation: &Reservation) -> bool;

    /// Notify the restaurant mailbox about a new contact message.
    async fn send_contact_notification(&self, message: &ContactMessage) -> bool;
}

/// No-op notifier used when SMTP is not configured. Every send is
/// recorded in the log and reported as unsent.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_reservation_confirmation(&self, reservation: &Reservation) -> bool {
        tracing::debug!(
            reservation_id = reservation.id,
            "SMTP not configured; skipping reservation confirmation email"
        );
        false
    }

    async fn send_contact_notification(&self, message: &ContactMessage) -> bool {
        tracing::debug!(
            message_id = message.id,
            "SMTP not configured; skipping contact notification email"
        );
        false
    }
}
