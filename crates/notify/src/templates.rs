//! Plain-text bodies for outbound email.
//!
//! Kept as pure functions so the wording can be unit-tested without an
//! SMTP transport.

use tavola_db::models::contact_message::ContactMessage;
use tavola_db::models::reservation::Reservation;

use crate::email::RestaurantInfo;

/// Subject line for the guest-facing reservation email.
pub fn reservation_confirmation_subject(restaurant: &RestaurantInfo) -> String {
    format!("Reservation Confirmation - {}", restaurant.name)
}

/// Guest-facing reservation email body.
pub fn reservation_confirmation_body(
    reservation: &Reservation,
    restaurant: &RestaurantInfo,
) -> String {
    let special_requests = reservation
        .special_requests
        .as_deref()
        .map(|text| format!("Special Requests: {text}\n\n"))
        .unwrap_or_default();

    format!(
        "Dear {name},\n\n\
         Thank you for your reservation at {restaurant_name}!\n\n\
         Reservation Details:\n\
         - Date: {date}\n\
         - Time: {time}\n\
         - Party Size: {party_size} guests\n\
         - Status: {status}\n\n\
         {special_requests}\
         We look forward to serving you!\n\n\
         If you need to modify or cancel your reservation, please contact us at:\n\
         Phone: {phone}\n\
         Email: {email}\n\n\
         Best regards,\n\
         The {restaurant_name} Team\n",
        name = reservation.name,
        restaurant_name = restaurant.name,
        date = reservation.date.format("%B %d, %Y"),
        time = reservation.time.format("%I:%M %p"),
        party_size = reservation.party_size,
        status = reservation.status,
        special_requests = special_requests,
        phone = restaurant.phone,
        email = restaurant.email,
    )
}

/// Subject line for the staff-facing contact notification.
pub fn contact_notification_subject(message: &ContactMessage) -> String {
    format!(
        "New Contact Message - {}",
        message.subject.as_deref().unwrap_or("No Subject")
    )
}

/// Staff-facing contact notification body.
pub fn contact_notification_body(message: &ContactMessage) -> String {
    format!(
        "New contact message received:\n\n\
         From: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Subject: {subject}\n\n\
         Message:\n\
         {body}\n\n\
         Received at: {received}\n",
        name = message.name,
        email = message.email,
        phone = message.phone.as_deref().unwrap_or("Not provided"),
        subject = message.subject.as_deref().unwrap_or("No subject"),
        body = message.message,
        received = message.created_at.format("%B %d, %Y at %I:%M %p"),
    )
}
