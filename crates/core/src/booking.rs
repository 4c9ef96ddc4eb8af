//! Reservation booking rules.
//!
//! Slot capacity, status transition policy, temporal constraints, and
//! guest field validation for table reservations. The API layer parses
//! and validates through these functions before anything touches the
//! database, so every rule here is pure and unit-testable.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use validator::ValidateEmail;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum number of non-cancelled reservations per (date, time) slot.
pub const SLOT_CAPACITY: i64 = 5;

/// Smallest bookable party.
pub const MIN_PARTY_SIZE: i32 = 1;

/// Largest bookable party.
pub const MAX_PARTY_SIZE: i32 = 20;

/// Guest name length bounds.
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;

/// Contact email maximum length.
pub const MAX_EMAIL_LENGTH: usize = 120;

/// Phone number length bounds.
pub const MIN_PHONE_LENGTH: usize = 10;
pub const MAX_PHONE_LENGTH: usize = 20;

/// Maximum length for the free-text special requests field.
pub const MAX_SPECIAL_REQUESTS_LENGTH: usize = 500;

/// Reservation awaiting staff action.
pub const STATUS_PENDING: &str = "pending";

/// Reservation confirmed by staff.
pub const STATUS_CONFIRMED: &str = "confirmed";

/// Reservation cancelled.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid reservation status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_CONFIRMED, STATUS_CANCELLED];

/// Allowed status transitions, keyed by current status.
///
/// The current policy permits every target from every state, including
/// re-writing the same status and reviving a cancelled reservation.
/// Tightening the policy is a data change here, not a code change.
pub const ALLOWED_TRANSITIONS: &[(&str, &[&str])] = &[
    (STATUS_PENDING, VALID_STATUSES),
    (STATUS_CONFIRMED, VALID_STATUSES),
    (STATUS_CANCELLED, VALID_STATUSES),
];

/* --------------------------------------------------------------------------
Status policy
-------------------------------------------------------------------------- */

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid reservation status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Check whether the transition table permits `from` -> `to`.
pub fn can_transition(from: &str, to: &str) -> bool {
    ALLOWED_TRANSITIONS
        .iter()
        .find(|(state, _)| *state == from)
        .is_some_and(|(_, targets)| targets.contains(&to))
}

/// Whether a status write should send the guest a confirmation email.
///
/// Only an actual entry into `confirmed` notifies; re-confirming an
/// already-confirmed reservation stays silent.
pub fn sends_confirmation(from: &str, to: &str) -> bool {
    to == STATUS_CONFIRMED && from != STATUS_CONFIRMED
}

/* --------------------------------------------------------------------------
Slot parsing
-------------------------------------------------------------------------- */

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_slot_date(date: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("Invalid date '{date}'. Expected YYYY-MM-DD")))
}

/// Parse a wall-clock time in `HH:MM` (or `HH:MM:SS`) 24-hour form.
pub fn parse_slot_time(time: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| CoreError::Validation(format!("Invalid time '{time}'. Expected HH:MM")))
}

/* --------------------------------------------------------------------------
Availability
-------------------------------------------------------------------------- */

/// Result of a slot availability check.
#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    pub available: bool,
    pub occupancy_count: i64,
    pub capacity: i64,
}

impl SlotAvailability {
    /// Derive availability from the current occupancy count of a slot.
    pub fn from_count(occupancy_count: i64) -> Self {
        Self {
            available: occupancy_count < SLOT_CAPACITY,
            occupancy_count,
            capacity: SLOT_CAPACITY,
        }
    }

    /// Human-readable availability message for API responses.
    pub fn message(&self) -> &'static str {
        if self.available {
            "Time slot available"
        } else {
            "This time slot is fully booked. Please choose another time."
        }
    }
}

/// Reject dates strictly before `today`.
///
/// Date-only: the availability check does not inspect the time of day,
/// so a same-day slot earlier than the current time still passes here.
/// The submission path applies the stricter check below.
pub fn validate_request_date(date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if date < today {
        return Err(CoreError::Validation(
            "Cannot book reservations in the past".to_string(),
        ));
    }
    Ok(())
}

/// Reject slots in the past relative to `now`, including a past time on
/// the current day. Used by the submission path.
pub fn validate_request_datetime(
    date: NaiveDate,
    time: NaiveTime,
    now: NaiveDateTime,
) -> Result<(), CoreError> {
    validate_request_date(date, now.date())?;
    if date == now.date() && time < now.time() {
        return Err(CoreError::Validation(
            "Please select a future time".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Guest field validation
-------------------------------------------------------------------------- */

/// Validate the guest's display name.
pub fn validate_guest_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Name must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the guest's contact email address.
pub fn validate_guest_email(email: &str) -> Result<(), CoreError> {
    if email.len() > MAX_EMAIL_LENGTH || !email.validate_email() {
        return Err(CoreError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    Ok(())
}

/// Validate the guest's phone number.
pub fn validate_guest_phone(phone: &str) -> Result<(), CoreError> {
    let len = phone.trim().chars().count();
    if !(MIN_PHONE_LENGTH..=MAX_PHONE_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Phone number must be between {MIN_PHONE_LENGTH} and {MAX_PHONE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the requested party size.
pub fn validate_party_size(party_size: i32) -> Result<(), CoreError> {
    if !(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&party_size) {
        return Err(CoreError::Validation(format!(
            "Party size must be between {MIN_PARTY_SIZE} and {MAX_PARTY_SIZE} guests"
        )));
    }
    Ok(())
}

/// Validate the optional special requests text.
pub fn validate_special_requests(special_requests: &Option<String>) -> Result<(), CoreError> {
    if let Some(text) = special_requests {
        if text.chars().count() > MAX_SPECIAL_REQUESTS_LENGTH {
            return Err(CoreError::Validation(format!(
                "Special requests must not exceed {MAX_SPECIAL_REQUESTS_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn valid_statuses_accepted() {
        assert!(validate_status(STATUS_PENDING).is_ok());
        assert!(validate_status(STATUS_CONFIRMED).is_ok());
        assert!(validate_status(STATUS_CANCELLED).is_ok());
    }

    #[test]
    fn invalid_status_rejected() {
        let result = validate_status("waitlisted");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid reservation status"));
    }

    #[test]
    fn every_transition_is_currently_allowed() {
        for (from, _) in ALLOWED_TRANSITIONS {
            for to in VALID_STATUSES {
                assert!(can_transition(from, to), "{from} -> {to} should be allowed");
            }
        }
    }

    #[test]
    fn unknown_state_cannot_transition() {
        assert!(!can_transition("waitlisted", STATUS_CONFIRMED));
    }

    #[test]
    fn confirmation_sent_only_on_entry_into_confirmed() {
        assert!(sends_confirmation(STATUS_PENDING, STATUS_CONFIRMED));
        assert!(sends_confirmation(STATUS_CANCELLED, STATUS_CONFIRMED));
        assert!(!sends_confirmation(STATUS_CONFIRMED, STATUS_CONFIRMED));
        assert!(!sends_confirmation(STATUS_PENDING, STATUS_CANCELLED));
        assert!(!sends_confirmation(STATUS_CONFIRMED, STATUS_PENDING));
    }

    #[test]
    fn slot_date_parses_iso_form() {
        assert_eq!(parse_slot_date("2025-06-01").unwrap(), date("2025-06-01"));
        assert!(parse_slot_date("01/06/2025").is_err());
        assert!(parse_slot_date("2025-13-40").is_err());
    }

    #[test]
    fn slot_time_parses_with_and_without_seconds() {
        assert_eq!(parse_slot_time("19:00").unwrap(), time("19:00"));
        assert_eq!(parse_slot_time("19:00:00").unwrap(), time("19:00"));
        assert!(parse_slot_time("7pm").is_err());
        assert!(parse_slot_time("25:00").is_err());
    }

    #[test]
    fn availability_boundary_at_capacity() {
        assert!(SlotAvailability::from_count(0).available);
        assert!(SlotAvailability::from_count(4).available);
        assert!(!SlotAvailability::from_count(5).available);
        assert!(!SlotAvailability::from_count(6).available);
    }

    #[test]
    fn availability_reports_count_and_capacity() {
        let availability = SlotAvailability::from_count(4);
        assert_eq!(availability.occupancy_count, 4);
        assert_eq!(availability.capacity, SLOT_CAPACITY);
        assert_eq!(availability.message(), "Time slot available");

        let full = SlotAvailability::from_count(5);
        assert!(full.message().contains("fully booked"));
    }

    #[test]
    fn past_date_rejected_date_only() {
        let today = date("2025-06-01");
        assert!(validate_request_date(date("2025-05-31"), today).is_err());
        assert!(validate_request_date(today, today).is_ok());
        assert!(validate_request_date(date("2025-06-02"), today).is_ok());
    }

    #[test]
    fn same_day_past_time_rejected_on_submission() {
        let now = date("2025-06-01").and_time(time("18:00"));
        assert!(validate_request_datetime(date("2025-06-01"), time("17:00"), now).is_err());
        assert!(validate_request_datetime(date("2025-06-01"), time("19:00"), now).is_ok());
        // A future date never checks the time of day.
        assert!(validate_request_datetime(date("2025-06-02"), time("08:00"), now).is_ok());
    }

    #[test]
    fn party_size_bounds() {
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(20).is_ok());
        assert!(validate_party_size(21).is_err());
    }

    #[test]
    fn guest_name_bounds() {
        assert!(validate_guest_name("J").is_err());
        assert!(validate_guest_name("Jo").is_ok());
        assert!(validate_guest_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn guest_email_syntax() {
        assert!(validate_guest_email("guest@example.com").is_ok());
        assert!(validate_guest_email("not-an-email").is_err());
        assert!(validate_guest_email("").is_err());
    }

    #[test]
    fn guest_phone_bounds() {
        assert!(validate_guest_phone("555-123").is_err());
        assert!(validate_guest_phone("+1 555 123 4567").is_ok());
        assert!(validate_guest_phone(&"9".repeat(21)).is_err());
    }

    #[test]
    fn special_requests_optional_and_bounded() {
        assert!(validate_special_requests(&None).is_ok());
        assert!(validate_special_requests(&Some("window seat".to_string())).is_ok());
        assert!(validate_special_requests(&Some("x".repeat(501))).is_err());
    }
}
