//! Reservation availability & lifecycle engine.
//!
//! Owns the booking workflow end to end: the advisory availability
//! check, the validated-and-capacity-guarded submission, and the
//! admin-driven status transitions with their notification side effect.
//! The engine receives its collaborators (connection pool, notifier)
//! explicitly at construction; nothing here touches global state.
//!
//! Notification rules:
//! - every accepted submission sends the guest an acknowledgment email
//! - a status write that actually *enters* `confirmed` sends exactly one
//!   confirmation email; re-confirming or any other transition sends none
//!
//! Both sends are best-effort: a failed send is logged by the notifier
//! and never surfaces to the caller.

use std::sync::Arc;

use chrono::Local;
use serde::Deserialize;

use tavola_core::booking::{
    self, parse_slot_date, parse_slot_time, SlotAvailability,
};
use tavola_core::error::CoreError;
use tavola_core::types::DbId;
use tavola_db::models::reservation::{CreateReservation, Reservation};
use tavola_db::repositories::reservation_repo::SlotInsert;
use tavola_db::repositories::ReservationRepo;
use tavola_db::DbPool;
use tavola_notify::Notifier;

use crate::error::{AppError, AppResult};

/// Public reservation submission payload.
///
/// Date and time arrive in their wire forms (`YYYY-MM-DD`, `HH:MM`) and
/// are parsed and validated by the engine.
#[derive(Debug, Deserialize)]
pub struct SubmitReservation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub party_size: i32,
    pub special_requests: Option<String>,
}

/// Reservation availability & lifecycle engine.
pub struct ReservationEngine {
    pool: DbPool,
    notifier: Arc<dyn Notifier>,
}

impl ReservationEngine {
    /// Create an engine over the given pool and notifier.
    pub fn new(pool: DbPool, notifier: Arc<dyn Notifier>) -> Self {
        Self { pool, notifier }
    }

    /// Advisory availability check for a requested slot.
    ///
    /// Date-only past check: a same-day slot earlier than the current
    /// time still reports availability here; the submission path applies
    /// the stricter check. Read-only -- a later submission may still find
    /// the slot full.
    pub async fn check_availability(&self, date: &str, time: &str) -> AppResult<SlotAvailability> {
        let date = parse_slot_date(date)?;
        let time = parse_slot_time(time)?;

        booking::validate_request_date(date, Local::now().date_naive())?;

        let occupancy_count = ReservationRepo::count_for_slot(&self.pool, date, time).await?;
        Ok(SlotAvailability::from_count(occupancy_count))
    }

    /// Validate and persist a new reservation in `pending` state.
    ///
    /// The capacity count and insert run atomically per slot (advisory
    /// lock inside the repository), so a full slot is refused even under
    /// concurrent submissions. An accepted submission sends the guest an
    /// acknowledgment email.
    pub async fn submit(&self, input: SubmitReservation) -> AppResult<Reservation> {
        booking::validate_guest_name(&input.name)?;
        booking::validate_guest_email(&input.email)?;
        booking::validate_guest_phone(&input.phone)?;
        booking::validate_party_size(input.party_size)?;
        booking::validate_special_requests(&input.special_requests)?;

        let date = parse_slot_date(&input.date)?;
        let time = parse_slot_time(&input.time)?;
        booking::validate_request_datetime(date, time, Local::now().naive_local())?;

        let create = CreateReservation {
            name: input.name,
            email: input.email,
            phone: input.phone,
            date,
            time,
            party_size: input.party_size,
            special_requests: input.special_requests,
        };

        let reservation = match ReservationRepo::create_if_available(&self.pool, &create).await? {
            SlotInsert::Created(reservation) => reservation,
            SlotInsert::SlotFull { occupancy_count } => {
                tracing::info!(
                    date = %create.date,
                    time = %create.time,
                    occupancy_count,
                    "Reservation refused: slot at capacity"
                );
                return Err(AppError::Core(CoreError::Conflict(
                    SlotAvailability::from_count(occupancy_count)
                        .message()
                        .to_string(),
                )));
            }
        };

        tracing::info!(
            reservation_id = reservation.id,
            date = %reservation.date,
            time = %reservation.time,
            party_size = reservation.party_size,
            "Reservation submitted"
        );

        self.notifier.send_reservation_confirmation(&reservation).await;

        Ok(reservation)
    }

    /// Write a new status for an existing reservation.
    ///
    /// Fails with a not-found error for unknown ids and a conflict when
    /// the transition table forbids the move. Entering `confirmed` from
    /// any other status triggers exactly one confirmation email.
    pub async fn set_status(&self, id: DbId, status: &str) -> AppResult<Reservation> {
        booking::validate_status(status)?;

        let current = ReservationRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Reservation",
                id,
            })?;

        if !booking::can_transition(&current.status, status) {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Cannot change reservation status from '{}' to '{status}'",
                current.status
            ))));
        }

        let (old_status, reservation) = ReservationRepo::update_status(&self.pool, id, status)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Reservation",
                id,
            })?;

        tracing::info!(
            reservation_id = id,
            from = %old_status,
            to = %status,
            "Reservation status updated"
        );

        if booking::sends_confirmation(&old_status, status) {
            self.notifier.send_reservation_confirmation(&reservation).await;
        }

        Ok(reservation)
    }

    /// Hard-delete a reservation.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let deleted = ReservationRepo::delete(&self.pool, id).await?;
        if !deleted {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Reservation",
                id,
            }));
        }
        tracing::info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }
}
