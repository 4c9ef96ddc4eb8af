//! Repository for the `reservations` table.
//!
//! The submission path uses [`ReservationRepo::create_if_available`],
//! which serializes competing inserts for the same (date, time) slot
//! with a transaction-scoped advisory lock so the capacity count and
//! the insert are atomic with respect to other submissions. Cancelled
//! reservations never count against slot capacity.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use tavola_core::booking::{SLOT_CAPACITY, STATUS_CONFIRMED, STATUS_PENDING};
use tavola_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use tavola_core::types::DbId;

use crate::models::reservation::{CreateReservation, Reservation};

/// Column list for reservations queries.
const COLUMNS: &str = "id, name, email, phone, date, time, party_size, \
    special_requests, status, created_at, updated_at";

/// Outcome of an atomic reserve-if-available insert.
#[derive(Debug)]
pub enum SlotInsert {
    /// The reservation was created; the slot had room.
    Created(Reservation),
    /// The slot was already at capacity; nothing was inserted.
    SlotFull { occupancy_count: i64 },
}

/// Provides CRUD and slot-occupancy operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Count non-cancelled reservations occupying the given slot.
    pub async fn count_for_slot(
        pool: &PgPool,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations
             WHERE date = $1 AND time = $2 AND status IN ($3, $4)",
        )
        .bind(date)
        .bind(time)
        .bind(STATUS_PENDING)
        .bind(STATUS_CONFIRMED)
        .fetch_one(pool)
        .await
    }

    /// Atomically create a reservation if its slot is below capacity.
    ///
    /// Takes `pg_advisory_xact_lock` keyed on the slot before counting,
    /// so two concurrent submissions for the same slot cannot both pass
    /// the capacity check. The lock releases at commit/rollback.
    pub async fn create_if_available(
        pool: &PgPool,
        input: &CreateReservation,
    ) -> Result<SlotInsert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1 || ' ' || $2))")
            .bind(input.date.to_string())
            .bind(input.time.to_string())
            .execute(&mut *tx)
            .await?;

        let occupancy_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations
             WHERE date = $1 AND time = $2 AND status IN ($3, $4)",
        )
        .bind(input.date)
        .bind(input.time)
        .bind(STATUS_PENDING)
        .bind(STATUS_CONFIRMED)
        .fetch_one(&mut *tx)
        .await?;

        if occupancy_count >= SLOT_CAPACITY {
            tracing::debug!(
                date = %input.date,
                time = %input.time,
                occupancy_count,
                "Slot at capacity; insert skipped"
            );
            tx.rollback().await?;
            return Ok(SlotInsert::SlotFull { occupancy_count });
        }

        let query = format!(
            "INSERT INTO reservations
                (name, email, phone, date, time, party_size, special_requests, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date)
            .bind(input.time)
            .bind(input.party_size)
            .bind(&input.special_requests)
            .bind(STATUS_PENDING)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SlotInsert::Created(reservation))
    }

    /// Find a reservation by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reservations for the admin back-office, newest slots first,
    /// optionally filtered by status and/or date.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        date: Option<NaiveDate>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::date IS NULL OR date = $2)
             ORDER BY date DESC, time DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(status)
            .bind(date)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Most recently submitted reservations, for the dashboard.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Confirmed reservations from `from_date` onward, soonest first.
    pub async fn list_upcoming_confirmed(
        pool: &PgPool,
        from_date: NaiveDate,
        limit: i64,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE date >= $1 AND status = $2
             ORDER BY date, time
             LIMIT $3"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(from_date)
            .bind(STATUS_CONFIRMED)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Write a new status, refreshing `updated_at`. Returns the previous
    /// status alongside the updated row so the caller can decide whether
    /// the write was an actual transition.
    ///
    /// Runs in a transaction: the row is locked while the old status is
    /// read so a concurrent write cannot slip between read and update.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<(String, Reservation)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let old_status: Option<String> =
            sqlx::query_scalar("SELECT status FROM reservations WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(old_status) = old_status else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "UPDATE reservations SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((old_status, reservation)))
    }

    /// Delete a reservation by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of reservations.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(pool)
            .await
    }

    /// Number of reservations with the given status.
    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
