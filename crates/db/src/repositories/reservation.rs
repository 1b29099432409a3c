use crate::models::DbReservation;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use salonbook_core::{
    errors::{BookingError, BookingResult},
    models::reservation::{NewReservation, ReservationStatus},
    slots::ReservedInterval,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// SQLSTATE raised by PostgreSQL for a unique index violation.
const UNIQUE_VIOLATION: &str = "23505";

impl DbReservation {
    /// Occupied range of the row; a negative stored duration is a database error.
    pub fn interval(&self) -> BookingResult<ReservedInterval> {
        let duration_minutes = u32::try_from(self.duration_minutes).map_err(|_| {
            BookingError::Database(eyre::eyre!(
                "reservation {} has negative duration {}",
                self.id,
                self.duration_minutes
            ))
        })?;
        Ok(ReservedInterval::new(self.start_time, duration_minutes))
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

fn database(err: sqlx::Error) -> BookingError {
    BookingError::Database(err.into())
}

/// Writes a reservation if no active booking overlaps it.
///
/// The salon row is locked for the duration of the transaction, so two
/// concurrent bookings for the same salon run the overlap check one after the
/// other. The partial unique index on `(salon_id, reservation_date, start_time)`
/// rejects identical start times even if the lock were bypassed.
pub async fn create_reservation(
    pool: &Pool<Postgres>,
    reservation: &NewReservation,
) -> BookingResult<DbReservation> {
    let mut tx = pool.begin().await.map_err(database)?;

    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM salons
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(reservation.salon_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(database)?;

    if locked.is_none() {
        return Err(BookingError::NotFound(format!(
            "Salon with ID {} not found",
            reservation.salon_id
        )));
    }

    let active = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, salon_id, reservation_date, start_time, duration_minutes,
               customer_name, customer_phone, status, created_at
        FROM reservations
        WHERE salon_id = $1 AND reservation_date = $2 AND status <> 'cancelled'
        "#,
    )
    .bind(reservation.salon_id)
    .bind(reservation.date)
    .fetch_all(&mut *tx)
    .await
    .map_err(database)?;

    let requested = reservation.interval();
    let occupied = active
        .iter()
        .map(DbReservation::interval)
        .collect::<BookingResult<Vec<_>>>()?;
    if let Some((clash, _)) = active
        .iter()
        .zip(&occupied)
        .find(|(_, interval)| interval.overlaps_interval(&requested))
    {
        tracing::warn!(
            "Rejected overlapping booking: salon_id={}, date={}, start={}, existing={}",
            reservation.salon_id,
            reservation.date,
            reservation.start_time,
            clash.id
        );
        return Err(BookingError::SlotConflict(format!(
            "{} on {} is no longer available",
            reservation.start_time.format("%H:%M"),
            reservation.date
        )));
    }

    let row = sqlx::query_as::<_, DbReservation>(
        r#"
        INSERT INTO reservations (id, salon_id, reservation_date, start_time, duration_minutes,
                                  customer_name, customer_phone, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, salon_id, reservation_date, start_time, duration_minutes,
                  customer_name, customer_phone, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(reservation.salon_id)
    .bind(reservation.date)
    .bind(reservation.start_time)
    .bind(reservation.duration_minutes as i32)
    .bind(&reservation.customer_name)
    .bind(reservation.customer_phone.as_deref())
    .bind(ReservationStatus::Confirmed.as_str())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            BookingError::SlotConflict(format!(
                "{} on {} was booked concurrently",
                reservation.start_time.format("%H:%M"),
                reservation.date
            ))
        } else {
            database(err)
        }
    })?;

    tx.commit().await.map_err(database)?;

    tracing::info!(
        "Reservation created: id={}, salon_id={}, date={}, start={}",
        row.id,
        row.salon_id,
        row.reservation_date,
        row.start_time
    );
    Ok(row)
}

pub async fn get_reservations_by_date(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbReservation>> {
    let reservations = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, salon_id, reservation_date, start_time, duration_minutes,
               customer_name, customer_phone, status, created_at
        FROM reservations
        WHERE salon_id = $1 AND reservation_date = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(salon_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(reservations)
}

pub async fn get_reserved_intervals(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    date: NaiveDate,
) -> BookingResult<Vec<ReservedInterval>> {
    let rows = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, salon_id, reservation_date, start_time, duration_minutes,
               customer_name, customer_phone, status, created_at
        FROM reservations
        WHERE salon_id = $1 AND reservation_date = $2 AND status <> 'cancelled'
        ORDER BY start_time ASC
        "#,
    )
    .bind(salon_id)
    .bind(date)
    .fetch_all(pool)
    .await
    .map_err(database)?;

    rows.iter().map(DbReservation::interval).collect()
}

pub async fn cancel_reservation(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    id: Uuid,
) -> Result<Option<DbReservation>> {
    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        UPDATE reservations
        SET status = $3
        WHERE id = $1 AND salon_id = $2
        RETURNING id, salon_id, reservation_date, start_time, duration_minutes,
                  customer_name, customer_phone, status, created_at
        "#,
    )
    .bind(id)
    .bind(salon_id)
    .bind(ReservationStatus::Cancelled.as_str())
    .fetch_optional(pool)
    .await?;

    if reservation.is_some() {
        tracing::info!("Reservation cancelled: id={}, salon_id={}", id, salon_id);
    }

    Ok(reservation)
}
