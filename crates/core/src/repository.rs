//! Storage seams used by the HTTP layer.
//!
//! `HoursRepository::weekly_hours` and `ReservationRepository::reserved_intervals`
//! are the read-only inputs to the slot calculator. Implementations live in the
//! database crate; tests substitute mocks.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::{
    hours::WeeklyHours,
    reservation::{NewReservation, Reservation},
    salon::Salon,
};
use crate::slots::ReservedInterval;

#[async_trait]
pub trait SalonRepository: Send + Sync {
    async fn salon_by_slug(&self, slug: &str) -> BookingResult<Option<Salon>>;
}

#[async_trait]
pub trait HoursRepository: Send + Sync {
    async fn weekly_hours(&self, salon_id: Uuid) -> BookingResult<Vec<WeeklyHours>>;

    /// Replaces every rule of the salon in one write. Callers validate first.
    async fn replace_weekly_hours(
        &self,
        salon_id: Uuid,
        hours: &[WeeklyHours],
    ) -> BookingResult<Vec<WeeklyHours>>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Occupied ranges of non-cancelled reservations on `date`.
    async fn reserved_intervals(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<ReservedInterval>>;

    async fn reservations_on(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Reservation>>;

    /// Inserts a reservation unless it overlaps an active one.
    ///
    /// Must fail with `BookingError::SlotConflict` when another booking holds any
    /// part of the interval, including one committed concurrently.
    async fn create_reservation(&self, reservation: &NewReservation) -> BookingResult<Reservation>;

    async fn cancel_reservation(&self, salon_id: Uuid, id: Uuid) -> BookingResult<Reservation>;
}
