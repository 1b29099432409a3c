use async_trait::async_trait;
use chrono::NaiveDate;
use salonbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        hours::WeeklyHours,
        reservation::{NewReservation, Reservation},
        salon::Salon,
    },
    repository::{HoursRepository, ReservationRepository, SalonRepository},
    slots::ReservedInterval,
};
use uuid::Uuid;

use crate::{DbPool, repositories};

/// PostgreSQL-backed implementation of the core repository traits.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalonRepository for PgStore {
    async fn salon_by_slug(&self, slug: &str) -> BookingResult<Option<Salon>> {
        let salon = repositories::salon::get_salon_by_slug(&self.pool, slug).await?;
        Ok(salon.map(Salon::from))
    }
}

#[async_trait]
impl HoursRepository for PgStore {
    async fn weekly_hours(&self, salon_id: Uuid) -> BookingResult<Vec<WeeklyHours>> {
        repositories::business_hours::get_hours_by_salon_id(&self.pool, salon_id)
            .await?
            .into_iter()
            .map(WeeklyHours::try_from)
            .collect()
    }

    async fn replace_weekly_hours(
        &self,
        salon_id: Uuid,
        hours: &[WeeklyHours],
    ) -> BookingResult<Vec<WeeklyHours>> {
        repositories::business_hours::replace_hours(&self.pool, salon_id, hours)
            .await?
            .into_iter()
            .map(WeeklyHours::try_from)
            .collect()
    }
}

#[async_trait]
impl ReservationRepository for PgStore {
    async fn reserved_intervals(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<ReservedInterval>> {
        repositories::reservation::get_reserved_intervals(&self.pool, salon_id, date).await
    }

    async fn reservations_on(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> BookingResult<Vec<Reservation>> {
        repositories::reservation::get_reservations_by_date(&self.pool, salon_id, date)
            .await?
            .into_iter()
            .map(Reservation::try_from)
            .collect()
    }

    async fn create_reservation(&self, reservation: &NewReservation) -> BookingResult<Reservation> {
        let row = repositories::reservation::create_reservation(&self.pool, reservation).await?;
        Reservation::try_from(row)
    }

    async fn cancel_reservation(&self, salon_id: Uuid, id: Uuid) -> BookingResult<Reservation> {
        let row = repositories::reservation::cancel_reservation(&self.pool, salon_id, id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {} not found", id)))?;
        Reservation::try_from(row)
    }
}
