use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use salonbook_core::{
    errors::BookingResult,
    models::{
        hours::WeeklyHours,
        reservation::{NewReservation, Reservation},
        salon::Salon,
    },
    repository::{HoursRepository, ReservationRepository, SalonRepository},
    slots::ReservedInterval,
};
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub SalonRepo {}

    #[async_trait]
    impl SalonRepository for SalonRepo {
        async fn salon_by_slug(&self, slug: &str) -> BookingResult<Option<Salon>>;
    }
}

mock! {
    pub HoursRepo {}

    #[async_trait]
    impl HoursRepository for HoursRepo {
        async fn weekly_hours(&self, salon_id: Uuid) -> BookingResult<Vec<WeeklyHours>>;

        async fn replace_weekly_hours(
            &self,
            salon_id: Uuid,
            hours: &[WeeklyHours],
        ) -> BookingResult<Vec<WeeklyHours>>;
    }
}

mock! {
    pub ReservationRepo {}

    #[async_trait]
    impl ReservationRepository for ReservationRepo {
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

        async fn create_reservation(
            &self,
            reservation: &NewReservation,
        ) -> BookingResult<Reservation>;

        async fn cancel_reservation(
            &self,
            salon_id: Uuid,
            id: Uuid,
        ) -> BookingResult<Reservation>;
    }
}
