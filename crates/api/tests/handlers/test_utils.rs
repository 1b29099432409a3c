use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use salonbook_api::ApiState;
use salonbook_core::{
    clock::FixedClock,
    models::{
        hours::WeeklyHours,
        reservation::{NewReservation, Reservation, ReservationStatus},
        salon::Salon,
    },
};
use salonbook_db::mock::repositories::{MockHoursRepo, MockReservationRepo, MockSalonRepo};
use uuid::Uuid;

pub const SLUG: &str = "studio-ayse";

pub struct TestContext {
    pub salon: Salon,
    pub salon_repo: MockSalonRepo,
    pub hours_repo: MockHoursRepo,
    pub reservation_repo: MockReservationRepo,
    pub now: DateTime<Utc>,
    pub default_service_minutes: u32,
}

impl TestContext {
    /// A UTC salon known under [`SLUG`], with the clock on Sunday 2026-10-18 at noon.
    pub fn new() -> Self {
        Self::with_timezone("UTC")
    }

    pub fn with_timezone(timezone: &str) -> Self {
        let salon = Salon {
            id: Uuid::new_v4(),
            slug: SLUG.to_string(),
            name: "Studio Ayşe".to_string(),
            timezone: timezone.to_string(),
            created_at: Utc::now(),
        };

        let mut salon_repo = MockSalonRepo::new();
        let known = salon.clone();
        salon_repo
            .expect_salon_by_slug()
            .returning(move |slug| Ok((slug == known.slug).then(|| known.clone())));

        Self {
            salon,
            salon_repo,
            hours_repo: MockHoursRepo::new(),
            reservation_repo: MockReservationRepo::new(),
            now: Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
            default_service_minutes: 15,
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Serves the given weekly hours for any number of reads.
    pub fn with_hours(mut self, hours: Vec<WeeklyHours>) -> Self {
        self.hours_repo
            .expect_weekly_hours()
            .returning(move |_| Ok(hours.clone()));
        self
    }

    // Build state with mock repositories
    pub fn build_state(self) -> Arc<ApiState> {
        Arc::new(ApiState {
            salons: Arc::new(self.salon_repo),
            hours: Arc::new(self.hours_repo),
            reservations: Arc::new(self.reservation_repo),
            clock: Arc::new(FixedClock(self.now)),
            default_service_minutes: self.default_service_minutes,
        })
    }
}

pub fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Monday 2026-10-19.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn monday_nine_to_five() -> Vec<WeeklyHours> {
    vec![
        WeeklyHours::closed(Weekday::Sun),
        WeeklyHours::open(Weekday::Mon, at(9, 0), at(17, 0)),
    ]
}

/// What the store would hand back after writing `new`.
pub fn stored(new: &NewReservation) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        salon_id: new.salon_id,
        date: new.date,
        start_time: new.start_time,
        duration_minutes: new.duration_minutes,
        customer_name: new.customer_name.clone(),
        customer_phone: new.customer_phone.clone(),
        status: ReservationStatus::Confirmed,
        created_at: Utc::now(),
    }
}
