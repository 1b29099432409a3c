use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use salonbook_core::{
    errors::BookingError,
    models::{
        hours::WeeklyHours,
        reservation::{Reservation, ReservationStatus},
        salon::Salon,
    },
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSalon {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusinessHours {
    pub salon_id: Uuid,
    pub weekday: i16,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub reservation_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbSalon> for Salon {
    fn from(row: DbSalon) -> Self {
        Salon {
            id: row.id,
            slug: row.slug,
            name: row.name,
            timezone: row.timezone,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbBusinessHours> for WeeklyHours {
    type Error = BookingError;

    fn try_from(row: DbBusinessHours) -> Result<Self, Self::Error> {
        let weekday = u8::try_from(row.weekday)
            .ok()
            .filter(|d| *d <= 6)
            .ok_or_else(|| {
                BookingError::Configuration(format!(
                    "salon {} has a stored rule for weekday {}",
                    row.salon_id, row.weekday
                ))
            })?;

        Ok(WeeklyHours {
            weekday,
            open_time: row.open_time,
            close_time: row.close_time,
            is_closed: row.is_closed,
        })
    }
}

impl TryFrom<DbReservation> for Reservation {
    type Error = BookingError;

    fn try_from(row: DbReservation) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ReservationStatus>()
            .map_err(|e| BookingError::Database(eyre::eyre!("reservation {}: {}", row.id, e)))?;
        let duration_minutes = u32::try_from(row.duration_minutes).map_err(|_| {
            BookingError::Database(eyre::eyre!(
                "reservation {} has negative duration {}",
                row.id,
                row.duration_minutes
            ))
        })?;

        Ok(Reservation {
            id: row.id,
            salon_id: row.salon_id,
            date: row.reservation_date,
            start_time: row.start_time,
            duration_minutes,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            status,
            created_at: row.created_at,
        })
    }
}
