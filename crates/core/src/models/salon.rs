use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    /// IANA zone name, e.g. `Europe/Istanbul`.
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

impl Salon {
    pub fn tz(&self) -> BookingResult<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            BookingError::Configuration(format!(
                "salon {} has an unknown timezone {:?}",
                self.slug, self.timezone
            ))
        })
    }

    /// Converts an instant into the salon's local civil date and time.
    pub fn local_now(&self, now: DateTime<Utc>) -> BookingResult<NaiveDateTime> {
        Ok(now.with_timezone(&self.tz()?).naive_local())
    }
}
