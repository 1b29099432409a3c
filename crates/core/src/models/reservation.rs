use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::models::time::hhmm;
use crate::slots::ReservedInterval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }

    pub fn interval(&self) -> ReservedInterval {
        ReservedInterval::new(self.start_time, self.duration_minutes)
    }
}

/// A validated booking about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub customer_name: String,
    pub customer_phone: Option<String>,
}

impl NewReservation {
    pub fn interval(&self) -> ReservedInterval {
        ReservedInterval::new(self.start_time, self.duration_minutes)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: Option<u32>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub customer_name: String,
    pub status: ReservationStatus,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            date: reservation.date,
            start_time: reservation.start_time,
            duration_minutes: reservation.duration_minutes,
            customer_name: reservation.customer_name,
            status: reservation.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReservationsResponse {
    pub date: NaiveDate,
    pub reservations: Vec<ReservationResponse>,
}
