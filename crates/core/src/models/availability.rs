use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Start times offered for one salon, date and service length, as `"HH:MM"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    pub slots: Vec<String>,
}
