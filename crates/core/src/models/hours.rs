use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{BookingError, BookingResult};
use crate::models::time::{hhmm, parse_hhmm};

/// A salon's recurring open/close configuration for one day of the week.
///
/// `weekday` counts from Sunday (0) to Saturday (6). When `is_closed` is set the
/// open and close times are kept for the settings form but ignored everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub weekday: u8,
    #[serde(with = "hhmm")]
    pub open_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

impl WeeklyHours {
    pub fn open(weekday: Weekday, open_time: NaiveTime, close_time: NaiveTime) -> Self {
        Self {
            weekday: weekday_index(weekday),
            open_time,
            close_time,
            is_closed: false,
        }
    }

    pub fn closed(weekday: Weekday) -> Self {
        Self {
            weekday: weekday_index(weekday),
            open_time: NaiveTime::MIN,
            close_time: NaiveTime::MIN,
            is_closed: true,
        }
    }

    pub fn applies_to(&self, weekday: Weekday) -> bool {
        self.weekday == weekday_index(weekday)
    }
}

/// Sunday-based weekday index, the convention stored with every rule.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Raw settings payload as submitted by the salon owner.
///
/// Times stay strings here so malformed values surface as configuration errors
/// instead of generic body-parsing failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHoursInput {
    pub weekday: u8,
    pub open_time: String,
    pub close_time: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl WeeklyHoursInput {
    pub fn into_rule(self) -> BookingResult<WeeklyHours> {
        let parse = |raw: &str, field: &str| {
            parse_hhmm(raw).map_err(|e| {
                BookingError::Configuration(format!(
                    "weekday {}: {} is not valid ({})",
                    self.weekday, field, e
                ))
            })
        };

        Ok(WeeklyHours {
            weekday: self.weekday,
            open_time: parse(&self.open_time, "open_time")?,
            close_time: parse(&self.close_time, "close_time")?,
            is_closed: self.is_closed,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHoursRequest {
    pub hours: Vec<WeeklyHoursInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursResponse {
    pub salon_id: uuid::Uuid,
    pub hours: Vec<WeeklyHours>,
}

/// Rejects rule sets that cannot be stored for a salon.
///
/// Checked at the settings-write boundary: weekdays must be 0..=6, each weekday
/// may appear once, and an open day must close after it opens.
pub fn validate_weekly_hours(rules: &[WeeklyHours]) -> BookingResult<()> {
    let mut seen = HashSet::new();

    for rule in rules {
        if rule.weekday > 6 {
            return Err(BookingError::Configuration(format!(
                "weekday {} is out of range, expected 0 (Sunday) to 6 (Saturday)",
                rule.weekday
            )));
        }

        if !seen.insert(rule.weekday) {
            return Err(BookingError::Configuration(format!(
                "weekday {} has more than one rule",
                rule.weekday
            )));
        }

        if !rule.is_closed && rule.close_time <= rule.open_time {
            return Err(BookingError::Configuration(format!(
                "weekday {} closes at {} before opening at {}",
                rule.weekday,
                rule.close_time.format("%H:%M"),
                rule.open_time.format("%H:%M"),
            )));
        }
    }

    Ok(())
}
