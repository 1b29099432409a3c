//! Wall-clock helpers for the `HH:MM` strings stored in settings and shown on
//! the booking page.

use chrono::{NaiveTime, Timelike};

use crate::errors::InvalidTime;

/// Parses a strict, zero-padded `HH:MM` string.
///
/// `"9:00"`, `"09:00:00"` and `"24:00"` are all rejected.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, InvalidTime> {
    let invalid = || InvalidTime(value.to_string());

    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 2 || b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let hour: u32 = value[..2].parse().map_err(|_| invalid())?;
    let minute: u32 = value[3..].parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Minutes elapsed since midnight, seconds discarded.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of [`minutes_since_midnight`]; `None` at or past 24:00.
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Serde adapter storing a [`NaiveTime`] as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(D::Error::custom)
    }
}
