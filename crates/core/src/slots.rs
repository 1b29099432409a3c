//! # Slot Calculator
//!
//! Computes the appointment start times a salon can offer on one calendar date.
//!
//! The day is walked on a fixed grid starting at opening time. A candidate `t`
//! survives when:
//!
//! 1. `t` is before closing and the requested service fits, `t + service <= close`
//! 2. on the current day, `t >= now + lead` (a floor, the boundary itself is offered)
//! 3. `[t, t + service)` does not overlap any reserved `[start, start + duration)`
//!
//! A missing rule and a closed rule both yield an empty day, as does a rule whose
//! closing time is not after its opening time. None of these are errors.
//!
//! Everything here is pure: the caller supplies the hours, the reservations and
//! the local "now".

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::hours::WeeklyHours;
use crate::models::time::{format_hhmm, hhmm, minutes_since_midnight, time_from_minutes};

/// Grid spacing between offered start times.
pub const SLOT_INTERVAL_MINUTES: u32 = 15;

/// Minimum notice for a booking made on the same day.
pub const MIN_LEAD_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Grid, lead time and service length for one availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    interval_minutes: u32,
    min_lead_minutes: u32,
    service_minutes: u32,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            interval_minutes: SLOT_INTERVAL_MINUTES,
            min_lead_minutes: MIN_LEAD_MINUTES,
            service_minutes: SLOT_INTERVAL_MINUTES,
        }
    }
}

impl SlotPolicy {
    pub fn new(
        interval_minutes: u32,
        min_lead_minutes: u32,
        service_minutes: u32,
    ) -> BookingResult<Self> {
        if interval_minutes == 0 || interval_minutes > MINUTES_PER_DAY {
            return Err(BookingError::Validation(format!(
                "slot interval must be between 1 and {MINUTES_PER_DAY} minutes, got {interval_minutes}"
            )));
        }
        if min_lead_minutes > MINUTES_PER_DAY {
            return Err(BookingError::Validation(format!(
                "lead time must be at most {MINUTES_PER_DAY} minutes, got {min_lead_minutes}"
            )));
        }
        if service_minutes == 0 || service_minutes > MINUTES_PER_DAY {
            return Err(BookingError::Validation(format!(
                "service duration must be between 1 and {MINUTES_PER_DAY} minutes, got {service_minutes}"
            )));
        }

        Ok(Self {
            interval_minutes,
            min_lead_minutes,
            service_minutes,
        })
    }

    /// Standard grid and lead time with a specific service length.
    pub fn for_service(service_minutes: u32) -> BookingResult<Self> {
        Self::new(SLOT_INTERVAL_MINUTES, MIN_LEAD_MINUTES, service_minutes)
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    pub fn min_lead_minutes(&self) -> u32 {
        self.min_lead_minutes
    }

    pub fn service_minutes(&self) -> u32 {
        self.service_minutes
    }
}

/// Time occupied by an existing, non-cancelled booking: `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedInterval {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

impl ReservedInterval {
    pub fn new(start: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }

    /// A booking occupying exactly one grid cell.
    pub fn single_slot(start: NaiveTime) -> Self {
        Self::new(start, SLOT_INTERVAL_MINUTES)
    }

    pub fn start_minute(&self) -> u32 {
        minutes_since_midnight(self.start)
    }

    pub fn end_minute(&self) -> u32 {
        self.start_minute() + self.duration_minutes
    }

    /// Half-open overlap with `[start, end)` in minutes since midnight.
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        self.start_minute() < end && start < self.end_minute()
    }

    pub fn overlaps_interval(&self, other: &ReservedInterval) -> bool {
        self.overlaps(other.start_minute(), other.end_minute())
    }
}

/// Finds the rule for a weekday, if the salon stated one.
pub fn rule_for(weekly_hours: &[WeeklyHours], weekday: Weekday) -> Option<&WeeklyHours> {
    weekly_hours.iter().find(|rule| rule.applies_to(weekday))
}

pub fn format_slot(slot: &NaiveTime) -> String {
    format_hhmm(*slot)
}

/// Open bounds of the bookable day in minutes since midnight.
#[derive(Debug, Clone, Copy)]
struct DayWindow {
    open: u32,
    close: u32,
    earliest: u32,
}

fn day_window(
    policy: &SlotPolicy,
    date: NaiveDate,
    weekly_hours: &[WeeklyHours],
    now: NaiveDateTime,
) -> Option<DayWindow> {
    let rule = rule_for(weekly_hours, date.weekday())?;
    if rule.is_closed {
        return None;
    }

    let open = minutes_since_midnight(rule.open_time);
    let close = minutes_since_midnight(rule.close_time);

    let earliest = if date == now.date() {
        minutes_since_midnight(now.time()).saturating_add(policy.min_lead_minutes)
    } else {
        0
    };

    Some(DayWindow {
        open,
        close,
        earliest,
    })
}

/// Grid slots for the day before reservations are considered.
fn candidate_minutes(
    policy: &SlotPolicy,
    date: NaiveDate,
    weekly_hours: &[WeeklyHours],
    now: NaiveDateTime,
) -> impl Iterator<Item = u32> + use<> {
    let service = policy.service_minutes;
    let step = policy.interval_minutes as usize;

    day_window(policy, date, weekly_hours, now)
        .into_iter()
        .flat_map(move |window| {
            (window.open..window.close)
                .step_by(step)
                .filter(move |&t| t >= window.earliest && t + service <= window.close)
        })
}

/// Lazily yields the free start times for `date`, ascending.
///
/// The iterator borrows `reserved` and can be recreated at will; identical
/// inputs always produce the same sequence.
pub fn available_slots<'a>(
    policy: &SlotPolicy,
    date: NaiveDate,
    weekly_hours: &[WeeklyHours],
    reserved: &'a [ReservedInterval],
    now: NaiveDateTime,
) -> impl Iterator<Item = NaiveTime> + use<'a> {
    let service = policy.service_minutes;

    candidate_minutes(policy, date, weekly_hours, now)
        .filter(move |&t| !reserved.iter().any(|r| r.overlaps(t, t + service)))
        .filter_map(time_from_minutes)
}

/// Free start times for `date` on the standard 15-minute grid with 30 minutes
/// of same-day notice, for a service one grid cell long.
pub fn compute_available_slots(
    date: NaiveDate,
    weekly_hours: &[WeeklyHours],
    reserved: &[ReservedInterval],
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    compute_available_slots_with(&SlotPolicy::default(), date, weekly_hours, reserved, now)
}

pub fn compute_available_slots_with(
    policy: &SlotPolicy,
    date: NaiveDate,
    weekly_hours: &[WeeklyHours],
    reserved: &[ReservedInterval],
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    available_slots(policy, date, weekly_hours, reserved, now).collect()
}

/// Confirms `start` is still offered before a reservation is written.
///
/// Returns `Validation` when `start` was never a slot for that day (closed,
/// outside hours, off the grid or inside the lead time) and `SlotConflict` when
/// it is a slot but an existing reservation now overlaps it.
pub fn check_bookable(
    policy: &SlotPolicy,
    date: NaiveDate,
    weekly_hours: &[WeeklyHours],
    reserved: &[ReservedInterval],
    now: NaiveDateTime,
    start: NaiveTime,
) -> BookingResult<()> {
    let t = minutes_since_midnight(start);

    if !candidate_minutes(policy, date, weekly_hours, now).any(|c| c == t) {
        return Err(BookingError::Validation(format!(
            "{} on {} is not an offered start time",
            format_hhmm(start),
            date
        )));
    }

    if let Some(clash) = reserved
        .iter()
        .find(|r| r.overlaps(t, t + policy.service_minutes))
    {
        return Err(BookingError::SlotConflict(format!(
            "{} on {} overlaps an existing booking at {}",
            format_hhmm(start),
            date,
            format_hhmm(clash.start)
        )));
    }

    Ok(())
}
