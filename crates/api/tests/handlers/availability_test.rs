use axum::extract::{Path, Query, State};
use chrono::{Duration, TimeZone, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use salonbook_api::handlers::availability::{AvailabilityQuery, get_available_slots};
use salonbook_core::{errors::BookingError, slots::ReservedInterval};

use crate::test_utils::{SLUG, TestContext, at, monday, monday_nine_to_five};

fn query(duration_minutes: Option<u32>) -> AvailabilityQuery {
    AvailabilityQuery {
        date: monday(),
        duration_minutes,
    }
}

fn quarters(from: u32, until: u32) -> Vec<String> {
    (from..=until)
        .step_by(15)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}

#[tokio::test]
async fn test_availability_for_open_day() {
    let mut ctx = TestContext::new().with_hours(monday_nine_to_five());
    let salon_id = ctx.salon.id;
    ctx.reservation_repo
        .expect_reserved_intervals()
        .with(predicate::eq(salon_id), predicate::eq(monday()))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let response = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(None)),
    )
    .await
    .expect("availability succeeds");

    assert_eq!(response.salon_id, salon_id);
    assert_eq!(response.duration_minutes, 15);
    assert_eq!(response.slots, quarters(9 * 60, 16 * 60 + 45));
}

#[tokio::test]
async fn test_availability_excludes_reserved_intervals() {
    let mut ctx = TestContext::new().with_hours(monday_nine_to_five());
    ctx.reservation_repo
        .expect_reserved_intervals()
        .returning(|_, _| {
            Ok(vec![
                ReservedInterval::single_slot(at(10, 0)),
                ReservedInterval::single_slot(at(10, 15)),
            ])
        });

    let response = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(None)),
    )
    .await
    .unwrap();

    let mut expected = quarters(9 * 60, 16 * 60 + 45);
    expected.retain(|s| s != "10:00" && s != "10:15");
    assert_eq!(response.slots, expected);
}

#[tokio::test]
async fn test_availability_for_longer_service() {
    let mut ctx = TestContext::new().with_hours(monday_nine_to_five());
    ctx.reservation_repo
        .expect_reserved_intervals()
        .returning(|_, _| Ok(vec![ReservedInterval::new(at(9, 30), 60)]));

    let response = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(Some(60))),
    )
    .await
    .unwrap();

    assert_eq!(response.duration_minutes, 60);
    // 09:00 would run into the 09:30 booking; 16:00 is the last hour that fits.
    assert_eq!(response.slots.first().map(String::as_str), Some("10:30"));
    assert_eq!(response.slots.last().map(String::as_str), Some("16:00"));
}

#[tokio::test]
async fn test_availability_today_applies_lead_time() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 50, 0).unwrap();
    let mut ctx = TestContext::new().at(now).with_hours(monday_nine_to_five());
    ctx.reservation_repo
        .expect_reserved_intervals()
        .returning(|_, _| Ok(vec![]));

    let response = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(None)),
    )
    .await
    .unwrap();

    assert_eq!(response.slots, quarters(15 * 60 + 30, 16 * 60 + 45));
}

#[tokio::test]
async fn test_availability_uses_salon_local_time() {
    // 11:50 UTC is 14:50 in Istanbul.
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 11, 50, 0).unwrap();
    let mut ctx = TestContext::with_timezone("Europe/Istanbul")
        .at(now)
        .with_hours(monday_nine_to_five());
    ctx.reservation_repo
        .expect_reserved_intervals()
        .returning(|_, _| Ok(vec![]));

    let response = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(None)),
    )
    .await
    .unwrap();

    assert_eq!(response.slots.first().map(String::as_str), Some("15:30"));
}

#[tokio::test]
async fn test_availability_for_past_date_is_empty() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap() + Duration::days(1);
    let mut ctx = TestContext::new().at(now);
    ctx.hours_repo.expect_weekly_hours().never();
    ctx.reservation_repo.expect_reserved_intervals().never();

    let response = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(None)),
    )
    .await
    .unwrap();

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_availability_for_closed_day_is_empty() {
    let mut ctx = TestContext::new().with_hours(monday_nine_to_five());
    ctx.reservation_repo
        .expect_reserved_intervals()
        .returning(|_, _| Ok(vec![]));

    let response = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(AvailabilityQuery {
            date: monday() + Duration::days(6),
            duration_minutes: None,
        }),
    )
    .await
    .unwrap();

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_availability_unknown_salon() {
    let ctx = TestContext::new();

    let result = get_available_slots(
        State(ctx.build_state()),
        Path("no-such-salon".to_string()),
        Query(query(None)),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::NotFound(_) => {} // Expected
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_availability_rejects_zero_duration() {
    let ctx = TestContext::new();

    let result = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(Some(0))),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::Validation(_) => {} // Expected
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_availability_with_broken_timezone() {
    let ctx = TestContext::with_timezone("Nowhere/Special");

    let result = get_available_slots(
        State(ctx.build_state()),
        Path(SLUG.to_string()),
        Query(query(None)),
    )
    .await;

    assert!(matches!(result.unwrap_err().0, BookingError::Configuration(_)));
}
