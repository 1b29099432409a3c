//! # Availability Handlers
//!
//! Serves the start times a customer can pick on the public booking page.
//!
//! The handler gathers the calculator's inputs from the repositories and the
//! injected clock, then delegates to [`compute_available_slots_with`]:
//!
//! 1. Resolve the salon and convert "now" into its local civil time
//! 2. Load the weekly hours and the reserved intervals of the requested date
//! 3. Walk the 15-minute grid, dropping slots inside the lead time or
//!    overlapping a booking
//!
//! An empty list is a normal answer: the salon is closed, fully booked, or
//! the date has already passed.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use salonbook_core::{
    models::availability::AvailabilityResponse,
    slots::{SlotPolicy, compute_available_slots_with, format_slot},
};

use crate::{ApiState, handlers::find_salon, middleware::error_handling::AppError};

/// Query parameters for the availability endpoint
///
/// # Fields
///
/// * `date` - Calendar date in the salon's local time (`YYYY-MM-DD`)
/// * `duration_minutes` - Length of the requested service (default from config)
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub duration_minutes: Option<u32>,
}

/// Lists bookable start times for one salon and date
///
/// # Endpoint
///
/// ```text
/// GET /api/salons/:slug/availability?date=2026-10-19&duration_minutes=45
/// ```
///
/// # Errors
///
/// * `BookingError::NotFound` - Unknown salon slug
/// * `BookingError::Validation` - Zero or over-a-day service duration
/// * `BookingError::Configuration` - Salon timezone cannot be resolved
/// * `BookingError::Database` - Database error
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let salon = find_salon(&state, &slug).await?;

    let service_minutes = query
        .duration_minutes
        .unwrap_or(state.default_service_minutes);
    let policy = SlotPolicy::for_service(service_minutes)?;

    let now = salon.local_now(state.clock.now())?;
    if query.date < now.date() {
        tracing::debug!("Availability requested for past date: salon={}, date={}", slug, query.date);
        return Ok(Json(AvailabilityResponse {
            salon_id: salon.id,
            date: query.date,
            duration_minutes: service_minutes,
            slots: Vec::new(),
        }));
    }

    let hours = state.hours.weekly_hours(salon.id).await?;
    let reserved = state
        .reservations
        .reserved_intervals(salon.id, query.date)
        .await?;

    let slots = compute_available_slots_with(&policy, query.date, &hours, &reserved, now);

    tracing::debug!(
        "Computed availability: salon={}, date={}, service={}min, reserved={}, slots={}",
        slug,
        query.date,
        service_minutes,
        reserved.len(),
        slots.len()
    );

    Ok(Json(AvailabilityResponse {
        salon_id: salon.id,
        date: query.date,
        duration_minutes: service_minutes,
        slots: slots.iter().map(format_slot).collect(),
    }))
}
