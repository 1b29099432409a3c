//! Owner-facing business-hours settings.
//!
//! This is the write boundary where malformed or contradictory hours are
//! rejected, so the slot calculator only ever sees well-formed rules.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use salonbook_core::{
    errors::BookingResult,
    models::hours::{HoursResponse, UpdateHoursRequest, WeeklyHours, validate_weekly_hours},
};

use crate::{ApiState, handlers::find_salon, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn get_hours(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
) -> Result<Json<HoursResponse>, AppError> {
    let salon = find_salon(&state, &slug).await?;
    let hours = state.hours.weekly_hours(salon.id).await?;

    Ok(Json(HoursResponse {
        salon_id: salon.id,
        hours,
    }))
}

/// Replaces the salon's weekly hours
///
/// # Endpoint
///
/// ```text
/// PUT /api/salons/:slug/hours
/// { "hours": [ { "weekday": 1, "open_time": "09:00", "close_time": "17:00" } ] }
/// ```
///
/// Any unparseable time, out-of-range weekday, duplicated weekday or open day
/// that does not close after it opens fails with `BookingError::Configuration`
/// and nothing is written.
#[axum::debug_handler]
pub async fn update_hours(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateHoursRequest>,
) -> Result<Json<HoursResponse>, AppError> {
    let salon = find_salon(&state, &slug).await?;

    let rules = payload
        .hours
        .into_iter()
        .map(|input| input.into_rule())
        .collect::<BookingResult<Vec<WeeklyHours>>>()?;
    validate_weekly_hours(&rules)?;

    let hours = state.hours.replace_weekly_hours(salon.id, &rules).await?;

    tracing::info!("Business hours updated: salon={}, rules={}", slug, hours.len());

    Ok(Json(HoursResponse {
        salon_id: salon.id,
        hours,
    }))
}
