use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use salonbook_core::{
    errors::BookingError,
    models::{
        reservation::{
            CreateReservationRequest, ListReservationsResponse, NewReservation,
            ReservationResponse,
        },
        time::parse_hhmm,
    },
    slots::{SlotPolicy, check_bookable},
};
use uuid::Uuid;

use crate::{ApiState, handlers::find_salon, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct ReservationsQuery {
    pub date: NaiveDate,
}

/// Books a start time offered by the availability endpoint
///
/// The submitted time is re-checked against fresh hours and reservations, then
/// written by the repository, which guarantees at most one active booking per
/// occupied interval. A `409 Conflict` means the slot was taken in the meantime
/// and the client should re-fetch availability.
///
/// # Endpoint
///
/// ```text
/// POST /api/salons/:slug/reservations
/// { "date": "2026-10-19", "start_time": "10:15", "duration_minutes": 45,
///   "customer_name": "Ayşe", "customer_phone": "+90 555 000 00 00" }
/// ```
#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let salon = find_salon(&state, &slug).await?;

    let customer_name = payload.customer_name.trim();
    if customer_name.is_empty() {
        return Err(AppError(BookingError::Validation(
            "customer_name must not be empty".to_string(),
        )));
    }

    let start_time = parse_hhmm(&payload.start_time)
        .map_err(|e| BookingError::Validation(e.to_string()))?;
    let duration_minutes = payload
        .duration_minutes
        .unwrap_or(state.default_service_minutes);
    let policy = SlotPolicy::for_service(duration_minutes)?;

    let now = salon.local_now(state.clock.now())?;
    if payload.date < now.date() {
        return Err(AppError(BookingError::Validation(format!(
            "{} is in the past",
            payload.date
        ))));
    }

    let hours = state.hours.weekly_hours(salon.id).await?;
    let reserved = state
        .reservations
        .reserved_intervals(salon.id, payload.date)
        .await?;
    check_bookable(&policy, payload.date, &hours, &reserved, now, start_time)?;

    let reservation = state
        .reservations
        .create_reservation(&NewReservation {
            salon_id: salon.id,
            date: payload.date,
            start_time,
            duration_minutes,
            customer_name: customer_name.to_string(),
            customer_phone: payload
                .customer_phone
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
        })
        .await?;

    tracing::info!(
        "Reservation booked: salon={}, id={}, date={}, start={}",
        slug,
        reservation.id,
        reservation.date,
        payload.start_time
    );

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

#[axum::debug_handler]
pub async fn list_reservations(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
    Query(query): Query<ReservationsQuery>,
) -> Result<Json<ListReservationsResponse>, AppError> {
    let salon = find_salon(&state, &slug).await?;

    let reservations = state
        .reservations
        .reservations_on(salon.id, query.date)
        .await?;

    Ok(Json(ListReservationsResponse {
        date: query.date,
        reservations: reservations.into_iter().map(Into::into).collect(),
    }))
}

/// Cancels a reservation, freeing its interval for new bookings
#[axum::debug_handler]
pub async fn cancel_reservation(
    State(state): State<Arc<ApiState>>,
    Path((slug, id)): Path<(String, Uuid)>,
) -> Result<Json<ReservationResponse>, AppError> {
    let salon = find_salon(&state, &slug).await?;

    let reservation = state.reservations.cancel_reservation(salon.id, id).await?;

    tracing::info!("Reservation cancelled: salon={}, id={}", slug, id);

    Ok(Json(reservation.into()))
}
