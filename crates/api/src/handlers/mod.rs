//! Request handlers for the public booking page and the owner settings page.
//!
//! Every route is scoped to a salon slug; [`find_salon`] resolves it first.

pub mod availability;
pub mod hours;
pub mod reservation;

use salonbook_core::{
    errors::{BookingError, BookingResult},
    models::salon::Salon,
};

use crate::ApiState;

pub(crate) async fn find_salon(state: &ApiState, slug: &str) -> BookingResult<Salon> {
    state
        .salons
        .salon_by_slug(slug)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Salon {} not found", slug)))
}
