use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/salons/:slug/reservations",
            get(handlers::reservation::list_reservations)
                .post(handlers::reservation::create_reservation),
        )
        .route(
            "/api/salons/:slug/reservations/:id/cancel",
            post(handlers::reservation::cancel_reservation),
        )
}
