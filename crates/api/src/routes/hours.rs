use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/salons/:slug/hours",
        get(handlers::hours::get_hours).put(handlers::hours::update_hours),
    )
}
