//! # SalonBook API
//!
//! The API crate provides the web server for the SalonBook booking service:
//! the public booking page's availability and reservation endpoints, and the
//! owner's business-hours settings.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Gather inputs, call the slot calculator, write through repositories
//! - **Middleware**: Error-to-HTTP mapping
//! - **Config**: Environment configuration
//!
//! Handlers only see the repository traits from `salonbook-core`, so the whole
//! HTTP surface runs against mocks in tests and against PostgreSQL in production.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use eyre::{Result, WrapErr, eyre};
use salonbook_core::{
    clock::{Clock, SystemClock},
    repository::{HoursRepository, ReservationRepository, SalonRepository},
};
use salonbook_db::{DbPool, PgStore};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::with_store(PgStore::new(db_pool), 15));
/// let app = salonbook_api::app(state);
/// ```
pub struct ApiState {
    pub salons: Arc<dyn SalonRepository>,
    /// Hours provider for the slot calculator and the settings page
    pub hours: Arc<dyn HoursRepository>,
    /// Reservation provider for the slot calculator and the booking write
    pub reservations: Arc<dyn ReservationRepository>,
    pub clock: Arc<dyn Clock>,
    /// Service length used when a request omits `duration_minutes`
    pub default_service_minutes: u32,
}

impl ApiState {
    /// Wires every repository to one PostgreSQL store and the system clock.
    pub fn with_store(store: PgStore, default_service_minutes: u32) -> Self {
        let store = Arc::new(store);
        Self {
            salons: store.clone(),
            hours: store.clone(),
            reservations: store,
            clock: Arc::new(SystemClock),
            default_service_minutes,
        }
    }
}

/// Builds the router with every route and request tracing, without
/// networking concerns such as CORS or timeouts.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Owner settings
        .merge(routes::hours::routes())
        // Public booking page
        .merge(routes::availability::routes())
        .merge(routes::reservation::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise everything at `level` and above is logged.
pub fn init_tracing(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre!("Failed to install tracing subscriber: {}", e))
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin {:?}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(AllowOrigin::list(origins)))
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = salonbook_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    init_tracing(config.log_level)?;

    let state = Arc::new(ApiState::with_store(
        PgStore::new(db_pool),
        config.default_service_minutes,
    ));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
