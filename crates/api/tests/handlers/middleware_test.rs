use axum::{body::to_bytes, http::StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_api::middleware::error_handling::map_error;
use salonbook_core::errors::BookingError;
use serde_json::Value;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case::not_found(BookingError::NotFound("Salon x not found".to_string()), StatusCode::NOT_FOUND)]
#[case::validation(BookingError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case::configuration(
    BookingError::Configuration("weekday 9 is out of range".to_string()),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case::slot_conflict(BookingError::SlotConflict("taken".to_string()), StatusCode::CONFLICT)]
#[case::database(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_client_errors_carry_message() {
    let response = map_error(BookingError::SlotConflict(
        "10:00 on 2026-10-19 overlaps an existing booking at 10:00".to_string(),
    ));

    let body = body_json(response).await;

    assert_eq!(
        body["error"],
        "Slot conflict: 10:00 on 2026-10-19 overlaps an existing booking at 10:00"
    );
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let response = map_error(BookingError::Database(eyre::eyre!(
        "connection refused to postgres://admin:secret@db"
    )));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_internal_error_is_server_error() {
    let source: Box<dyn std::error::Error + Send + Sync> = "worker panicked".into();
    let response = map_error(BookingError::Internal(source));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
