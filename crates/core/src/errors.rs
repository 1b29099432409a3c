use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Slot conflict: {0}")]
    SlotConflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// A wall-clock string that is not a zero-padded `HH:MM` between 00:00 and 23:59.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time {0:?}, expected HH:MM")]
pub struct InvalidTime(pub String);
