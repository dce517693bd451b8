//! Error types for the surfsup application.
//!
//! Every failure that can reach a handler is one of these variants, so the
//! routing layer maps errors to HTTP status codes in exactly one place.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsUpError {
    /// SQLite / connection pool errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The dataset file does not match the declared schema
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// A requested date lies outside the dataset's date bounds
    #[error("{message}")]
    DateOutOfRange { message: String },

    /// Start date after end date
    #[error("Start date must be earlier than or equal to the end date.")]
    InvalidRange,

    /// A caller-supplied date is not a zero-padded ISO `YYYY-MM-DD` date
    #[error("Invalid date '{value}'. Dates must use the YYYY-MM-DD format.")]
    InvalidDate { value: String },

    /// The dataset holds no measurements, so no date bounds exist
    #[error("Dataset contains no measurements")]
    EmptyDataset,

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsUpError {
    /// HTTP status used when this error is returned from a route
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurfsUpError::DateOutOfRange { .. } => StatusCode::NOT_FOUND,
            SurfsUpError::InvalidRange | SurfsUpError::InvalidDate { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenience type alias for Results with SurfsUpError
pub type Result<T> = std::result::Result<T, SurfsUpError>;
