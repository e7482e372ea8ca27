//! Error handling for the solar forecast server
//!
//! Every error leaves the server as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::SeriesError;
use thiserror::Error;

/// Message returned when a coordinate is absent or not a number
pub const MISSING_COORDINATES_MESSAGE: &str = "Wymagane parametry: latitude, longitude";

/// Message returned when the weather provider gave no usable answer
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Błąd API pogodowego";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Missing or unparseable coordinates")]
    MissingCoordinates,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    // External service errors
    #[error("Weather provider returned no data")]
    UpstreamUnavailable,

    #[error("Weather provider error: {0}")]
    Upstream(String),

    // Pipeline errors
    #[error("Time-series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::MissingCoordinates => {
                (StatusCode::BAD_REQUEST, MISSING_COORDINATES_MESSAGE.to_string())
            }
            AppError::InvalidCoordinates(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UpstreamUnavailable | AppError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UPSTREAM_FAILURE_MESSAGE.to_string(),
            ),
            AppError::Series(SeriesError::EmptyWindow) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No daily data inside the 7-day window".to_string(),
            ),
            AppError::Series(SeriesError::EmptySeries(series)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("No {} data returned", series),
            ),
            AppError::Series(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Weather data could not be processed".to_string(),
            ),
            AppError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if let AppError::Series(err) = &self {
            if err.is_contract_violation() {
                tracing::error!("Provider payload does not fit the pipeline: {}", err);
            } else {
                tracing::error!("Weather data could not be reduced: {}", err);
            }
        } else if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
