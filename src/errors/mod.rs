/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Errors surfaced through the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        };

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures talking to the weather provider
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather provider returned status {0}")]
    Status(u16),
    #[error("malformed weather response: {0}")]
    Decode(String),
}

impl WeatherError {
    /// Transport-level failures are recoverable with synthetic data;
    /// a response we cannot read is not.
    pub fn is_transient(&self) -> bool {
        matches!(self, WeatherError::Request(_) | WeatherError::Status(_))
    }
}

/// Failures reading or writing the store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("profile not found for user {0}")]
    ProfileNotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures delivering a push notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("notification sink returned status {0}")]
    Status(u16),
    #[error("notification sink not subscribed")]
    NotSubscribed,
}

/// Why a weather check produced no alert
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("could not fetch weather: {0}")]
    Weather(#[from] WeatherError),
}
