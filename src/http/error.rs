//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::BookingError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Missing or malformed identity header
    Unauthorized(String),
    /// Internal server error
    Internal(String),
    /// Booking service error, mapped through its stable error code
    Booking(BookingError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Booking(err) => {
                let status = match &err {
                    BookingError::FlightNotFound(_) | BookingError::BookingNotFound(_) => {
                        StatusCode::NOT_FOUND
                    }
                    BookingError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, ApiError::new(err.code(), err.to_string()))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::Booking(err)
    }
}

impl From<crate::db::repository::RepositoryError> for AppError {
    fn from(err: crate::db::repository::RepositoryError) -> Self {
        AppError::Booking(BookingError::Persistence(err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BookingId, FlightId};

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_booking_errors_map_to_expected_statuses() {
        assert_eq!(
            status_of(AppError::Booking(BookingError::MissingFields("price"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Booking(BookingError::FlightNotFound(
                FlightId::new(1)
            ))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Booking(BookingError::AlreadyCancelled(
                BookingId::new(2)
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Booking(BookingError::Persistence(
                crate::db::repository::RepositoryError::query("boom")
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        assert_eq!(
            status_of(AppError::Unauthorized("missing header".to_string())),
            StatusCode::UNAUTHORIZED
        );
    }
}
