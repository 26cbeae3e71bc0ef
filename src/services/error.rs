//! Error types for the booking service layer.

use crate::api::{BookingId, FlightId};
use crate::db::repository::RepositoryError;
use crate::models::CabinClass;

/// Result type for booking service operations
pub type BookingResult<T> = Result<T, BookingError>;

/// Error type for booking, cancellation, and scheduling operations.
///
/// Each variant corresponds to one stable error code (see [`code`]) that the
/// HTTP layer serializes for clients, so variants can be matched on without
/// string inspection.
///
/// [`code`]: BookingError::code
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// A required booking field is absent or empty.
    #[error("Missing required field: {0}")]
    MissingFields(&'static str),

    /// The requested cabin class is not one of the supported classes.
    #[error("Unknown cabin class: {0}")]
    InvalidCabinClass(String),

    /// A referenced flight does not exist.
    #[error("Flight {0} not found")]
    FlightNotFound(FlightId),

    /// The flight's available pool holds fewer seats than requested.
    #[error(
        "Not enough {class} seats on flight {flight}: requested {requested}, available {available}"
    )]
    InsufficientSeats {
        flight: FlightId,
        class: CabinClass,
        requested: usize,
        available: usize,
    },

    /// The booking does not exist (or is not visible to the requesting user).
    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    /// The booking is already cancelled.
    #[error("Booking {0} is already cancelled")]
    AlreadyCancelled(BookingId),

    /// A schedule change violates the status state machine or the
    /// strictly-later rule.
    #[error("Invalid schedule update: {0}")]
    InvalidScheduleUpdate(String),

    /// A route duration string does not parse as "HH:MM".
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// A flight being created fails validation.
    #[error("Invalid flight: {0}")]
    InvalidFlight(String),

    /// The store failed; partially applied work has been rolled back where
    /// possible.
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

impl BookingError {
    /// Stable error code exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::MissingFields(_) => "MISSING_FIELDS",
            BookingError::InvalidCabinClass(_) => "INVALID_CABIN_CLASS",
            BookingError::FlightNotFound(_) => "FLIGHT_NOT_FOUND",
            BookingError::InsufficientSeats { .. } => "INSUFFICIENT_SEATS",
            BookingError::BookingNotFound(_) => "NOT_FOUND",
            BookingError::AlreadyCancelled(_) => "ALREADY_CANCELLED",
            BookingError::InvalidScheduleUpdate(_) => "INVALID_SCHEDULE_UPDATE",
            BookingError::InvalidDuration(_) => "INVALID_DURATION",
            BookingError::InvalidFlight(_) => "INVALID_FLIGHT",
            BookingError::Persistence(_) => "PERSISTENCE_FAILURE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(BookingError::MissingFields("price").code(), "MISSING_FIELDS");
        assert_eq!(
            BookingError::FlightNotFound(FlightId::new(4)).code(),
            "FLIGHT_NOT_FOUND"
        );
        assert_eq!(
            BookingError::Persistence(RepositoryError::query("boom")).code(),
            "PERSISTENCE_FAILURE"
        );
    }

    #[test]
    fn test_insufficient_seats_message_names_the_shortfall() {
        let err = BookingError::InsufficientSeats {
            flight: FlightId::new(9),
            class: CabinClass::Economy,
            requested: 3,
            available: 1,
        };
        let text = err.to_string();
        assert!(text.contains("flight 9"));
        assert!(text.contains("requested 3"));
        assert!(text.contains("available 1"));
    }
}
