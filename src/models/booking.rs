//! Booking domain model.
//!
//! A booking is written once, after all of its seat allocations have been
//! persisted, and afterwards only its `status` ever changes. Seat numbers are
//! stored here as strings (the platform's historical wire shape for
//! assignments); the numeric form lives in the flight inventory and the two
//! are converted at the persistence boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{BookingId, FlightId, UserId};
use crate::models::flight::CabinClass;
use crate::models::pnr::Pnr;

/// Lifecycle status of a booking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Passenger travelling under a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
}

/// Contact details for the person who made the booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub contact_person: String,
    pub country: String,
    pub mobile: String,
    pub email: String,
}

/// Seats held on one leg of a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatAssignment {
    pub flight: FlightId,
    /// Seat numbers as strings, e.g. `["1", "2", "3"]`
    pub seat_numbers: Vec<String>,
}

impl SeatAssignment {
    /// Build an assignment from the numeric seat block the inventory hands out.
    pub fn from_seats(flight: FlightId, seats: &[u32]) -> Self {
        Self {
            flight,
            seat_numbers: seats.iter().map(|seat| seat.to_string()).collect(),
        }
    }

    /// Seat numbers coerced back to numeric form.
    ///
    /// Entries that do not parse are silently dropped; a malformed stored
    /// assignment must not block the rest of a cancellation.
    pub fn numeric_seats(&self) -> Vec<u32> {
        self.seat_numbers
            .iter()
            .filter_map(|seat| seat.parse().ok())
            .collect()
    }
}

/// A confirmed (or cancelled) multi-leg reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Database identifier; `None` until the booking is first stored
    pub id: Option<BookingId>,
    /// Customer-facing locator, unique across all bookings
    pub pnr: Pnr,
    pub user: UserId,
    /// Flight legs in travel order: one for one-way, two for round trips
    pub flights: Vec<FlightId>,
    /// Cabin class shared by every leg and passenger of this booking
    pub seat_class: CabinClass,
    /// One entry per leg, aligned with `flights`
    pub seat_assignments: Vec<SeatAssignment>,
    pub passengers: Vec<Passenger>,
    pub contact_details: ContactDetails,
    /// Total price for all passengers and legs, recomputed server-side
    pub price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Number of travelling passengers (and therefore seats per leg).
    pub fn party_size(&self) -> usize {
        self.passengers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_assignment_string_round_trip() {
        let assignment = SeatAssignment::from_seats(FlightId::new(7), &[4, 5, 6]);
        assert_eq!(assignment.seat_numbers, vec!["4", "5", "6"]);
        assert_eq!(assignment.numeric_seats(), vec![4, 5, 6]);
    }

    #[test]
    fn test_numeric_seats_drops_malformed_entries() {
        let assignment = SeatAssignment {
            flight: FlightId::new(1),
            seat_numbers: vec!["12".to_string(), "14A".to_string(), "".to_string()],
        };
        assert_eq!(assignment.numeric_seats(), vec![12]);
    }

    #[test]
    fn test_booking_status_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            "\"CONFIRMED\""
        );
    }
}
