//! Public API surface for the booking engine.
//!
//! This file consolidates the identifier newtypes shared by the domain models,
//! the repository layer, and the HTTP API. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::models::booking::Booking;
pub use crate::models::booking::BookingStatus;
pub use crate::models::booking::ContactDetails;
pub use crate::models::booking::Passenger;
pub use crate::models::booking::SeatAssignment;
pub use crate::models::flight::CabinClass;
pub use crate::models::flight::Flight;
pub use crate::models::flight::FlightStatus;
pub use crate::models::flight::Route;
pub use crate::models::flight::SeatInventory;
pub use crate::models::pnr::Pnr;

use serde::{Deserialize, Serialize};

/// Flight identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FlightId(pub i64);

/// Booking identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BookingId(pub i64);

/// User identifier, minted by the identity service upstream of this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl FlightId {
    pub fn new(value: i64) -> Self {
        FlightId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl BookingId {
    pub fn new(value: i64) -> Self {
        BookingId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl UserId {
    pub fn new(value: i64) -> Self {
        UserId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FlightId> for i64 {
    fn from(id: FlightId) -> Self {
        id.0
    }
}
impl From<BookingId> for i64 {
    fn from(id: BookingId) -> Self {
        id.0
    }
}
impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl From<i64> for FlightId {
    fn from(value: i64) -> Self {
        FlightId(value)
    }
}
impl From<i64> for BookingId {
    fn from(value: i64) -> Self {
        BookingId(value)
    }
}
impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId(value)
    }
}
