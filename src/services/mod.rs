//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that sits between the repository
//! layer and the HTTP API. Services orchestrate repository calls and own the
//! booking platform's consistency rules: seat movement, multi-leg rollback,
//! cancellation restoration, and the flight schedule state machine.

pub mod allocator;

pub mod booking;

pub mod cancellation;

pub mod error;

pub mod scheduling;

pub use allocator::{allocate, deallocate, SeatBlock, MAX_SAVE_ATTEMPTS};
pub use booking::{create_booking, user_bookings, BookingRequest, BookingView};
pub use cancellation::{cancel_booking, CancellationReport};
pub use error::{BookingError, BookingResult};
pub use scheduling::{
    cancel_flight, compute_arrival, create_flight, is_upcoming, reschedule_flight, NewFlight,
};
