//! Seat allocation against flight inventory.
//!
//! [`allocate`] and [`deallocate`] are the only two ways seats move between
//! a flight's available and booked pools. Both are read-modify-write cycles
//! over one flight document, guarded by the repository's versioned save:
//! when a concurrent writer lands first, the save fails with a retryable
//! conflict and the whole cycle is replayed against the fresh state, up to
//! [`MAX_SAVE_ATTEMPTS`] times. Two racing requests for the last seat can
//! therefore never both win; the loser re-reads an empty pool and fails.

use log::{debug, warn};

use super::error::{BookingError, BookingResult};
use crate::api::FlightId;
use crate::db::repository::FullRepository;
use crate::models::{CabinClass, InventoryError};

/// How many times a seat movement is replayed after losing a versioned save.
///
/// Conflicts only occur while another writer is touching the same flight, so
/// a small bound is enough; an allocation that loses this many rounds fails
/// with the underlying conflict as a persistence error.
pub const MAX_SAVE_ATTEMPTS: usize = 3;

/// A block of seats secured on one flight leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatBlock {
    pub flight: FlightId,
    pub class: CabinClass,
    /// Seat numbers in the order they were taken from the pool
    pub seat_numbers: Vec<u32>,
}

/// Reserve `count` seats of `class` on one flight and persist the move.
///
/// Seats come from the front of the available pool, so for a given pool
/// state the reserved block is deterministic. The persisted flight document
/// is the source of truth: this function only returns once the seat move
/// has been saved under the flight's version stamp.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `flight_id` - Flight to take seats from
/// * `class` - Cabin class of the seats
/// * `count` - Number of seats, one per passenger
///
/// # Returns
/// * `Ok(SeatBlock)` - The reserved seat numbers
/// * `Err(BookingError::FlightNotFound)` - If the flight does not exist
/// * `Err(BookingError::InsufficientSeats)` - If the pool is short
/// * `Err(BookingError::Persistence)` - If the store fails or the conflict
///   retries are exhausted
pub async fn allocate<R>(
    repo: &R,
    flight_id: FlightId,
    class: CabinClass,
    count: usize,
) -> BookingResult<SeatBlock>
where
    R: FullRepository + ?Sized,
{
    let mut attempt = 0;
    loop {
        attempt += 1;

        let mut flight = repo
            .find_flight(flight_id)
            .await?
            .ok_or(BookingError::FlightNotFound(flight_id))?;

        let seats = flight.inventory.reserve(class, count).map_err(
            |InventoryError::Insufficient {
                 class,
                 requested,
                 available,
             }| BookingError::InsufficientSeats {
                flight: flight_id,
                class,
                requested,
                available,
            },
        )?;

        match repo.save_flight(&flight).await {
            Ok(_) => {
                debug!(
                    "Allocated {} {} seat(s) {:?} on flight {}",
                    count, class, seats, flight_id
                );
                return Ok(SeatBlock {
                    flight: flight_id,
                    class,
                    seat_numbers: seats,
                });
            }
            Err(err) if err.is_retryable() && attempt < MAX_SAVE_ATTEMPTS => {
                warn!(
                    "Seat allocation on flight {} lost a concurrent write (attempt {}/{}), retrying",
                    flight_id, attempt, MAX_SAVE_ATTEMPTS
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Return previously reserved seats to a flight's available pool.
///
/// Used both when a booking is cancelled and when a multi-leg booking rolls
/// back legs it had already secured. The released numbers merge back into
/// the pool in sorted order; numbers already available are skipped, so a
/// replayed release cannot duplicate a seat.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `flight_id` - Flight to return seats to
/// * `class` - Cabin class of the seats
/// * `seats` - Seat numbers to return
///
/// # Returns
/// * `Ok(usize)` - How many seats were actually returned
/// * `Err(BookingError::FlightNotFound)` - If the flight no longer exists
/// * `Err(BookingError::Persistence)` - If the store fails or the conflict
///   retries are exhausted
pub async fn deallocate<R>(
    repo: &R,
    flight_id: FlightId,
    class: CabinClass,
    seats: &[u32],
) -> BookingResult<usize>
where
    R: FullRepository + ?Sized,
{
    let mut attempt = 0;
    loop {
        attempt += 1;

        let mut flight = repo
            .find_flight(flight_id)
            .await?
            .ok_or(BookingError::FlightNotFound(flight_id))?;

        let returned = flight.inventory.release(class, seats);

        match repo.save_flight(&flight).await {
            Ok(_) => {
                debug!(
                    "Released {} {} seat(s) back to flight {}",
                    returned, class, flight_id
                );
                return Ok(returned);
            }
            Err(err) if err.is_retryable() && attempt < MAX_SAVE_ATTEMPTS => {
                warn!(
                    "Seat release on flight {} lost a concurrent write (attempt {}/{}), retrying",
                    flight_id, attempt, MAX_SAVE_ATTEMPTS
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}
