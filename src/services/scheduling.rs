//! Flight scheduling: arrival derivation and the delay/cancel state machine.
//!
//! Arrival date and time are never stored independently; they are always
//! derived from the departure instant plus the route's "HH:MM" duration, so
//! a rescheduled flight cannot end up with an arrival that contradicts its
//! route. Overnight arrivals fall out of the date arithmetic naturally.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::info;

use super::allocator::MAX_SAVE_ATTEMPTS;
use super::error::{BookingError, BookingResult};
use crate::api::FlightId;
use crate::db::repository::FullRepository;
use crate::models::{Flight, FlightStatus, Route, SeatInventory};

// ==================== Arrival derivation ====================

/// Parse a route duration of the form "HH:MM".
///
/// Hours may exceed 23 for long-haul routes; minutes must be below 60.
fn parse_duration(duration: &str) -> BookingResult<(u32, u32)> {
    let invalid = || BookingError::InvalidDuration(duration.to_string());

    let (hours, minutes) = duration.split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    Ok((hours, minutes))
}

/// Compute the arrival date and time for a departure and a route duration.
///
/// # Arguments
/// * `departure_date` - Local departure date
/// * `departure_time` - Local departure time
/// * `duration` - Route duration as "HH:MM"
///
/// # Returns
/// * `Ok((NaiveDate, NaiveTime))` - Arrival split back into date and time;
///   the date rolls over when the flight crosses midnight
/// * `Err(BookingError::InvalidDuration)` - If the duration does not parse
pub fn compute_arrival(
    departure_date: NaiveDate,
    departure_time: NaiveTime,
    duration: &str,
) -> BookingResult<(NaiveDate, NaiveTime)> {
    let (hours, minutes) = parse_duration(duration)?;

    let arrival = departure_date
        .and_time(departure_time)
        .checked_add_signed(Duration::hours(hours as i64) + Duration::minutes(minutes as i64))
        .ok_or_else(|| BookingError::InvalidDuration(duration.to_string()))?;

    Ok((arrival.date(), arrival.time()))
}

/// Recompute a flight's arrival fields from its departure and route.
pub fn derive_arrival(flight: &mut Flight) -> BookingResult<()> {
    let (arrival_date, arrival_time) = compute_arrival(
        flight.departure_date,
        flight.departure_time,
        &flight.route.duration,
    )?;
    flight.arrival_date = arrival_date;
    flight.arrival_time = arrival_time;
    Ok(())
}

// ==================== Status state machine ====================

/// Apply a departure change to a flight, in memory.
///
/// The new departure must be strictly later than the current one; moving a
/// flight earlier (or to the identical instant) is rejected. A cancelled
/// flight cannot be rescheduled. On success the flight is marked `Delayed`
/// and its arrival is re-derived from the new departure.
pub fn apply_reschedule(
    flight: &mut Flight,
    new_date: NaiveDate,
    new_time: NaiveTime,
) -> BookingResult<()> {
    if flight.status == FlightStatus::Cancelled {
        return Err(BookingError::InvalidScheduleUpdate(
            "Cannot reschedule a cancelled flight".to_string(),
        ));
    }

    let current = flight.departure_instant();
    let proposed = new_date.and_time(new_time);
    if proposed <= current {
        return Err(BookingError::InvalidScheduleUpdate(format!(
            "New departure {} must be later than the current departure {}",
            proposed, current
        )));
    }

    flight.departure_date = new_date;
    flight.departure_time = new_time;
    flight.status = FlightStatus::Delayed;
    derive_arrival(flight)
}

/// Mark a flight cancelled, in memory.
///
/// Cancellation is terminal; cancelling twice is rejected. Existing bookings
/// are untouched, and their seats may still be restored into the cancelled
/// flight's pools so the inventory ledger stays balanced.
pub fn apply_cancellation(flight: &mut Flight) -> BookingResult<()> {
    if flight.status == FlightStatus::Cancelled {
        return Err(BookingError::InvalidScheduleUpdate(
            "Flight is already cancelled".to_string(),
        ));
    }
    flight.status = FlightStatus::Cancelled;
    Ok(())
}

/// Whether a flight departs after the given instant.
pub fn is_upcoming(flight: &Flight, now: NaiveDateTime) -> bool {
    flight.departure_instant() > now
}

// ==================== Flight lifecycle services ====================

/// Everything needed to put a new flight on sale.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub aircraft_number: String,
    pub route: Route,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub economy_price: f64,
    pub premium_price: f64,
    /// Seats to seed into the economy pool, numbered from 1
    pub economy_seats: u32,
    /// Seats to seed into the premium pool, numbered from 1
    pub premium_seats: u32,
}

/// Validate and store a new flight.
///
/// The arrival fields are derived from the departure and route duration, and
/// the seat pools are seeded full: every seat available, none booked.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `new_flight` - Flight parameters
///
/// # Returns
/// * `Ok(Flight)` - The stored flight with its assigned ID
/// * `Err(BookingError::InvalidFlight)` - If a field fails validation
/// * `Err(BookingError::InvalidDuration)` - If the route duration is malformed
/// * `Err(BookingError::Persistence)` - If the store fails
pub async fn create_flight<R>(repo: &R, new_flight: NewFlight) -> BookingResult<Flight>
where
    R: FullRepository + ?Sized,
{
    if new_flight.aircraft_number.trim().is_empty() {
        return Err(BookingError::InvalidFlight(
            "Aircraft number must not be empty".to_string(),
        ));
    }
    if new_flight.route.start_location.trim().is_empty()
        || new_flight.route.end_location.trim().is_empty()
    {
        return Err(BookingError::InvalidFlight(
            "Route must name a start and end location".to_string(),
        ));
    }
    if new_flight.economy_price <= 0.0 || new_flight.premium_price <= 0.0 {
        return Err(BookingError::InvalidFlight(
            "Fares must be positive".to_string(),
        ));
    }

    let (arrival_date, arrival_time) = compute_arrival(
        new_flight.departure_date,
        new_flight.departure_time,
        &new_flight.route.duration,
    )?;

    let flight = Flight {
        id: None,
        aircraft_number: new_flight.aircraft_number,
        route: new_flight.route,
        departure_date: new_flight.departure_date,
        departure_time: new_flight.departure_time,
        arrival_date,
        arrival_time,
        economy_price: new_flight.economy_price,
        premium_price: new_flight.premium_price,
        inventory: SeatInventory::with_counts(new_flight.economy_seats, new_flight.premium_seats),
        status: FlightStatus::Ok,
        version: 0,
    };

    let stored = repo.insert_flight(flight).await?;
    info!(
        "Flight {} created: {} {} -> {} departing {} {}",
        stored.id.map(|id| id.value()).unwrap_or_default(),
        stored.aircraft_number,
        stored.route.start_location,
        stored.route.end_location,
        stored.departure_date,
        stored.departure_time,
    );
    Ok(stored)
}

/// Delay a flight to a new departure and persist the change.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `flight_id` - Flight to reschedule
/// * `new_date` - New local departure date
/// * `new_time` - New local departure time
///
/// # Returns
/// * `Ok(Flight)` - The flight as persisted: `Delayed`, arrival re-derived
/// * `Err(BookingError::FlightNotFound)` - If the flight does not exist
/// * `Err(BookingError::InvalidScheduleUpdate)` - If the flight is cancelled
///   or the new departure is not strictly later
/// * `Err(BookingError::Persistence)` - If the store fails or the conflict
///   retries are exhausted
pub async fn reschedule_flight<R>(
    repo: &R,
    flight_id: FlightId,
    new_date: NaiveDate,
    new_time: NaiveTime,
) -> BookingResult<Flight>
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

        apply_reschedule(&mut flight, new_date, new_time)?;

        match repo.save_flight(&flight).await {
            Ok(saved) => {
                info!(
                    "Flight {} delayed to {} {}",
                    flight_id, new_date, new_time
                );
                return Ok(saved);
            }
            Err(err) if err.is_retryable() && attempt < MAX_SAVE_ATTEMPTS => continue,
            Err(err) => return Err(err.into()),
        }
    }
}

/// Cancel a flight and persist the change.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `flight_id` - Flight to cancel
///
/// # Returns
/// * `Ok(Flight)` - The flight as persisted, status `Cancelled`
/// * `Err(BookingError::FlightNotFound)` - If the flight does not exist
/// * `Err(BookingError::InvalidScheduleUpdate)` - If it is already cancelled
/// * `Err(BookingError::Persistence)` - If the store fails or the conflict
///   retries are exhausted
pub async fn cancel_flight<R>(repo: &R, flight_id: FlightId) -> BookingResult<Flight>
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

        apply_cancellation(&mut flight)?;

        match repo.save_flight(&flight).await {
            Ok(saved) => {
                info!("Flight {} cancelled", flight_id);
                return Ok(saved);
            }
            Err(err) if err.is_retryable() && attempt < MAX_SAVE_ATTEMPTS => continue,
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "scheduling_tests.rs"]
mod scheduling_tests;
