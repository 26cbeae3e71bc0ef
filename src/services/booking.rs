//! Booking orchestration: validation, multi-leg allocation, rollback.
//!
//! Creating a booking touches one flight document per leg plus the booking
//! document, and the store offers no cross-document transaction. The
//! orchestrator therefore treats persisted seat allocations as the thing to
//! protect: legs are allocated one at a time, and the moment anything fails
//! (a later leg, or the final booking insert) every block allocated so far
//! is released again in reverse order. The booking document itself is only
//! written after all of its seats are safely held, so a stored booking
//! always refers to seats that were really moved out of the pools.

use chrono::Utc;
use log::{info, warn};

use super::allocator::{self, SeatBlock};
use super::error::{BookingError, BookingResult};
use super::scheduling;
use crate::api::{FlightId, UserId};
use crate::db::repository::FullRepository;
use crate::models::{
    Booking, BookingStatus, CabinClass, ContactDetails, Flight, Passenger, Pnr, SeatAssignment,
};

/// Client-supplied input for a new booking, as received by the API layer.
///
/// `seat_class` stays free text here; it is parsed against the closed cabin
/// class set during validation so unknown classes are rejected before any
/// inventory is touched.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Flight legs in travel order: one for one-way, two for round trips
    pub flights: Vec<FlightId>,
    pub seat_class: String,
    pub passengers: Vec<Passenger>,
    pub contact_details: Option<ContactDetails>,
    /// Client's total price figure; checked against the server-side fare sum
    pub price: Option<f64>,
}

/// A booking joined with its resolved flights for display.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub booking: Booking,
    /// Resolved flight documents, in leg order; legs whose flight document
    /// has disappeared are omitted
    pub flights: Vec<Flight>,
    /// Whether the first leg departs in the future
    pub upcoming: bool,
}

/// Allowed drift between the client's price figure and the recomputed one
/// before a mismatch is logged.
const PRICE_TOLERANCE: f64 = 0.005;

/// Create a confirmed booking across one or more flight legs.
///
/// The orchestration runs in four steps:
/// 1. Validate the request; nothing has side effects yet
/// 2. Resolve every referenced flight, so a dangling flight ID fails the
///    booking before any seats move
/// 3. Allocate seats leg by leg; on any failure, release the already
///    allocated blocks in reverse order and return the original error
/// 4. Insert the booking document; if that write fails, release every block
///
/// The price stored on the booking is recomputed from the current fares
/// (fare per class, times passengers, summed over legs). The client's figure
/// is required but not trusted; a mismatch is logged and the recomputed
/// value wins.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `user` - Authenticated owner of the new booking
/// * `request` - Validated client input
///
/// # Returns
/// * `Ok(Booking)` - The stored booking, status `Confirmed`
/// * `Err(BookingError)` - See the error taxonomy; seat pools are unchanged
///   whenever an error is returned, except for release failures which are
///   logged and surface the original error
pub async fn create_booking<R>(
    repo: &R,
    user: UserId,
    request: BookingRequest,
) -> BookingResult<Booking>
where
    R: FullRepository + ?Sized,
{
    // Step 1: validation, before any side effect.
    if request.flights.is_empty() {
        return Err(BookingError::MissingFields("flights"));
    }
    if request.passengers.is_empty() {
        return Err(BookingError::MissingFields("passengers"));
    }
    let contact_details = request
        .contact_details
        .ok_or(BookingError::MissingFields("contactDetails"))?;
    let quoted_price = request.price.ok_or(BookingError::MissingFields("price"))?;
    if request.seat_class.trim().is_empty() {
        return Err(BookingError::MissingFields("seatClass"));
    }
    let class: CabinClass = request
        .seat_class
        .parse()
        .map_err(|_| BookingError::InvalidCabinClass(request.seat_class.clone()))?;

    // Step 2: resolve all legs up front.
    let mut legs: Vec<Flight> = Vec::with_capacity(request.flights.len());
    for &flight_id in &request.flights {
        let flight = repo
            .find_flight(flight_id)
            .await?
            .ok_or(BookingError::FlightNotFound(flight_id))?;
        legs.push(flight);
    }

    // Step 3: allocate seats per leg, rolling back on failure.
    let party = request.passengers.len();
    let mut allocated: Vec<SeatBlock> = Vec::with_capacity(request.flights.len());
    for &flight_id in &request.flights {
        match allocator::allocate(repo, flight_id, class, party).await {
            Ok(block) => allocated.push(block),
            Err(err) => {
                release_blocks(repo, &allocated).await;
                return Err(err);
            }
        }
    }

    // Step 4: compute the price and persist the booking last.
    let total_price: f64 = legs.iter().map(|leg| leg.fare(class) * party as f64).sum();
    if (quoted_price - total_price).abs() > PRICE_TOLERANCE {
        warn!(
            "Quoted price {:.2} does not match fare total {:.2} for user {}; storing the fare total",
            quoted_price, total_price, user
        );
    }

    let booking = Booking {
        id: None,
        pnr: Pnr::generate(),
        user,
        flights: request.flights.clone(),
        seat_class: class,
        seat_assignments: allocated
            .iter()
            .map(|block| SeatAssignment::from_seats(block.flight, &block.seat_numbers))
            .collect(),
        passengers: request.passengers,
        contact_details,
        price: total_price,
        status: BookingStatus::Confirmed,
        created_at: Utc::now(),
    };

    match repo.insert_booking(booking).await {
        Ok(stored) => {
            info!(
                "Booking {} confirmed for user {}: {} leg(s), {} passenger(s), {} class",
                stored.pnr,
                user,
                stored.flights.len(),
                party,
                class
            );
            Ok(stored)
        }
        Err(err) => {
            warn!(
                "Booking insert failed for user {} after seats were held, rolling back: {}",
                user, err
            );
            release_blocks(repo, &allocated).await;
            Err(err.into())
        }
    }
}

/// Release a list of held seat blocks, most recent first.
///
/// Rollback is best effort: a block that cannot be released is logged and
/// skipped so the remaining blocks still get released.
async fn release_blocks<R>(repo: &R, blocks: &[SeatBlock])
where
    R: FullRepository + ?Sized,
{
    for block in blocks.iter().rev() {
        if let Err(err) =
            allocator::deallocate(repo, block.flight, block.class, &block.seat_numbers).await
        {
            warn!(
                "Failed to release seats {:?} on flight {} during rollback: {}",
                block.seat_numbers, block.flight, err
            );
        }
    }
}

/// List a user's bookings, newest first, with their flights resolved.
///
/// Legs whose flight document has been deleted are omitted from the view
/// rather than failing the whole listing. The `upcoming` flag is computed
/// from the first remaining leg's departure.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `user` - Owner whose bookings to list
///
/// # Returns
/// * `Ok(Vec<BookingView>)` - Bookings joined with flight documents
/// * `Err(BookingError::Persistence)` - If the store fails
pub async fn user_bookings<R>(repo: &R, user: UserId) -> BookingResult<Vec<BookingView>>
where
    R: FullRepository + ?Sized,
{
    let bookings = repo.bookings_for_user(user).await?;
    let now = Utc::now().naive_utc();

    let mut views = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let mut flights = Vec::with_capacity(booking.flights.len());
        for &flight_id in &booking.flights {
            match repo.find_flight(flight_id).await? {
                Some(flight) => flights.push(flight),
                None => warn!(
                    "Booking {} references missing flight {}",
                    booking.pnr, flight_id
                ),
            }
        }

        let upcoming = flights
            .first()
            .map(|first_leg| scheduling::is_upcoming(first_leg, now))
            .unwrap_or(false);

        views.push(BookingView {
            booking,
            flights,
            upcoming,
        });
    }

    Ok(views)
}
