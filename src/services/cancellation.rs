//! Booking cancellation and seat restoration.

use log::{info, warn};

use super::allocator;
use super::error::{BookingError, BookingResult};
use crate::api::{BookingId, UserId};
use crate::db::repository::FullRepository;
use crate::models::BookingStatus;
use crate::models::Pnr;

/// Outcome of a cancellation, including how far seat restoration got.
#[derive(Debug, Clone)]
pub struct CancellationReport {
    pub booking: BookingId,
    pub pnr: Pnr,
    /// Legs whose seats went back to the available pool
    pub legs_restored: usize,
    /// Legs skipped because the flight was gone or its write failed
    pub legs_skipped: usize,
}

/// Cancel a booking and restore its seats to the flights' available pools.
///
/// The status flip is persisted *first*: once the booking document says
/// `Cancelled` it can never be cancelled again, so restoration runs at most
/// once per booking even if it is interrupted halfway. A restoration that
/// dies mid-way leaves some seats unsold, never double-sold. Restoration is
/// best effort per leg: a leg whose flight document has disappeared, or
/// whose write keeps failing, is logged and skipped without failing the
/// cancellation.
///
/// Seats are restored even when the flight itself has since been cancelled;
/// the pools are a ledger and stay balanced regardless of flight status.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `booking_id` - Booking to cancel
/// * `user` - Requesting user; the lookup is owner-scoped, so another
///   user's booking is indistinguishable from a missing one
///
/// # Returns
/// * `Ok(CancellationReport)` - Status flipped; per-leg restoration counts
/// * `Err(BookingError::BookingNotFound)` - No such booking for this user
/// * `Err(BookingError::AlreadyCancelled)` - Status was already `Cancelled`
/// * `Err(BookingError::Persistence)` - The status flip itself failed; no
///   seats were touched
pub async fn cancel_booking<R>(
    repo: &R,
    booking_id: BookingId,
    user: UserId,
) -> BookingResult<CancellationReport>
where
    R: FullRepository + ?Sized,
{
    let mut booking = repo
        .find_booking_for_user(booking_id, user)
        .await?
        .ok_or(BookingError::BookingNotFound(booking_id))?;

    if booking.status == BookingStatus::Cancelled {
        return Err(BookingError::AlreadyCancelled(booking_id));
    }

    booking.status = BookingStatus::Cancelled;
    repo.save_booking(&booking).await?;

    let mut legs_restored = 0;
    let mut legs_skipped = 0;
    for assignment in &booking.seat_assignments {
        let seats = assignment.numeric_seats();
        match allocator::deallocate(repo, assignment.flight, booking.seat_class, &seats).await {
            Ok(returned) => {
                info!(
                    "Restored {} seat(s) to flight {} for cancelled booking {}",
                    returned, assignment.flight, booking.pnr
                );
                legs_restored += 1;
            }
            Err(BookingError::FlightNotFound(flight_id)) => {
                warn!(
                    "Flight {} no longer exists; skipping seat restoration for booking {}",
                    flight_id, booking.pnr
                );
                legs_skipped += 1;
            }
            Err(err) => {
                warn!(
                    "Failed to restore seats on flight {} for booking {}: {}",
                    assignment.flight, booking.pnr, err
                );
                legs_skipped += 1;
            }
        }
    }

    info!(
        "Booking {} cancelled by user {}: {} leg(s) restored, {} skipped",
        booking.pnr, user, legs_restored, legs_skipped
    );

    Ok(CancellationReport {
        booking: booking_id,
        pnr: booking.pnr,
        legs_restored,
        legs_skipped,
    })
}
