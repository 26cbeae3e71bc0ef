//! Booking repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{BookingId, UserId};
use crate::models::Booking;

/// Repository trait for booking database operations.
///
/// Bookings are written once after their seats are secured and afterwards
/// only change status, so a plain last-write save is sufficient here; the
/// versioned compare-and-swap lives on the flight side where the contended
/// inventory is.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new booking.
    ///
    /// The booking's `id` is assigned by the store. The PNR must be unique
    /// across all stored bookings.
    ///
    /// # Arguments
    /// * `booking` - The booking to store
    ///
    /// # Returns
    /// * `Ok(Booking)` - The stored booking with its assigned ID
    /// * `Err(RepositoryError::ValidationError)` - If the PNR is already taken
    /// * `Err(RepositoryError)` - If the operation fails
    async fn insert_booking(&self, booking: Booking) -> RepositoryResult<Booking>;

    /// Retrieve a booking by ID, scoped to its owner.
    ///
    /// Ownership is part of the lookup predicate: a booking that exists but
    /// belongs to a different user comes back as `Ok(None)`, exactly like a
    /// booking that does not exist.
    ///
    /// # Arguments
    /// * `booking_id` - The ID of the booking to retrieve
    /// * `user` - The requesting user
    ///
    /// # Returns
    /// * `Ok(Some(Booking))` - The booking, if it exists and is owned by `user`
    /// * `Ok(None)` - If there is no such booking for this user
    /// * `Err(RepositoryError)` - If the operation fails
    async fn find_booking_for_user(
        &self,
        booking_id: BookingId,
        user: UserId,
    ) -> RepositoryResult<Option<Booking>>;

    /// List all bookings belonging to a user, newest first.
    ///
    /// Ordering is by creation time descending (ties broken by ID
    /// descending), so the most recent reservation is always first.
    ///
    /// # Arguments
    /// * `user` - The owning user
    ///
    /// # Returns
    /// * `Ok(Vec<Booking>)` - The user's bookings, newest first
    /// * `Err(RepositoryError)` - If the operation fails
    async fn bookings_for_user(&self, user: UserId) -> RepositoryResult<Vec<Booking>>;

    /// Persist a mutated booking.
    ///
    /// # Arguments
    /// * `booking` - The mutated booking; must already have an ID
    ///
    /// # Returns
    /// * `Ok(())` - If the booking was updated
    /// * `Err(RepositoryError::NotFound)` - If no booking has this ID
    /// * `Err(RepositoryError)` - If the operation fails
    async fn save_booking(&self, booking: &Booking) -> RepositoryResult<()>;
}
