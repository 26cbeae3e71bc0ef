//! Flight repository trait.
//!
//! This trait defines the store operations for flight documents, including
//! the versioned save that seat allocation depends on.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::FlightId;
use crate::models::Flight;

/// Repository trait for flight database operations.
///
/// Flights carry their full seat inventory, so every seat movement is a
/// read-modify-write of one flight document. [`save_flight`] is a
/// compare-and-swap on the flight's version stamp; callers that lose the swap
/// get a retryable [`Conflict`] error and are expected to reload and retry.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
///
/// [`save_flight`]: FlightRepository::save_flight
/// [`Conflict`]: super::error::RepositoryError::Conflict
#[async_trait]
pub trait FlightRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Flight Operations ====================

    /// Store a new flight.
    ///
    /// The flight's `id` and `version` are assigned by the store; whatever
    /// the caller put in those fields is overwritten.
    ///
    /// # Arguments
    /// * `flight` - The flight to store, including its seeded seat inventory
    ///
    /// # Returns
    /// * `Ok(Flight)` - The stored flight with assigned ID and version 0
    /// * `Err(RepositoryError)` - If the operation fails
    async fn insert_flight(&self, flight: Flight) -> RepositoryResult<Flight>;

    /// Retrieve a flight by ID.
    ///
    /// # Arguments
    /// * `flight_id` - The ID of the flight to retrieve
    ///
    /// # Returns
    /// * `Ok(Some(Flight))` - The flight if it exists
    /// * `Ok(None)` - If no flight has this ID
    /// * `Err(RepositoryError)` - If the operation fails
    async fn find_flight(&self, flight_id: FlightId) -> RepositoryResult<Option<Flight>>;

    /// List all flights.
    ///
    /// # Returns
    /// * `Ok(Vec<Flight>)` - All stored flights, ordered by ID
    /// * `Err(RepositoryError)` - If the operation fails
    async fn list_flights(&self) -> RepositoryResult<Vec<Flight>>;

    /// Persist a mutated flight, guarded by its version stamp.
    ///
    /// The write only succeeds if `flight.version` still matches the stored
    /// version; the store then bumps the version by one. A mismatch means a
    /// concurrent writer got there first.
    ///
    /// # Arguments
    /// * `flight` - The mutated flight, carrying the version it was read at
    ///
    /// # Returns
    /// * `Ok(Flight)` - The stored flight with its new version stamp
    /// * `Err(RepositoryError::Conflict)` - If the version stamp is stale
    /// * `Err(RepositoryError::NotFound)` - If the flight does not exist
    /// * `Err(RepositoryError)` - If the operation fails
    async fn save_flight(&self, flight: &Flight) -> RepositoryResult<Flight>;
}
