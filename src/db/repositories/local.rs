//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap structures, providing fast, deterministic, and
//! isolated execution.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::api::{BookingId, FlightId, UserId};
use crate::db::repository::*;
use crate::models::{Booking, Flight};

/// In-memory local repository.
///
/// This implementation stores all data in memory behind a single `RwLock`,
/// making it ideal for unit tests and local development that need isolation
/// and speed. The versioned flight save behaves exactly like a remote
/// document store's compare-and-swap, so the concurrency behavior services
/// are written against can be exercised without a database.
///
/// # Example
/// ```ignore
/// use skylane::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// let stored = repo.insert_flight(flight).await?;
/// assert_eq!(stored.version, 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    flights: HashMap<i64, Flight>,
    bookings: HashMap<i64, Booking>,

    // PNR uniqueness index
    pnrs: HashSet<String>,

    // ID counters
    next_flight_id: i64,
    next_booking_id: i64,

    // Connection health and per-collection write failure injection
    is_healthy: bool,
    fail_flight_writes: bool,
    fail_booking_writes: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            flights: HashMap::new(),
            bookings: HashMap::new(),
            pnrs: HashSet::new(),
            next_flight_id: 1,
            next_booking_id: 1,
            is_healthy: true,
            fail_flight_writes: false,
            fail_booking_writes: false,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write();
        data.is_healthy = healthy;
    }

    /// Make every flight write fail, for testing rollback paths.
    pub fn set_fail_flight_writes(&self, fail: bool) {
        let mut data = self.data.write();
        data.fail_flight_writes = fail;
    }

    /// Make every booking write fail, for testing rollback paths.
    pub fn set_fail_booking_writes(&self, fail: bool) {
        let mut data = self.data.write();
        data.fail_booking_writes = fail;
    }

    /// Clear all data from the repository, keeping the health flags.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            fail_flight_writes: data.fail_flight_writes,
            fail_booking_writes: data.fail_booking_writes,
            ..Default::default()
        };
    }

    /// Get the number of flights stored.
    pub fn flight_count(&self) -> usize {
        self.data.read().flights.len()
    }

    /// Get the number of bookings stored.
    pub fn booking_count(&self) -> usize {
        self.data.read().bookings.len()
    }

    /// Remove a flight document entirely, for testing dangling references.
    pub fn remove_flight(&self, flight_id: FlightId) -> bool {
        let mut data = self.data.write();
        data.flights.remove(&flight_id.value()).is_some()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read();
        if !data.is_healthy {
            return Err(RepositoryError::connection("Store is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlightRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read();
        Ok(data.is_healthy)
    }

    async fn insert_flight(&self, mut flight: Flight) -> RepositoryResult<Flight> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.fail_flight_writes {
            return Err(RepositoryError::query_with_context(
                "Simulated flight write failure",
                ErrorContext::new("insert_flight").with_entity("flight"),
            ));
        }

        let id = data.next_flight_id;
        data.next_flight_id += 1;
        flight.id = Some(FlightId::new(id));
        flight.version = 0;
        data.flights.insert(id, flight.clone());

        Ok(flight)
    }

    async fn find_flight(&self, flight_id: FlightId) -> RepositoryResult<Option<Flight>> {
        let data = self.data.read();
        Ok(data.flights.get(&flight_id.value()).cloned())
    }

    async fn list_flights(&self) -> RepositoryResult<Vec<Flight>> {
        let data = self.data.read();
        let mut flights: Vec<Flight> = data.flights.values().cloned().collect();
        flights.sort_by_key(|flight| flight.id);
        Ok(flights)
    }

    async fn save_flight(&self, flight: &Flight) -> RepositoryResult<Flight> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.fail_flight_writes {
            return Err(RepositoryError::query_with_context(
                "Simulated flight write failure",
                ErrorContext::new("save_flight").with_entity("flight"),
            ));
        }

        let id = flight.id.ok_or_else(|| {
            RepositoryError::validation_with_context(
                "Cannot save a flight without an ID",
                ErrorContext::new("save_flight").with_entity("flight"),
            )
        })?;

        let stored = data.flights.get(&id.value()).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Flight {} not found", id),
                ErrorContext::new("save_flight")
                    .with_entity("flight")
                    .with_entity_id(id),
            )
        })?;

        if stored.version != flight.version {
            return Err(RepositoryError::conflict_with_context(
                format!(
                    "Flight {} was updated concurrently (read at version {}, stored is {})",
                    id, flight.version, stored.version
                ),
                ErrorContext::new("save_flight")
                    .with_entity("flight")
                    .with_entity_id(id),
            ));
        }

        let mut updated = flight.clone();
        updated.version += 1;
        data.flights.insert(id.value(), updated.clone());

        Ok(updated)
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn insert_booking(&self, mut booking: Booking) -> RepositoryResult<Booking> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.fail_booking_writes {
            return Err(RepositoryError::query_with_context(
                "Simulated booking write failure",
                ErrorContext::new("insert_booking").with_entity("booking"),
            ));
        }

        if !data.pnrs.insert(booking.pnr.as_str().to_string()) {
            return Err(RepositoryError::validation_with_context(
                format!("PNR {} is already in use", booking.pnr),
                ErrorContext::new("insert_booking").with_entity("booking"),
            ));
        }

        let id = data.next_booking_id;
        data.next_booking_id += 1;
        booking.id = Some(BookingId::new(id));
        data.bookings.insert(id, booking.clone());

        Ok(booking)
    }

    async fn find_booking_for_user(
        &self,
        booking_id: BookingId,
        user: UserId,
    ) -> RepositoryResult<Option<Booking>> {
        let data = self.data.read();
        Ok(data
            .bookings
            .get(&booking_id.value())
            .filter(|booking| booking.user == user)
            .cloned())
    }

    async fn bookings_for_user(&self, user: UserId) -> RepositoryResult<Vec<Booking>> {
        let data = self.data.read();
        let mut bookings: Vec<Booking> = data
            .bookings
            .values()
            .filter(|booking| booking.user == user)
            .cloned()
            .collect();
        // Newest first
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(bookings)
    }

    async fn save_booking(&self, booking: &Booking) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.fail_booking_writes {
            return Err(RepositoryError::query_with_context(
                "Simulated booking write failure",
                ErrorContext::new("save_booking").with_entity("booking"),
            ));
        }

        let id = booking.id.ok_or_else(|| {
            RepositoryError::validation_with_context(
                "Cannot save a booking without an ID",
                ErrorContext::new("save_booking").with_entity("booking"),
            )
        })?;

        if !data.bookings.contains_key(&id.value()) {
            return Err(RepositoryError::not_found_with_context(
                format!("Booking {} not found", id),
                ErrorContext::new("save_booking")
                    .with_entity("booking")
                    .with_entity_id(id),
            ));
        }

        data.bookings.insert(id.value(), booking.clone());
        Ok(())
    }
}
