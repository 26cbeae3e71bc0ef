//! Shared helpers for the integration test suite.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};

use skylane::api::{BookingId, FlightId, UserId};
use skylane::db::repositories::LocalRepository;
use skylane::db::repository::{
    BookingRepository, FlightRepository, RepositoryError, RepositoryResult,
};
use skylane::models::{
    Booking, BookingStatus, CabinClass, ContactDetails, Flight, FlightStatus, Passenger, Route,
    SeatInventory,
};
use skylane::services::BookingRequest;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

/// A flight departing well in the future, with full seat pools.
pub fn test_flight(economy: u32, premium: u32) -> Flight {
    Flight {
        id: None,
        aircraft_number: "SK-101".to_string(),
        route: Route {
            start_location: "Oslo".to_string(),
            end_location: "Rome".to_string(),
            distance: 2010.0,
            duration: "02:30".to_string(),
        },
        departure_date: date(2030, 5, 1),
        departure_time: time(9, 0),
        arrival_date: date(2030, 5, 1),
        arrival_time: time(11, 30),
        economy_price: 120.0,
        premium_price: 260.0,
        inventory: SeatInventory::with_counts(economy, premium),
        status: FlightStatus::Ok,
        version: 0,
    }
}

/// Insert a fresh flight and return its assigned ID.
pub async fn seed_flight(repo: &LocalRepository, economy: u32, premium: u32) -> FlightId {
    let stored = repo
        .insert_flight(test_flight(economy, premium))
        .await
        .unwrap();
    stored.id.unwrap()
}

pub fn passenger(first: &str, last: &str) -> Passenger {
    Passenger {
        first_name: first.to_string(),
        last_name: last.to_string(),
        gender: "female".to_string(),
        date_of_birth: date(1990, 12, 10),
    }
}

pub fn contact() -> ContactDetails {
    ContactDetails {
        contact_person: "Ada Lovelace".to_string(),
        country: "UK".to_string(),
        mobile: "+44 20 7946 0000".to_string(),
        email: "ada@example.com".to_string(),
    }
}

/// A valid economy booking request; tests knock out fields to probe
/// validation.
pub fn booking_request(flights: &[FlightId], passengers: usize, price: f64) -> BookingRequest {
    BookingRequest {
        flights: flights.to_vec(),
        seat_class: "economy".to_string(),
        passengers: (0..passengers)
            .map(|i| passenger(&format!("Passenger{}", i + 1), "Traveller"))
            .collect(),
        contact_details: Some(contact()),
        price: Some(price),
    }
}

/// A confirmed booking document for direct repository tests.
pub fn test_booking(user: UserId, flights: &[FlightId], pnr: &str) -> Booking {
    Booking {
        id: None,
        pnr: pnr.parse().unwrap(),
        user,
        flights: flights.to_vec(),
        seat_class: CabinClass::Economy,
        seat_assignments: vec![],
        passengers: vec![passenger("Ada", "Lovelace")],
        contact_details: contact(),
        price: 120.0,
        status: BookingStatus::Confirmed,
        created_at: Utc::now(),
    }
}

/// Repository wrapper that fails the next N flight saves with a version
/// conflict before delegating to the wrapped store.
///
/// This makes the compare-and-swap retry path deterministic: a real conflict
/// needs two racing writers, while this wrapper loses a chosen number of
/// rounds on demand.
pub struct FlakySaveRepository {
    inner: LocalRepository,
    conflicts_remaining: AtomicUsize,
}

impl FlakySaveRepository {
    pub fn conflicting(inner: LocalRepository, conflicts: usize) -> Self {
        Self {
            inner,
            conflicts_remaining: AtomicUsize::new(conflicts),
        }
    }
}

#[async_trait]
impl FlightRepository for FlakySaveRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.inner.health_check().await
    }

    async fn insert_flight(&self, flight: Flight) -> RepositoryResult<Flight> {
        self.inner.insert_flight(flight).await
    }

    async fn find_flight(&self, flight_id: FlightId) -> RepositoryResult<Option<Flight>> {
        self.inner.find_flight(flight_id).await
    }

    async fn list_flights(&self) -> RepositoryResult<Vec<Flight>> {
        self.inner.list_flights().await
    }

    async fn save_flight(&self, flight: &Flight) -> RepositoryResult<Flight> {
        let injected = self
            .conflicts_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(RepositoryError::conflict("Simulated concurrent update"));
        }
        self.inner.save_flight(flight).await
    }
}

#[async_trait]
impl BookingRepository for FlakySaveRepository {
    async fn insert_booking(&self, booking: Booking) -> RepositoryResult<Booking> {
        self.inner.insert_booking(booking).await
    }

    async fn find_booking_for_user(
        &self,
        booking_id: BookingId,
        user: UserId,
    ) -> RepositoryResult<Option<Booking>> {
        self.inner.find_booking_for_user(booking_id, user).await
    }

    async fn bookings_for_user(&self, user: UserId) -> RepositoryResult<Vec<Booking>> {
        self.inner.bookings_for_user(user).await
    }

    async fn save_booking(&self, booking: &Booking) -> RepositoryResult<()> {
        self.inner.save_booking(booking).await
    }
}
