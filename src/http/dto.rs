//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Wire field names are camelCase; dates and times cross the wire as
//! `"YYYY-MM-DD"` / `"HH:MM"` strings. Conversions to and from the domain
//! models live next to each DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{BookingId, FlightId};
use crate::models::{Booking, ContactDetails, Flight, Passenger, SeatPools};
use crate::services::{BookingView, CancellationReport};

// ============================================================================
// Shared pieces
// ============================================================================

/// Passenger as sent and returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDto {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    /// Date of birth as "YYYY-MM-DD"
    pub date_of_birth: chrono::NaiveDate,
}

impl From<PassengerDto> for Passenger {
    fn from(dto: PassengerDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
        }
    }
}

impl From<Passenger> for PassengerDto {
    fn from(passenger: Passenger) -> Self {
        Self {
            first_name: passenger.first_name,
            last_name: passenger.last_name,
            gender: passenger.gender,
            date_of_birth: passenger.date_of_birth,
        }
    }
}

/// Contact details for the person who made the booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetailsDto {
    pub contact_person: String,
    pub country: String,
    pub mobile: String,
    pub email: String,
}

impl From<ContactDetailsDto> for ContactDetails {
    fn from(dto: ContactDetailsDto) -> Self {
        Self {
            contact_person: dto.contact_person,
            country: dto.country,
            mobile: dto.mobile,
            email: dto.email,
        }
    }
}

impl From<ContactDetails> for ContactDetailsDto {
    fn from(details: ContactDetails) -> Self {
        Self {
            contact_person: details.contact_person,
            country: details.country,
            mobile: details.mobile,
            email: details.email,
        }
    }
}

/// Route segment of a flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub start_location: String,
    pub end_location: String,
    /// Distance in kilometers
    pub distance: f64,
    /// Duration as "HH:MM"
    pub duration: String,
}

impl From<crate::models::Route> for RouteDto {
    fn from(route: crate::models::Route) -> Self {
        Self {
            start_location: route.start_location,
            end_location: route.end_location,
            distance: route.distance,
            duration: route.duration,
        }
    }
}

impl From<RouteDto> for crate::models::Route {
    fn from(dto: RouteDto) -> Self {
        Self {
            start_location: dto.start_location,
            end_location: dto.end_location,
            distance: dto.distance,
            duration: dto.duration,
        }
    }
}

/// Per-class seat number lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatPoolsDto {
    pub economy: Vec<u32>,
    pub premium: Vec<u32>,
}

impl From<SeatPools> for SeatPoolsDto {
    fn from(pools: SeatPools) -> Self {
        Self {
            economy: pools.economy,
            premium: pools.premium,
        }
    }
}

// ============================================================================
// Flights
// ============================================================================

/// Flight as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    /// Flight ID
    pub flight_id: i64,
    /// Aircraft registration / tail number
    pub aircraft_number: String,
    pub route: RouteDto,
    /// Departure date as "YYYY-MM-DD"
    pub departure_date: String,
    /// Departure time as "HH:MM"
    pub departure_time: String,
    /// Arrival date as "YYYY-MM-DD", derived from departure plus duration
    pub arrival_date: String,
    /// Arrival time as "HH:MM"
    pub arrival_time: String,
    /// Per-passenger economy fare
    pub economy_price: f64,
    /// Per-passenger premium fare
    pub premium_price: f64,
    /// Flight status: OK, DELAYED or CANCELLED
    pub status: String,
    /// Seats currently sellable, per class
    pub available_seats: SeatPoolsDto,
    /// Seats currently sold, per class
    pub booked_seats: SeatPoolsDto,
}

impl From<Flight> for FlightDto {
    fn from(flight: Flight) -> Self {
        Self {
            flight_id: flight.id.map(FlightId::value).unwrap_or_default(),
            aircraft_number: flight.aircraft_number,
            route: flight.route.into(),
            departure_date: flight.departure_date.format("%Y-%m-%d").to_string(),
            departure_time: flight.departure_time.format("%H:%M").to_string(),
            arrival_date: flight.arrival_date.format("%Y-%m-%d").to_string(),
            arrival_time: flight.arrival_time.format("%H:%M").to_string(),
            economy_price: flight.economy_price,
            premium_price: flight.premium_price,
            status: flight.status.as_str().to_string(),
            available_seats: flight.inventory.available.into(),
            booked_seats: flight.inventory.booked.into(),
        }
    }
}

/// Flight list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightListResponse {
    /// Flights ordered by ID
    pub flights: Vec<FlightDto>,
    /// Total count
    pub total: usize,
}

/// Request body for creating a new flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlightRequest {
    pub aircraft_number: String,
    pub route: RouteDto,
    /// Departure date as "YYYY-MM-DD"
    pub departure_date: String,
    /// Departure time as "HH:MM"
    pub departure_time: String,
    pub economy_price: f64,
    pub premium_price: f64,
    /// Economy seats to put on sale, numbered from 1
    pub economy_seats: u32,
    /// Premium seats to put on sale, numbered from 1
    pub premium_seats: u32,
}

/// Request body for delaying a flight to a new departure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    /// New departure date as "YYYY-MM-DD"
    pub departure_date: String,
    /// New departure time as "HH:MM"
    pub departure_time: String,
}

// ============================================================================
// Bookings
// ============================================================================

/// Request body for creating a booking.
///
/// Every field is optional at the serde level; required-field checks happen
/// in the booking service so that a missing field produces a structured
/// `MISSING_FIELDS` error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Flight IDs in travel order: one for one-way, two for round trips
    #[serde(default)]
    pub flights: Vec<i64>,
    /// Cabin class, e.g. "economy" or "premium"
    #[serde(default)]
    pub seat_class: String,
    #[serde(default)]
    pub passengers: Vec<PassengerDto>,
    #[serde(default)]
    pub contact_details: Option<ContactDetailsDto>,
    /// Client's total price figure, verified server-side
    #[serde(default)]
    pub price: Option<f64>,
}

/// Seats held on one leg of a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignmentDto {
    pub flight: i64,
    pub seat_numbers: Vec<String>,
}

impl From<crate::models::SeatAssignment> for SeatAssignmentDto {
    fn from(assignment: crate::models::SeatAssignment) -> Self {
        Self {
            flight: assignment.flight.value(),
            seat_numbers: assignment.seat_numbers,
        }
    }
}

/// Booking as returned after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Booking ID
    pub booking_id: i64,
    /// Customer-facing locator
    pub pnr: String,
    /// Booking status: CONFIRMED or CANCELLED
    pub status: String,
    pub seat_class: String,
    pub flights: Vec<i64>,
    pub seat_assignments: Vec<SeatAssignmentDto>,
    pub passengers: Vec<PassengerDto>,
    pub contact_details: ContactDetailsDto,
    /// Total price for all passengers and legs
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.id.map(BookingId::value).unwrap_or_default(),
            pnr: booking.pnr.to_string(),
            status: booking.status.as_str().to_string(),
            seat_class: booking.seat_class.as_str().to_string(),
            flights: booking.flights.iter().map(|id| id.value()).collect(),
            seat_assignments: booking
                .seat_assignments
                .into_iter()
                .map(SeatAssignmentDto::from)
                .collect(),
            passengers: booking
                .passengers
                .into_iter()
                .map(PassengerDto::from)
                .collect(),
            contact_details: booking.contact_details.into(),
            price: booking.price,
            created_at: booking.created_at,
        }
    }
}

/// One booking in a user's booking list, with its flights resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummaryDto {
    pub booking_id: i64,
    pub pnr: String,
    pub status: String,
    pub seat_class: String,
    /// Resolved flight documents, in leg order
    pub flights: Vec<FlightDto>,
    pub seat_assignments: Vec<SeatAssignmentDto>,
    pub passengers: Vec<PassengerDto>,
    pub contact_details: ContactDetailsDto,
    pub price: f64,
    /// Whether the first leg departs in the future
    pub upcoming: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BookingView> for BookingSummaryDto {
    fn from(view: BookingView) -> Self {
        let booking = view.booking;
        Self {
            booking_id: booking.id.map(BookingId::value).unwrap_or_default(),
            pnr: booking.pnr.to_string(),
            status: booking.status.as_str().to_string(),
            seat_class: booking.seat_class.as_str().to_string(),
            flights: view.flights.into_iter().map(FlightDto::from).collect(),
            seat_assignments: booking
                .seat_assignments
                .into_iter()
                .map(SeatAssignmentDto::from)
                .collect(),
            passengers: booking
                .passengers
                .into_iter()
                .map(PassengerDto::from)
                .collect(),
            contact_details: booking.contact_details.into(),
            price: booking.price,
            upcoming: view.upcoming,
            created_at: booking.created_at,
        }
    }
}

/// Booking list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    /// Bookings newest first
    pub bookings: Vec<BookingSummaryDto>,
    /// Total count
    pub total: usize,
}

/// Response for a booking cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationResponse {
    pub booking_id: i64,
    pub pnr: String,
    /// Always "CANCELLED"
    pub status: String,
    /// Legs whose seats went back on sale
    pub legs_restored: usize,
    /// Legs skipped because their flight was gone or its write failed
    pub legs_skipped: usize,
    /// Message about the operation
    pub message: String,
}

impl From<CancellationReport> for CancellationResponse {
    fn from(report: CancellationReport) -> Self {
        Self {
            booking_id: report.booking.value(),
            pnr: report.pnr.to_string(),
            status: "CANCELLED".to_string(),
            legs_restored: report.legs_restored,
            legs_skipped: report.legs_skipped,
            message: format!(
                "Booking cancelled; seats restored on {} of {} leg(s)",
                report.legs_restored,
                report.legs_restored + report.legs_skipped
            ),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
