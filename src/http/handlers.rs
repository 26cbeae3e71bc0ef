//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! booking and scheduling services for business logic. Handlers only
//! translate between wire DTOs and domain types.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};

use super::auth::UserContext;
use super::dto::{
    BookingListResponse, BookingResponse, BookingSummaryDto, CancellationResponse,
    CreateBookingRequest, CreateFlightRequest, FlightDto, FlightListResponse, HealthResponse,
    RescheduleRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{BookingId, FlightId};
use crate::db::repository::FlightRepository;
use crate::services::{self, BookingError, BookingRequest, NewFlight};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Parse a wire date of the form "YYYY-MM-DD".
fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", value)))
}

/// Parse a wire time of the form "HH:MM".
fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| AppError::BadRequest(format!("Invalid time '{}': expected HH:MM", value)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Bookings
// =============================================================================

/// POST /v1/bookings
///
/// Create a booking across one or more flights for the authenticated user.
/// Seats are allocated on every leg or on none.
pub async fn create_booking(
    State(state): State<AppState>,
    user: UserContext,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking_request = BookingRequest {
        flights: request.flights.into_iter().map(FlightId::new).collect(),
        seat_class: request.seat_class,
        passengers: request.passengers.into_iter().map(Into::into).collect(),
        contact_details: request.contact_details.map(Into::into),
        price: request.price,
    };

    let booking =
        services::create_booking(state.repository.as_ref(), user.user, booking_request).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// GET /v1/bookings
///
/// List the authenticated user's bookings, newest first, with their flights
/// resolved.
pub async fn list_bookings(
    State(state): State<AppState>,
    user: UserContext,
) -> HandlerResult<BookingListResponse> {
    let views = services::user_bookings(state.repository.as_ref(), user.user).await?;

    let bookings: Vec<BookingSummaryDto> = views.into_iter().map(Into::into).collect();
    let total = bookings.len();

    Ok(Json(BookingListResponse { bookings, total }))
}

/// POST /v1/bookings/{booking_id}/cancel
///
/// Cancel one of the authenticated user's bookings and restore its seats.
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: UserContext,
    Path(booking_id): Path<i64>,
) -> HandlerResult<CancellationResponse> {
    let report = services::cancel_booking(
        state.repository.as_ref(),
        BookingId::new(booking_id),
        user.user,
    )
    .await?;

    Ok(Json(CancellationResponse::from(report)))
}

// =============================================================================
// Flights
// =============================================================================

/// GET /v1/flights
///
/// List all flights, ordered by ID.
pub async fn list_flights(State(state): State<AppState>) -> HandlerResult<FlightListResponse> {
    let flights = state.repository.list_flights().await?;

    let flight_dtos: Vec<FlightDto> = flights.into_iter().map(Into::into).collect();
    let total = flight_dtos.len();

    Ok(Json(FlightListResponse {
        flights: flight_dtos,
        total,
    }))
}

/// GET /v1/flights/{flight_id}
///
/// Get a single flight with its current seat pools.
pub async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> HandlerResult<FlightDto> {
    let flight_id = FlightId::new(flight_id);
    let flight = state
        .repository
        .find_flight(flight_id)
        .await?
        .ok_or(BookingError::FlightNotFound(flight_id))?;

    Ok(Json(FlightDto::from(flight)))
}

/// POST /v1/flights
///
/// Create a flight. The arrival is derived from the departure and route
/// duration, and the seat pools are seeded full.
pub async fn create_flight(
    State(state): State<AppState>,
    Json(request): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<FlightDto>), AppError> {
    let new_flight = NewFlight {
        aircraft_number: request.aircraft_number,
        route: request.route.into(),
        departure_date: parse_date(&request.departure_date)?,
        departure_time: parse_time(&request.departure_time)?,
        economy_price: request.economy_price,
        premium_price: request.premium_price,
        economy_seats: request.economy_seats,
        premium_seats: request.premium_seats,
    };

    let flight = services::create_flight(state.repository.as_ref(), new_flight).await?;

    Ok((StatusCode::CREATED, Json(FlightDto::from(flight))))
}

/// PATCH /v1/flights/{flight_id}/schedule
///
/// Delay a flight to a strictly later departure. The flight is marked
/// DELAYED and its arrival is re-derived.
pub async fn reschedule_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
    Json(request): Json<RescheduleRequest>,
) -> HandlerResult<FlightDto> {
    let new_date = parse_date(&request.departure_date)?;
    let new_time = parse_time(&request.departure_time)?;

    let flight = services::reschedule_flight(
        state.repository.as_ref(),
        FlightId::new(flight_id),
        new_date,
        new_time,
    )
    .await?;

    Ok(Json(FlightDto::from(flight)))
}

/// POST /v1/flights/{flight_id}/cancel
///
/// Cancel a flight. Cancellation is terminal; existing bookings keep their
/// seats until they are cancelled themselves.
pub async fn cancel_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> HandlerResult<FlightDto> {
    let flight =
        services::cancel_flight(state.repository.as_ref(), FlightId::new(flight_id)).await?;

    Ok(Json(FlightDto::from(flight)))
}
