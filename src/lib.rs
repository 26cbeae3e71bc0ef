//! # Skylane Booking Engine
//!
//! Seat inventory and booking-consistency core for a flight booking platform.
//!
//! This crate owns the two invariants the rest of the platform leans on: a seat
//! is never sold twice, and every cancelled booking returns its seats to the
//! sellable pool. Around that core it provides multi-leg booking orchestration
//! with rollback, PNR generation, flight schedule management, and a REST API
//! via Axum for the customer-facing frontend.
//!
//! ## Features
//!
//! - **Seat Allocation**: Deterministic front-of-pool allocation per cabin class
//! - **Booking Orchestration**: Multi-leg reservations with compensating rollback
//! - **Cancellation**: Seat restoration that keeps inventory totals conserved
//! - **Scheduling**: Arrival derivation from route duration and delay/cancel flow
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes shared across all layers
//! - [`models`]: Domain types (flights, seat inventory, bookings, PNRs)
//! - [`db`]: Repository pattern and persistence layer
//! - [`services`]: Booking, cancellation, and scheduling orchestration
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
