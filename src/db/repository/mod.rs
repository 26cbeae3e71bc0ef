//! Repository trait definitions for database operations.
//!
//! This module provides a collection of focused repository traits that
//! abstract store operations. By splitting responsibilities across multiple
//! traits, implementations can be more focused and testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`flight`]: Flight documents and versioned inventory writes
//! - [`booking`]: Booking documents and owner-scoped lookups
//!
//! # Trait Composition
//!
//! A complete repository implementation typically implements all traits:
//!
//! ```ignore
//! impl FlightRepository for MyRepo { ... }
//! impl BookingRepository for MyRepo { ... }
//! ```
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> Result<()> {
//!     // Can use any repository method
//!     let flight = repo.find_flight(flight_id).await?;
//!     repo.insert_booking(booking).await?;
//!     Ok(())
//! }
//! ```

pub mod booking;
pub mod error;
pub mod flight;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use booking::BookingRepository;
pub use flight::FlightRepository;

/// Composite trait bound for a complete repository implementation.
///
/// This trait is automatically implemented for any type that implements
/// both repository traits. Use this as a convenient bound when you need
/// access to all repository operations.
///
/// # Example
///
/// ```ignore
/// async fn confirm<R: FullRepository + ?Sized>(
///     repo: &R,
///     booking: Booking,
/// ) -> RepositoryResult<Booking> {
///     // Can use all repository methods
///     repo.insert_booking(booking).await
/// }
/// ```
pub trait FullRepository: FlightRepository + BookingRepository {}

// Blanket implementation: any type implementing both traits automatically implements FullRepository
impl<T> FullRepository for T where T: FlightRepository + BookingRepository {}
