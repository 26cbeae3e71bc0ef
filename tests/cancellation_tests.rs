//! Booking cancellation and seat restoration flows.

mod support;

use skylane::api::{BookingId, UserId};
use skylane::db::repositories::LocalRepository;
use skylane::db::repository::FlightRepository;
use skylane::models::{BookingStatus, CabinClass, FlightStatus};
use skylane::services::{self, BookingError};

use support::{booking_request, seed_flight};

#[tokio::test]
async fn test_cancel_restores_every_leg() {
    let repo = LocalRepository::new();
    let outbound = seed_flight(&repo, 4, 0).await;
    let inbound = seed_flight(&repo, 4, 0).await;
    let user = UserId::new(1);

    let booking = services::create_booking(
        &repo,
        user,
        booking_request(&[outbound, inbound], 2, 480.0),
    )
    .await
    .unwrap();

    let report = services::cancel_booking(&repo, booking.id.unwrap(), user)
        .await
        .unwrap();
    assert_eq!(report.booking, booking.id.unwrap());
    assert_eq!(report.pnr, booking.pnr);
    assert_eq!(report.legs_restored, 2);
    assert_eq!(report.legs_skipped, 0);

    for id in [outbound, inbound] {
        let flight = repo.find_flight(id).await.unwrap().unwrap();
        assert_eq!(
            flight.inventory.available(CabinClass::Economy),
            &[1, 2, 3, 4]
        );
        assert!(flight.inventory.booked(CabinClass::Economy).is_empty());
    }

    let views = services::user_bookings(&repo, user).await.unwrap();
    assert_eq!(views[0].booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_returns_exactly_the_booked_seats() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo, 5, 0).await;

    let first = services::create_booking(
        &repo,
        UserId::new(1),
        booking_request(&[flight_id], 2, 240.0),
    )
    .await
    .unwrap();
    services::create_booking(
        &repo,
        UserId::new(2),
        booking_request(&[flight_id], 2, 240.0),
    )
    .await
    .unwrap();

    services::cancel_booking(&repo, first.id.unwrap(), UserId::new(1))
        .await
        .unwrap();

    // The first booking held [1, 2]; the second still holds [3, 4].
    let flight = repo.find_flight(flight_id).await.unwrap().unwrap();
    assert_eq!(flight.inventory.available(CabinClass::Economy), &[1, 2, 5]);
    assert_eq!(flight.inventory.booked(CabinClass::Economy), &[3, 4]);
}

#[tokio::test]
async fn test_second_cancel_is_rejected_and_cannot_steal_resold_seats() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo, 2, 0).await;
    let user = UserId::new(1);

    let booking = services::create_booking(&repo, user, booking_request(&[flight_id], 2, 240.0))
        .await
        .unwrap();
    services::cancel_booking(&repo, booking.id.unwrap(), user)
        .await
        .unwrap();

    // Someone else buys the freed seats.
    services::create_booking(
        &repo,
        UserId::new(2),
        booking_request(&[flight_id], 2, 240.0),
    )
    .await
    .unwrap();

    let err = services::cancel_booking(&repo, booking.id.unwrap(), user)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AlreadyCancelled(id) if id == booking.id.unwrap()));

    // The resold seats stay booked.
    let flight = repo.find_flight(flight_id).await.unwrap().unwrap();
    assert!(flight.inventory.available(CabinClass::Economy).is_empty());
    assert_eq!(flight.inventory.booked(CabinClass::Economy), &[1, 2]);
}

#[tokio::test]
async fn test_cancel_requires_an_owned_booking() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo, 4, 0).await;
    let owner = UserId::new(1);

    let booking = services::create_booking(&repo, owner, booking_request(&[flight_id], 1, 120.0))
        .await
        .unwrap();

    // Unknown ID.
    let err = services::cancel_booking(&repo, BookingId::new(404), owner)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound(_)));

    // Someone else's booking looks exactly like a missing one.
    let err = services::cancel_booking(&repo, booking.id.unwrap(), UserId::new(2))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::BookingNotFound(_)));

    let views = services::user_bookings(&repo, owner).await.unwrap();
    assert_eq!(views[0].booking.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_cancel_skips_a_leg_whose_flight_is_gone() {
    let repo = LocalRepository::new();
    let outbound = seed_flight(&repo, 4, 0).await;
    let inbound = seed_flight(&repo, 4, 0).await;
    let user = UserId::new(1);

    let booking = services::create_booking(
        &repo,
        user,
        booking_request(&[outbound, inbound], 1, 240.0),
    )
    .await
    .unwrap();
    assert!(repo.remove_flight(inbound));

    let report = services::cancel_booking(&repo, booking.id.unwrap(), user)
        .await
        .unwrap();
    assert_eq!(report.legs_restored, 1);
    assert_eq!(report.legs_skipped, 1);

    let flight = repo.find_flight(outbound).await.unwrap().unwrap();
    assert_eq!(
        flight.inventory.available(CabinClass::Economy),
        &[1, 2, 3, 4]
    );

    let views = services::user_bookings(&repo, user).await.unwrap();
    assert_eq!(views[0].booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_flips_status_even_when_restoration_fails() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo, 4, 0).await;
    let user = UserId::new(1);

    let booking = services::create_booking(&repo, user, booking_request(&[flight_id], 2, 240.0))
        .await
        .unwrap();

    repo.set_fail_flight_writes(true);
    let report = services::cancel_booking(&repo, booking.id.unwrap(), user)
        .await
        .unwrap();
    assert_eq!(report.legs_restored, 0);
    assert_eq!(report.legs_skipped, 1);
    repo.set_fail_flight_writes(false);

    // Seats stayed booked, but the booking is gone for good.
    let flight = repo.find_flight(flight_id).await.unwrap().unwrap();
    assert_eq!(flight.inventory.booked(CabinClass::Economy), &[1, 2]);

    let err = services::cancel_booking(&repo, booking.id.unwrap(), user)
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AlreadyCancelled(_)));
}

#[tokio::test]
async fn test_seats_restore_into_a_cancelled_flight() {
    let repo = LocalRepository::new();
    let flight_id = seed_flight(&repo, 3, 0).await;
    let user = UserId::new(1);

    let booking = services::create_booking(&repo, user, booking_request(&[flight_id], 1, 120.0))
        .await
        .unwrap();
    services::cancel_flight(&repo, flight_id).await.unwrap();

    // The pools are a ledger; flight status does not block restoration.
    let report = services::cancel_booking(&repo, booking.id.unwrap(), user)
        .await
        .unwrap();
    assert_eq!(report.legs_restored, 1);

    let flight = repo.find_flight(flight_id).await.unwrap().unwrap();
    assert_eq!(flight.status, FlightStatus::Cancelled);
    assert_eq!(flight.inventory.available(CabinClass::Economy), &[1, 2, 3]);
    assert!(flight.inventory.booked(CabinClass::Economy).is_empty());
}
