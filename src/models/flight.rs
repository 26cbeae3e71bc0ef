//! Flight domain model and per-class seat inventory.
//!
//! A [`Flight`] document carries two mirrored seat pools per cabin class:
//! `available` (sellable) and `booked` (sold). Every seat number lives in
//! exactly one of the two pools at any time, and the union of both pools is
//! the fixed set of physical seats the flight was created with. All seat
//! movement goes through [`SeatInventory::reserve`] and
//! [`SeatInventory::release`] so that this conservation property cannot be
//! broken by callers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::FlightId;

// ============================================================================
// Cabin class
// ============================================================================

/// Cabin class a seat pool belongs to.
///
/// The set of classes is closed. Free-text class keys from clients are parsed
/// through [`FromStr`] (case-insensitive) and rejected before they reach the
/// inventory layer, so the pools never grow an unrecognized key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    Economy,
    Premium,
}

impl CabinClass {
    /// Canonical lowercase name, matching the JSON representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::Premium => "premium",
        }
    }
}

impl FromStr for CabinClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Ok(CabinClass::Economy),
            "premium" => Ok(CabinClass::Premium),
            _ => Err(format!("Unknown cabin class: {}", s)),
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Flight status
// ============================================================================

/// Operational status of a flight.
///
/// `Ok -> Delayed` happens on reschedule, `-> Cancelled` on cancellation.
/// `Cancelled` is terminal; no update may leave it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Ok,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Ok => "OK",
            FlightStatus::Delayed => "DELAYED",
            FlightStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Route
// ============================================================================

/// Route flown by a flight, embedded in the flight document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Departure location (airport or city name)
    pub start_location: String,
    /// Arrival location
    pub end_location: String,
    /// Great-circle distance in kilometers
    pub distance: f64,
    /// Flight duration as "HH:MM"; hours may exceed 23 for long-haul routes
    pub duration: String,
}

// ============================================================================
// Seat inventory
// ============================================================================

/// Error raised when an inventory operation cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// The available pool holds fewer seats than requested.
    #[error("not enough {class} seats: requested {requested}, available {available}")]
    Insufficient {
        class: CabinClass,
        requested: usize,
        available: usize,
    },
}

/// One seat-number list per cabin class.
///
/// A pool key missing from a stored document is treated as an empty list, so
/// flights created before a class existed keep deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPools {
    #[serde(default)]
    pub economy: Vec<u32>,
    #[serde(default)]
    pub premium: Vec<u32>,
}

impl SeatPools {
    pub fn pool(&self, class: CabinClass) -> &[u32] {
        match class {
            CabinClass::Economy => &self.economy,
            CabinClass::Premium => &self.premium,
        }
    }

    pub fn pool_mut(&mut self, class: CabinClass) -> &mut Vec<u32> {
        match class {
            CabinClass::Economy => &mut self.economy,
            CabinClass::Premium => &mut self.premium,
        }
    }

    /// Total seats across both classes.
    pub fn total(&self) -> usize {
        self.economy.len() + self.premium.len()
    }
}

/// Mirrored available/booked seat pools for one flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInventory {
    /// Seats currently sellable, in allocation order
    #[serde(default)]
    pub available: SeatPools,
    /// Seats currently sold
    #[serde(default)]
    pub booked: SeatPools,
}

impl SeatInventory {
    /// Create a full inventory with seats numbered `1..=n` per class, all
    /// available and none booked.
    ///
    /// # Arguments
    /// * `economy_seats` - Number of economy seats on the aircraft
    /// * `premium_seats` - Number of premium seats on the aircraft
    pub fn with_counts(economy_seats: u32, premium_seats: u32) -> Self {
        Self {
            available: SeatPools {
                economy: (1..=economy_seats).collect(),
                premium: (1..=premium_seats).collect(),
            },
            booked: SeatPools::default(),
        }
    }

    /// Seats currently available in the given class, in allocation order.
    pub fn available(&self, class: CabinClass) -> &[u32] {
        self.available.pool(class)
    }

    /// Seats currently booked in the given class.
    pub fn booked(&self, class: CabinClass) -> &[u32] {
        self.booked.pool(class)
    }

    /// Number of seats still sellable in the given class.
    pub fn seats_left(&self, class: CabinClass) -> usize {
        self.available.pool(class).len()
    }

    /// Move `count` seats from the available pool to the booked pool.
    ///
    /// Seats are taken from the front of the available list, so allocation is
    /// deterministic for a given pool state: the reserved block is always a
    /// prefix of the stored order. The check and the move are a single
    /// in-memory step; nothing is removed if the pool is short.
    ///
    /// # Returns
    /// The reserved seat numbers, in the order they were taken.
    pub fn reserve(&mut self, class: CabinClass, count: usize) -> Result<Vec<u32>, InventoryError> {
        let available = self.available.pool_mut(class);
        if available.len() < count {
            return Err(InventoryError::Insufficient {
                class,
                requested: count,
                available: available.len(),
            });
        }

        let reserved: Vec<u32> = available.drain(..count).collect();
        self.booked.pool_mut(class).extend_from_slice(&reserved);
        Ok(reserved)
    }

    /// Return previously booked seats to the available pool.
    ///
    /// The available list is re-sorted ascending afterwards, so released
    /// seats merge back into numeric order rather than appending at the end.
    /// Seat numbers already present in the available pool are skipped, which
    /// keeps the pool duplicate-free even if a release is replayed.
    ///
    /// # Returns
    /// How many seats were actually moved back.
    pub fn release(&mut self, class: CabinClass, seats: &[u32]) -> usize {
        let available = self.available.pool_mut(class);
        let mut returned = 0;
        for &seat in seats {
            if !available.contains(&seat) {
                available.push(seat);
                returned += 1;
            }
        }
        available.sort_unstable();

        self.booked
            .pool_mut(class)
            .retain(|seat| !seats.contains(seat));

        returned
    }
}

// ============================================================================
// Flight
// ============================================================================

/// A scheduled flight with embedded route, fares, and seat inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Database identifier; `None` until the flight is first stored
    pub id: Option<FlightId>,
    /// Aircraft registration / tail number
    pub aircraft_number: String,
    pub route: Route,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    /// Derived from departure plus route duration; never set directly
    pub arrival_date: NaiveDate,
    pub arrival_time: NaiveTime,
    /// Per-passenger economy fare, positive
    pub economy_price: f64,
    /// Per-passenger premium fare, positive
    pub premium_price: f64,
    pub inventory: SeatInventory,
    pub status: FlightStatus,
    /// Optimistic-concurrency stamp, bumped by the store on every save
    #[serde(default)]
    pub version: u64,
}

impl Flight {
    /// Per-passenger fare for the given cabin class.
    pub fn fare(&self, class: CabinClass) -> f64 {
        match class {
            CabinClass::Economy => self.economy_price,
            CabinClass::Premium => self.premium_price,
        }
    }

    /// Departure as a single naive timestamp.
    pub fn departure_instant(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.departure_time)
    }

    /// Arrival as a single naive timestamp.
    pub fn arrival_instant(&self) -> NaiveDateTime {
        self.arrival_date.and_time(self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inventory(economy: u32, premium: u32) -> SeatInventory {
        SeatInventory::with_counts(economy, premium)
    }

    /// Available and booked pools for one class must stay disjoint and
    /// together hold every original seat exactly once.
    fn assert_conserved(inv: &SeatInventory, class: CabinClass, expected_total: usize) {
        let mut all: Vec<u32> = inv
            .available(class)
            .iter()
            .chain(inv.booked(class).iter())
            .copied()
            .collect();
        all.sort_unstable();
        let before = all.len();
        all.dedup();
        assert_eq!(before, all.len(), "seat number appears in both pools");
        assert_eq!(all.len(), expected_total, "seat count not conserved");
    }

    #[test]
    fn test_with_counts_seeds_full_pools() {
        let inv = inventory(3, 2);
        assert_eq!(inv.available(CabinClass::Economy), &[1, 2, 3]);
        assert_eq!(inv.available(CabinClass::Premium), &[1, 2]);
        assert!(inv.booked(CabinClass::Economy).is_empty());
        assert!(inv.booked(CabinClass::Premium).is_empty());
    }

    #[test]
    fn test_reserve_takes_prefix_of_pool() {
        let mut inv = inventory(5, 0);
        let seats = inv.reserve(CabinClass::Economy, 3).unwrap();
        assert_eq!(seats, vec![1, 2, 3]);
        assert_eq!(inv.available(CabinClass::Economy), &[4, 5]);
        assert_eq!(inv.booked(CabinClass::Economy), &[1, 2, 3]);
        assert_conserved(&inv, CabinClass::Economy, 5);
    }

    #[test]
    fn test_reserve_prefix_holds_for_gappy_pools() {
        // A pool mid-life is rarely contiguous; stored order still rules.
        let mut inv = SeatInventory {
            available: SeatPools {
                economy: vec![3, 5, 7, 9],
                premium: vec![],
            },
            booked: SeatPools::default(),
        };
        let seats = inv.reserve(CabinClass::Economy, 2).unwrap();
        assert_eq!(seats, vec![3, 5]);
        assert_eq!(inv.available(CabinClass::Economy), &[7, 9]);
        assert_eq!(inv.booked(CabinClass::Economy), &[3, 5]);
    }

    #[test]
    fn test_reserve_insufficient_leaves_pools_untouched() {
        let mut inv = inventory(2, 0);
        let err = inv.reserve(CabinClass::Economy, 3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::Insufficient {
                class: CabinClass::Economy,
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(inv.available(CabinClass::Economy), &[1, 2]);
        assert!(inv.booked(CabinClass::Economy).is_empty());
    }

    #[test]
    fn test_reserve_zero_seats_is_a_no_op() {
        let mut inv = inventory(2, 0);
        let seats = inv.reserve(CabinClass::Economy, 0).unwrap();
        assert!(seats.is_empty());
        assert_eq!(inv.available(CabinClass::Economy), &[1, 2]);
    }

    #[test]
    fn test_reserve_from_empty_class_pool() {
        let mut inv = inventory(4, 0);
        let err = inv.reserve(CabinClass::Premium, 1).unwrap_err();
        assert_eq!(
            err,
            InventoryError::Insufficient {
                class: CabinClass::Premium,
                requested: 1,
                available: 0,
            }
        );
    }

    #[test]
    fn test_release_merges_back_in_sorted_order() {
        let mut inv = inventory(5, 0);
        let seats = inv.reserve(CabinClass::Economy, 3).unwrap();
        let returned = inv.release(CabinClass::Economy, &seats);
        assert_eq!(returned, 3);
        assert_eq!(inv.available(CabinClass::Economy), &[1, 2, 3, 4, 5]);
        assert!(inv.booked(CabinClass::Economy).is_empty());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut inv = inventory(4, 0);
        let seats = inv.reserve(CabinClass::Economy, 2).unwrap();
        assert_eq!(inv.release(CabinClass::Economy, &seats), 2);
        // Replaying the same release must not duplicate seat numbers.
        assert_eq!(inv.release(CabinClass::Economy, &seats), 0);
        assert_eq!(inv.available(CabinClass::Economy), &[1, 2, 3, 4]);
        assert_conserved(&inv, CabinClass::Economy, 4);
    }

    #[test]
    fn test_classes_do_not_share_seats() {
        let mut inv = inventory(3, 3);
        inv.reserve(CabinClass::Economy, 2).unwrap();
        assert_eq!(inv.available(CabinClass::Premium), &[1, 2, 3]);
        assert!(inv.booked(CabinClass::Premium).is_empty());
        assert_conserved(&inv, CabinClass::Economy, 3);
        assert_conserved(&inv, CabinClass::Premium, 3);
    }

    #[test]
    fn test_missing_pool_key_deserializes_as_empty() {
        // Older flight documents may lack a class key entirely.
        let json = r#"{"available": {"economy": [1, 2]}, "booked": {}}"#;
        let inv: SeatInventory = serde_json::from_str(json).unwrap();
        assert_eq!(inv.available(CabinClass::Economy), &[1, 2]);
        assert!(inv.available(CabinClass::Premium).is_empty());
        assert!(inv.booked(CabinClass::Economy).is_empty());
    }

    #[test]
    fn test_cabin_class_parses_case_insensitively() {
        assert_eq!("economy".parse::<CabinClass>(), Ok(CabinClass::Economy));
        assert_eq!("Premium".parse::<CabinClass>(), Ok(CabinClass::Premium));
        assert_eq!(" ECONOMY ".parse::<CabinClass>(), Ok(CabinClass::Economy));
        assert!("business".parse::<CabinClass>().is_err());
        assert!("".parse::<CabinClass>().is_err());
    }

    #[test]
    fn test_flight_status_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&FlightStatus::Delayed).unwrap(),
            "\"DELAYED\""
        );
        let status: FlightStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, FlightStatus::Cancelled);
    }

    proptest! {
        /// Any interleaving of reserves and full releases preserves the pool:
        /// no seat duplicated, no seat lost, and finally everything is back.
        #[test]
        fn prop_reserve_release_conserves_seats(
            pool_size in 1u32..40,
            takes in prop::collection::vec(1usize..6, 0..8),
        ) {
            let mut inv = inventory(pool_size, 0);
            let mut blocks: Vec<Vec<u32>> = Vec::new();

            for take in takes {
                if let Ok(seats) = inv.reserve(CabinClass::Economy, take) {
                    prop_assert_eq!(seats.len(), take);
                    blocks.push(seats);
                }
                assert_conserved(&inv, CabinClass::Economy, pool_size as usize);
            }

            for block in blocks.iter().rev() {
                inv.release(CabinClass::Economy, block);
                assert_conserved(&inv, CabinClass::Economy, pool_size as usize);
            }

            let expected: Vec<u32> = (1..=pool_size).collect();
            prop_assert_eq!(inv.available(CabinClass::Economy), expected.as_slice());
            prop_assert!(inv.booked(CabinClass::Economy).is_empty());
        }
    }
}
