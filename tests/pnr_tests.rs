//! Locator generation properties.

use std::collections::HashSet;

use proptest::prelude::*;

use skylane::models::{Pnr, PNR_LENGTH};

#[test]
fn test_locators_are_upper_alphanumeric() {
    for _ in 0..100 {
        let pnr = Pnr::generate();
        assert_eq!(pnr.as_str().len(), PNR_LENGTH);
        assert!(pnr
            .as_str()
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}

#[test]
fn test_locators_do_not_collide_over_many_draws() {
    // 10k draws out of a 36^8 keyspace; a collision here means the
    // generator is not using its randomness.
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(Pnr::generate().as_str().to_string()));
    }
}

proptest! {
    #[test]
    fn prop_valid_locator_strings_parse(s in "[A-Z0-9]{8}") {
        let pnr: Pnr = s.parse().unwrap();
        prop_assert_eq!(pnr.as_str(), s.as_str());
    }

    #[test]
    fn prop_wrong_alphabet_is_rejected(s in "[a-z!@# ]{1,12}") {
        prop_assert!(s.parse::<Pnr>().is_err());
    }
}
