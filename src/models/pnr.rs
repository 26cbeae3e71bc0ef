//! Passenger Name Record (PNR) locator codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Locator length used across the platform.
pub const PNR_LENGTH: usize = 8;

const PNR_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Eight-character booking locator over the uppercase A-Z0-9 alphabet.
///
/// Locators are derived from a v4 UUID, giving a 36^8 keyspace (~2.8e12).
/// Collisions are treated as negligible; the store still enforces uniqueness
/// as a backstop and there is no retry-on-collision logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pnr(String);

impl Pnr {
    /// Generate a fresh random locator.
    ///
    /// The UUID's 128 random bits are mapped into the 36-letter alphabet one
    /// base-36 digit at a time, so every alphabet character is (near)
    /// uniformly likely at every position.
    pub fn generate() -> Self {
        let mut bits = Uuid::new_v4().as_u128();
        let mut code = String::with_capacity(PNR_LENGTH);
        for _ in 0..PNR_LENGTH {
            let index = (bits % PNR_ALPHABET.len() as u128) as usize;
            code.push(PNR_ALPHABET[index] as char);
            bits /= PNR_ALPHABET.len() as u128;
        }
        Pnr(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Pnr {
    type Err = String;

    /// Accept an existing locator, validating length and alphabet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != PNR_LENGTH {
            return Err(format!(
                "PNR must be exactly {} characters, got {}",
                PNR_LENGTH,
                s.len()
            ));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(format!("PNR may only contain A-Z and 0-9: {}", s));
        }
        Ok(Pnr(s.to_string()))
    }
}

impl fmt::Display for Pnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
