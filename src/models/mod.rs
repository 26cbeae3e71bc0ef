pub mod booking;
pub mod flight;
pub mod pnr;

pub use booking::*;
pub use flight::*;
pub use pnr::*;
