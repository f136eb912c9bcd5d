//! Card locations.
//!
//! ## Key Types
//!
//! - `Zone`: deck, discard pile, a hand, or a table meld
//! - `ZoneManager`: card location tracking and movement

pub mod manager;

pub use manager::{Zone, ZoneManager};
