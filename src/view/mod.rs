//! What the engine shows the outside world.
//!
//! - `GameSnapshot`: serializable, redacted per viewer, returned by every
//!   accepted intent
//! - `PlayerView`: the input a `Strategy` decides from

pub mod player_view;
pub mod snapshot;

pub use player_view::{OpponentView, PlayerView, TurnStage};
pub use snapshot::{GameSnapshot, PhaseView, PlayerSnapshot};
