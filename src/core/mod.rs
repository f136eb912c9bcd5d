//! Core engine types: players, RNG, configuration, intents, phases, errors
//! and the per-round state.

pub mod action;
pub mod config;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionKind, ActionRecord, CardGroup, DrawSource, Intent};
pub use config::{RamiConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{EmptyResource, ErrorKind, IllegalAction, MeldRejection, RamiError};
pub use phase::{PhaseKind, RoundOutcome, TurnContext, TurnPhase};
pub use player::{Player, PlayerId, PlayerKind, PlayerMap, Seat};
pub use rng::{GameRng, GameRngState};
pub use state::{MeldEntry, RoundState};
