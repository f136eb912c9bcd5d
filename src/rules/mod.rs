//! Game rules: turn transitions, scoring, and the game controller.
//!
//! `Game` is the entry point. It owns the current `RoundState` and feeds
//! it intents; the transitions in `turn` do the validation, `scoring`
//! settles finished rounds.

pub mod game;
pub mod scoring;
pub mod turn;

pub use game::{Game, GameStatus};
pub use scoring::{game_winner, hand_points, round_points, RoundSummary};
pub use turn::RoundEvent;
