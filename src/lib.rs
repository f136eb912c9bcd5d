//! # rami-engine
//!
//! A rules engine for Tunisian Rami, a rummy played with two 52-card decks
//! and four jokers.
//!
//! ## Design Principles
//!
//! 1. **Validate, then commit**: every intent is checked in full before any
//!    state changes. A rejection returns a typed `RamiError` and leaves the
//!    game exactly as it was.
//!
//! 2. **Phases carry their data**: the turn phase is a tagged union, so a
//!    pending discard-drawn card or the draw source only exist while they
//!    mean something.
//!
//! 3. **Injected randomness**: the deal, reshuffles and computer decisions
//!    all draw from seeded `GameRng`s, so any game replays from its seeds.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, intents, phases, errors, round state
//! - `cards`: suits, ranks, cards and the 108-card deck
//! - `zones`: where every card is (deck, discard pile, hands, melds)
//! - `melds`: set/run validation, joker valuation, candidate search
//! - `rules`: turn transitions, scoring, and the `Game` controller
//! - `view`: per-viewer snapshots and the strategy's `PlayerView`
//! - `strategy`: computer players
//!
//! ## Example
//!
//! ```
//! use rami_engine::{DrawSource, Game, RamiConfig, Seat};
//!
//! let roster = vec![Seat::human("Amel"), Seat::computer("Bot")];
//! let mut game = Game::new(roster, RamiConfig::default(), 7).unwrap();
//!
//! let me = game.current_player();
//! let snapshot = game.draw(me, DrawSource::Deck).unwrap();
//! assert_eq!(snapshot.own_hand().map(|h| h.len()), Some(15));
//! ```

pub mod cards;
pub mod core;
pub mod melds;
pub mod rules;
pub mod strategy;
pub mod view;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, ActionRecord, CardGroup, DrawSource, EmptyResource, ErrorKind, GameRng,
    GameRngState, IllegalAction, Intent, MeldRejection, PhaseKind, Player, PlayerId, PlayerKind,
    PlayerMap, RamiConfig, RamiError, RoundOutcome, RoundState, Seat, TurnPhase, MAX_PLAYERS,
    MIN_PLAYERS,
};

pub use crate::cards::{build_deck, shuffle, Card, CardId, Deck, Rank, Suit, DECK_SIZE};

pub use crate::melds::{is_valid_run, is_valid_set, Meld, MeldId, MeldKind};

pub use crate::rules::{Game, GameStatus, RoundSummary};

pub use crate::view::{GameSnapshot, PhaseView, PlayerSnapshot, PlayerView, TurnStage};

pub use crate::strategy::{play_turn, HeuristicConfig, HeuristicStrategy, Strategy};

pub use crate::zones::{Zone, ZoneManager};
