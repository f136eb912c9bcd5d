//! Melds: legality predicates, table melds and hand search.
//!
//! ## Key Types
//!
//! - `MeldKind`: set or run
//! - `Meld`: a group laid on the table, with its owner
//! - `Candidate`: a legal group found in a hand
//!
//! The validator functions are pure and never look at game state.

pub mod meld;
pub mod search;
pub mod validator;

pub use meld::{Meld, MeldId, MeldKind};
pub use search::{
    candidate_runs, candidate_sets, candidates, candidates_preferring, find_meld_with, find_opening,
    meldable_cards, Candidate,
};
pub use validator::{
    arrange, can_extend_meld, check_extension, classify, group_points, is_valid_run, is_valid_set,
    validate, validate_run, validate_set, RunSpan, MAX_JOKERS_PER_MELD, MAX_SET_SIZE, MIN_MELD_SIZE,
};
