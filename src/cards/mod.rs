//! Card and deck model.
//!
//! ## Key Types
//!
//! - `Card`: immutable identity (id, suit, rank, joker flag)
//! - `CardId`: unique id within one deck instance
//! - `Deck`: the 108-card double deck (2 x 52 + 4 jokers)

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Rank, Suit};
pub use deck::{build_deck, shuffle, Deck, DECK_SIZE, JOKER_COUNT};
