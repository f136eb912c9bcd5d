//! Intents: the moves a seat can ask the engine to apply.
//!
//! Humans, remote session layers and computer strategies all speak the
//! same vocabulary. The engine validates each intent against the current
//! phase and either applies it whole or rejects it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::CardId;
use crate::melds::MeldId;

/// Card ids forming one proposed meld. Most melds are 3-4 cards.
pub type CardGroup = SmallVec<[CardId; 4]>;

/// Where a draw comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    /// Top of the face-down deck.
    Deck,
    /// Top of the discard pile. The card must then be melded this turn.
    Discard,
}

/// A move requested by a seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Draw { player: PlayerId, source: DrawSource },
    /// Lay one or more new melds at once. Before a player has opened, the
    /// groups together must reach the first-meld threshold.
    ProposeMelds { player: PlayerId, groups: Vec<CardGroup> },
    ExtendMeld { player: PlayerId, meld: MeldId, card: CardId },
    Discard { player: PlayerId, card: CardId },
    /// Give the discard-drawn card back and pass the turn.
    ForfeitForcedDraw { player: PlayerId },
}

impl Intent {
    /// A single-group proposal.
    #[must_use]
    pub fn propose(player: PlayerId, cards: &[CardId]) -> Self {
        Intent::ProposeMelds {
            player,
            groups: vec![SmallVec::from_slice(cards)],
        }
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Intent::Draw { player, .. }
            | Intent::ProposeMelds { player, .. }
            | Intent::ExtendMeld { player, .. }
            | Intent::Discard { player, .. }
            | Intent::ForfeitForcedDraw { player } => *player,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Intent::Draw { .. } => ActionKind::Draw,
            Intent::ProposeMelds { .. } => ActionKind::ProposeMeld,
            Intent::ExtendMeld { .. } => ActionKind::ExtendMeld,
            Intent::Discard { .. } => ActionKind::Discard,
            Intent::ForfeitForcedDraw { .. } => ActionKind::ForfeitForcedDraw,
        }
    }
}

/// Intent type without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Draw,
    ProposeMeld,
    ExtendMeld,
    Discard,
    ForfeitForcedDraw,
}

/// An accepted intent with its position in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub round: u32,
    pub turn: u32,
    /// Order of acceptance across the whole game.
    pub sequence: u32,
    pub intent: Intent,
}
