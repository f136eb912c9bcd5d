//! Table melds.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::PlayerId;

/// Set (same rank) or run (same suit, consecutive ranks).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Set,
    Run,
}

/// Identifier of a meld on the table, unique within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeldId(pub u32);

impl MeldId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MeldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Meld({})", self.0)
    }
}

/// A meld as laid on the table.
///
/// Runs are kept in rank order with any joker at the position it stands
/// for; sets are ordered by suit with the joker last.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub id: MeldId,
    pub kind: MeldKind,
    /// The seat that laid it down.
    pub owner: PlayerId,
    pub cards: Vec<Card>,
}

impl Meld {
    /// Point value with jokers valued in context.
    #[must_use]
    pub fn points(&self) -> u32 {
        super::validator::group_points(self.kind, &self.cards)
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
