//! Turn phases.
//!
//! ```text
//! AwaitingDraw ──draw──▶ AwaitingMeldOrDiscard ──meld/extend──▶ AwaitingDiscard
//!      ▲                        │   │                          │  (more melds)
//!      │                        │   └─forfeit (discard draw)──┐│
//!      └──────────── discard ───┴─────────────────────────────┴┘
//!
//! any hand reaching zero cards, or an empty deck with nothing to
//! reshuffle ──▶ RoundOver
//! ```
//!
//! Each phase carries only the fields valid in it.

use serde::{Deserialize, Serialize};

use super::action::DrawSource;
use super::player::PlayerId;
use crate::cards::CardId;

/// What the current player did at the start of this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    pub source: DrawSource,
    pub drawn: CardId,
    /// Whether the player had opened before this turn began. A player who
    /// goes out without having opened earns a clean win.
    pub opened_at_start: bool,
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won { winner: PlayerId, clean: bool },
    /// Deck empty and nothing to reshuffle; nobody went out.
    Exhausted,
}

impl RoundOutcome {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            RoundOutcome::Won { winner, .. } => Some(*winner),
            RoundOutcome::Exhausted => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingDraw,
    AwaitingMeldOrDiscard {
        turn: TurnContext,
        /// Set after a discard-pile draw until that card is melded.
        forced_card: Option<CardId>,
    },
    AwaitingDiscard {
        turn: TurnContext,
    },
    RoundOver {
        outcome: RoundOutcome,
    },
}

impl TurnPhase {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            TurnPhase::AwaitingDraw => PhaseKind::AwaitingDraw,
            TurnPhase::AwaitingMeldOrDiscard { .. } => PhaseKind::AwaitingMeldOrDiscard,
            TurnPhase::AwaitingDiscard { .. } => PhaseKind::AwaitingDiscard,
            TurnPhase::RoundOver { .. } => PhaseKind::RoundOver,
        }
    }

    #[must_use]
    pub fn forced_card(&self) -> Option<CardId> {
        match self {
            TurnPhase::AwaitingMeldOrDiscard { forced_card, .. } => *forced_card,
            _ => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self {
            TurnPhase::RoundOver { outcome } => Some(*outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        matches!(self, TurnPhase::RoundOver { .. })
    }
}

/// Phase tag without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    AwaitingDraw,
    AwaitingMeldOrDiscard,
    AwaitingDiscard,
    RoundOver,
}
