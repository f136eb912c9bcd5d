//! Typed rejections.
//!
//! Every engine entry point returns `Result<_, RamiError>`. A rejection
//! leaves the game exactly as it was; the caller maps `RamiError::kind()`
//! to whatever message its players should see.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ActionKind;
use super::phase::PhaseKind;
use super::player::PlayerId;
use crate::cards::CardId;
use crate::melds::MeldId;

/// Flat classification of a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    IllegalAction,
    InvalidMeld,
    InsufficientMeldValue,
    ForcedCardUnused,
    UnknownCardOrMeld,
    EmptyResource,
    Configuration,
}

/// Action attempted by the wrong seat, in the wrong phase, or at the wrong time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },
    #[error("{action:?} is not allowed while {phase:?}")]
    WrongPhase { action: ActionKind, phase: PhaseKind },
    #[error("intent targets turn {actual} but the game is on turn {expected}")]
    StaleTurn { expected: u32, actual: u32 },
    #[error("{meld} belongs to {owner}; lay an opening meld before touching other melds")]
    MeldNotOwned { meld: MeldId, owner: PlayerId },
    #[error("the round is over")]
    RoundOver,
    #[error("the current round has not finished")]
    RoundInProgress,
    #[error("the game is over")]
    GameOver,
    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),
    #[error("a game needs 2 to 4 players, got {players}")]
    InvalidRoster { players: usize },
}

/// Why a group of cards is not a legal meld.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MeldRejection {
    #[error("a meld needs at least 3 cards, got {0}")]
    TooFewCards(usize),
    #[error("a meld may hold one joker, got {0}")]
    TooManyJokers(usize),
    #[error("{0} appears more than once")]
    DuplicateCard(CardId),
    #[error("the cards form neither a set nor a run")]
    NotASetOrRun,
    #[error("{0} does not extend the meld")]
    CannotExtend(CardId),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EmptyResource {
    #[error("the discard pile is empty")]
    DiscardPile,
    #[error("the deck is empty")]
    Deck,
}

/// Engine error type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RamiError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    #[error("invalid meld: {0}")]
    InvalidMeld(#[from] MeldRejection),

    #[error("first meld must be worth at least {required} points, got {actual}")]
    InsufficientMeldValue { required: u32, actual: u32 },

    #[error("{card} was taken from the discard pile and must be melded first")]
    ForcedCardUnused { card: CardId },

    #[error("{0} is not where the action expects it")]
    UnknownCard(CardId),

    #[error("{0} is not on the table")]
    UnknownMeld(MeldId),

    #[error("{0}")]
    EmptyResource(#[from] EmptyResource),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot codec: {0}")]
    Codec(String),
}

impl RamiError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RamiError::IllegalAction(_) => ErrorKind::IllegalAction,
            RamiError::InvalidMeld(_) => ErrorKind::InvalidMeld,
            RamiError::InsufficientMeldValue { .. } => ErrorKind::InsufficientMeldValue,
            RamiError::ForcedCardUnused { .. } => ErrorKind::ForcedCardUnused,
            RamiError::UnknownCard(_) | RamiError::UnknownMeld(_) => ErrorKind::UnknownCardOrMeld,
            RamiError::EmptyResource(_) => ErrorKind::EmptyResource,
            RamiError::InvalidConfig(_) | RamiError::Codec(_) => ErrorKind::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err: RamiError = IllegalAction::RoundOver.into();
        assert_eq!(err.kind(), ErrorKind::IllegalAction);

        let err: RamiError = MeldRejection::NotASetOrRun.into();
        assert_eq!(err.kind(), ErrorKind::InvalidMeld);

        assert_eq!(RamiError::UnknownMeld(MeldId::new(3)).kind(), ErrorKind::UnknownCardOrMeld);
        assert_eq!(RamiError::UnknownCard(CardId::new(3)).kind(), ErrorKind::UnknownCardOrMeld);
    }

    #[test]
    fn test_messages() {
        let err = RamiError::InsufficientMeldValue { required: 51, actual: 21 };
        assert_eq!(err.to_string(), "first meld must be worth at least 51 points, got 21");

        let err: RamiError = EmptyResource::DiscardPile.into();
        assert_eq!(err.to_string(), "the discard pile is empty");

        // The opening threshold is configurable, so the message names no number.
        let err: RamiError = IllegalAction::MeldNotOwned {
            meld: MeldId::new(2),
            owner: PlayerId::new(1),
        }
        .into();
        let message = err.to_string();
        assert!(message.contains("lay an opening meld"));
        assert!(!message.contains("51"));
    }
}
