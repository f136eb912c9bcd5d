//! Serializable, per-viewer game snapshots.
//!
//! A snapshot is what a presentation or session layer broadcasts. Each one
//! is redacted for a single viewer: only that viewer's hand is included,
//! other hands appear as counts, and a card drawn from the deck is never
//! named.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::{PhaseKind, PlayerId, PlayerKind, RamiError, RoundOutcome, TurnPhase};
use crate::melds::Meld;
use crate::rules::{Game, GameStatus, RoundSummary};

/// Turn phase with hidden details removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseView {
    AwaitingDraw,
    /// `forced_card` is public: everybody saw it leave the discard pile.
    AwaitingMeldOrDiscard { forced_card: Option<CardId> },
    AwaitingDiscard,
    RoundOver { outcome: RoundOutcome },
}

impl PhaseView {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            PhaseView::AwaitingDraw => PhaseKind::AwaitingDraw,
            PhaseView::AwaitingMeldOrDiscard { .. } => PhaseKind::AwaitingMeldOrDiscard,
            PhaseView::AwaitingDiscard => PhaseKind::AwaitingDiscard,
            PhaseView::RoundOver { .. } => PhaseKind::RoundOver,
        }
    }
}

impl From<&TurnPhase> for PhaseView {
    fn from(phase: &TurnPhase) -> Self {
        match phase {
            TurnPhase::AwaitingDraw => PhaseView::AwaitingDraw,
            TurnPhase::AwaitingMeldOrDiscard { forced_card, .. } => {
                PhaseView::AwaitingMeldOrDiscard {
                    forced_card: *forced_card,
                }
            }
            TurnPhase::AwaitingDiscard { .. } => PhaseView::AwaitingDiscard,
            TurnPhase::RoundOver { outcome } => PhaseView::RoundOver { outcome: *outcome },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub score: u32,
    pub hand_size: usize,
    /// Present only for the viewer's own seat.
    pub hand: Option<Vec<Card>>,
    pub has_opened: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub viewer: Option<PlayerId>,
    pub round: u32,
    /// Increases by one every time a turn passes; see `Game::apply_at`.
    pub turn: u32,
    pub current_player: PlayerId,
    pub phase: PhaseView,
    pub players: Vec<PlayerSnapshot>,
    pub deck_count: usize,
    /// Bottom first.
    pub discard_pile: Vec<Card>,
    pub melds: Vec<Meld>,
    pub status: GameStatus,
    pub last_round: Option<RoundSummary>,
}

impl GameSnapshot {
    pub(crate) fn capture(game: &Game, viewer: Option<PlayerId>) -> Self {
        let round = game.round();
        let players = game
            .players()
            .values()
            .map(|player| {
                let hand = round.hand(player.id);
                PlayerSnapshot {
                    id: player.id,
                    name: player.name.clone(),
                    kind: player.kind,
                    score: player.score,
                    hand_size: hand.len(),
                    hand: (viewer == Some(player.id)).then(|| hand.to_vec()),
                    has_opened: round.has_opened(player.id),
                }
            })
            .collect();

        Self {
            viewer,
            round: round.number(),
            turn: round.turn(),
            current_player: round.current_player(),
            phase: PhaseView::from(round.phase()),
            players,
            deck_count: round.deck_count(),
            discard_pile: round.discard_pile().to_vec(),
            melds: round.melds(),
            status: game.status(),
            last_round: game.round_summaries().last().cloned(),
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The viewer's own hand, if this snapshot has a viewer.
    #[must_use]
    pub fn own_hand(&self) -> Option<&[Card]> {
        let viewer = self.viewer?;
        self.player(viewer)?.hand.as_deref()
    }

    #[must_use]
    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Binary encoding for session synchronization.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RamiError> {
        bincode::serialize(self).map_err(|e| RamiError::Codec(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RamiError> {
        bincode::deserialize(bytes).map_err(|e| RamiError::Codec(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, RamiError> {
        serde_json::to_string(self).map_err(|e| RamiError::Codec(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, RamiError> {
        serde_json::from_str(json).map_err(|e| RamiError::Codec(e.to_string()))
    }
}
