//! The information a computer player is allowed to see.

use crate::cards::{Card, CardId};
use crate::core::{PlayerId, TurnPhase};
use crate::melds::Meld;
use crate::rules::Game;

/// Where the viewing player stands in the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStage {
    /// Someone else's turn.
    Waiting,
    Draw,
    MeldOrDiscard { forced_card: Option<CardId> },
    /// Already melded this turn; only more melds or the discard remain.
    Discard,
    RoundOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpponentView {
    pub id: PlayerId,
    pub hand_size: usize,
    pub has_opened: bool,
    pub score: u32,
}

/// One player's view of the table: their own hand plus public state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub player: PlayerId,
    pub stage: TurnStage,
    pub hand: Vec<Card>,
    pub has_opened: bool,
    pub first_meld_points: u32,
    pub discard_top: Option<Card>,
    pub discard_count: usize,
    pub deck_count: usize,
    pub melds: Vec<Meld>,
    pub opponents: Vec<OpponentView>,
}

impl PlayerView {
    pub(crate) fn capture(game: &Game, player: PlayerId) -> Self {
        let round = game.round();
        let stage = match round.phase() {
            TurnPhase::RoundOver { .. } => TurnStage::RoundOver,
            _ if round.current_player() != player => TurnStage::Waiting,
            TurnPhase::AwaitingDraw => TurnStage::Draw,
            TurnPhase::AwaitingMeldOrDiscard { forced_card, .. } => TurnStage::MeldOrDiscard {
                forced_card: *forced_card,
            },
            TurnPhase::AwaitingDiscard { .. } => TurnStage::Discard,
        };

        let opponents = game
            .players()
            .values()
            .filter(|p| p.id != player)
            .map(|p| OpponentView {
                id: p.id,
                hand_size: round.hand(p.id).len(),
                has_opened: round.has_opened(p.id),
                score: p.score,
            })
            .collect();

        Self {
            player,
            stage,
            hand: round.hand(player).to_vec(),
            has_opened: round.has_opened(player),
            first_meld_points: game.config().first_meld_points,
            discard_top: round.discard_top().copied(),
            discard_count: round.discard_pile().len(),
            deck_count: round.deck_count(),
            melds: round.melds(),
            opponents,
        }
    }

    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        !matches!(self.stage, TurnStage::Waiting | TurnStage::RoundOver)
    }

    #[must_use]
    pub fn hand_card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }
}
