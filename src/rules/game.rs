//! The game controller.
//!
//! `Game` seats the players, deals rounds, dispatches intents to the round
//! state, scores finished rounds and decides when the game is over. Every
//! accepted intent returns a fresh snapshot redacted for the acting player;
//! every rejected one returns a `RamiError` and leaves the game untouched.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::scoring::{self, RoundSummary};
use super::turn::RoundEvent;
use crate::cards::{CardId, Deck};
use crate::core::{
    ActionKind, ActionRecord, CardGroup, DrawSource, GameRng, IllegalAction, Intent, Player,
    PlayerId, PlayerMap, RamiConfig, RamiError, RoundOutcome, RoundState, Seat, TurnPhase,
    MAX_PLAYERS, MIN_PLAYERS,
};
use crate::melds::MeldId;
use crate::view::{GameSnapshot, PlayerView};

/// Whether the game is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished { winner: PlayerId },
}

#[derive(Clone, Debug)]
pub struct Game {
    config: RamiConfig,
    players: PlayerMap<Player>,
    round: RoundState,
    status: GameStatus,
    rng: GameRng,
    summaries: Vec<RoundSummary>,
    history: Vector<ActionRecord>,
    sequence: u32,
}

impl Game {
    /// Seat a roster and deal the first round.
    pub fn new(roster: Vec<Seat>, config: RamiConfig, seed: u64) -> Result<Self, RamiError> {
        Self::seat(roster, config, seed, None)
    }

    /// Like `new`, but deal the first round from `deck` as given (top
    /// last). Later rounds shuffle as usual. For replays and puzzles.
    pub fn with_deck(
        roster: Vec<Seat>,
        config: RamiConfig,
        seed: u64,
        deck: Deck,
    ) -> Result<Self, RamiError> {
        Self::seat(roster, config, seed, Some(deck))
    }

    fn seat(
        roster: Vec<Seat>,
        config: RamiConfig,
        seed: u64,
        deck: Option<Deck>,
    ) -> Result<Self, RamiError> {
        let count = roster.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(IllegalAction::InvalidRoster { players: count }.into());
        }
        config.validate_for(count)?;

        let players = PlayerMap::from_vec(
            roster
                .into_iter()
                .enumerate()
                .map(|(i, seat)| Player::from_seat(PlayerId::new(i as u8), seat))
                .collect(),
        );
        let mut rng = GameRng::new(seed);
        let first = PlayerId::new(0);
        let round = match deck {
            Some(deck) => RoundState::deal_from(deck, 1, count, first, 1, &config),
            None => RoundState::deal(1, count, first, 1, &config, &mut rng),
        };
        debug!(players = count, seed, "game started");

        Ok(Self {
            config,
            players,
            round,
            status: GameStatus::InProgress,
            rng,
            summaries: Vec::new(),
            history: Vector::new(),
            sequence: 0,
        })
    }

    /// Deal the next round once the current one is over.
    pub fn start_round(&mut self) -> Result<GameSnapshot, RamiError> {
        if let GameStatus::Finished { .. } = self.status {
            return Err(IllegalAction::GameOver.into());
        }
        if !self.round.phase().is_round_over() {
            return Err(IllegalAction::RoundInProgress.into());
        }

        let number = self.round.number() + 1;
        let count = self.players.player_count();
        let first = if self.config.rotate_first_player {
            PlayerId::new(((number - 1) as usize % count) as u8)
        } else {
            PlayerId::new(0)
        };
        let first_turn = self.round.turn() + 1;
        self.round =
            RoundState::deal(number, count, first, first_turn, &self.config, &mut self.rng);
        debug!(round = number, first = %first, "round dealt");
        Ok(self.snapshot(None))
    }

    pub fn draw(
        &mut self,
        player: PlayerId,
        source: DrawSource,
    ) -> Result<GameSnapshot, RamiError> {
        self.apply(Intent::Draw { player, source })
    }

    /// Lay a single new meld.
    pub fn propose_meld(
        &mut self,
        player: PlayerId,
        cards: &[CardId],
    ) -> Result<GameSnapshot, RamiError> {
        self.apply(Intent::propose(player, cards))
    }

    /// Lay several new melds at once; they count together toward the opening.
    pub fn propose_melds(
        &mut self,
        player: PlayerId,
        groups: Vec<CardGroup>,
    ) -> Result<GameSnapshot, RamiError> {
        self.apply(Intent::ProposeMelds { player, groups })
    }

    pub fn extend_meld(
        &mut self,
        player: PlayerId,
        meld: MeldId,
        card: CardId,
    ) -> Result<GameSnapshot, RamiError> {
        self.apply(Intent::ExtendMeld { player, meld, card })
    }

    pub fn discard(
        &mut self,
        player: PlayerId,
        card: CardId,
    ) -> Result<GameSnapshot, RamiError> {
        self.apply(Intent::Discard { player, card })
    }

    pub fn forfeit_forced_draw(&mut self, player: PlayerId) -> Result<GameSnapshot, RamiError> {
        self.apply(Intent::ForfeitForcedDraw { player })
    }

    /// Like `apply`, but reject the intent if the game has moved past
    /// `expected_turn`.
    pub fn apply_at(
        &mut self,
        expected_turn: u32,
        intent: Intent,
    ) -> Result<GameSnapshot, RamiError> {
        if expected_turn != self.round.turn() {
            let err: RamiError = IllegalAction::StaleTurn {
                expected: self.round.turn(),
                actual: expected_turn,
            }
            .into();
            debug!(player = %intent.player(), kind = ?err.kind(), "stale intent rejected");
            return Err(err);
        }
        self.apply(intent)
    }

    /// Validate and apply one intent.
    pub fn apply(&mut self, intent: Intent) -> Result<GameSnapshot, RamiError> {
        let player = intent.player();
        let round = self.round.number();
        let turn = self.round.turn();

        let result = match self.status {
            GameStatus::Finished { .. } => Err(IllegalAction::GameOver.into()),
            GameStatus::InProgress => self.dispatch(&intent),
        };
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                debug!(
                    player = %player,
                    round,
                    turn,
                    action = ?intent.kind(),
                    kind = ?err.kind(),
                    %err,
                    "intent rejected"
                );
                return Err(err);
            }
        };

        debug!(player = %player, round, turn, action = ?intent.kind(), "intent accepted");
        self.history.push_back(ActionRecord {
            round,
            turn,
            sequence: self.sequence,
            intent,
        });
        self.sequence += 1;

        if let RoundEvent::Ended(outcome) = event {
            self.finish_round(outcome);
        }
        Ok(self.snapshot(Some(player)))
    }

    fn dispatch(&mut self, intent: &Intent) -> Result<RoundEvent, RamiError> {
        match intent {
            Intent::Draw { player, source } => self.round.draw(*player, *source, &mut self.rng),
            Intent::ProposeMelds { player, groups } => {
                self.round.propose_melds(*player, groups, &self.config)
            }
            Intent::ExtendMeld { player, meld, card } => {
                self.round.extend_meld(*player, *meld, *card)
            }
            Intent::Discard { player, card } => self.round.discard(*player, *card),
            Intent::ForfeitForcedDraw { player } => self.round.forfeit_forced_draw(*player),
        }
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        let hand_values = PlayerMap::new(self.players.player_count(), |p| {
            scoring::hand_points(self.round.hand(p), &self.config)
        });
        let points = scoring::round_points(outcome, &hand_values, &self.config);
        for (player, added) in points.iter() {
            self.players[player].score += added;
        }
        let totals = self.scores();
        let added: Vec<u32> = points.values().copied().collect();
        let running: Vec<u32> = totals.values().copied().collect();
        info!(round = self.round.number(), ?outcome, ?added, totals = ?running, "round over");

        if let Some(winner) = scoring::game_winner(&totals, self.config.game_over_score) {
            self.status = GameStatus::Finished { winner };
            info!(winner = %winner, rounds = self.round.number(), "game over");
        }
        self.summaries.push(RoundSummary {
            round: self.round.number(),
            outcome,
            points,
            totals,
        });
    }

    /// Game state as seen by `viewer`; `None` shows no hands.
    #[must_use]
    pub fn snapshot(&self, viewer: Option<PlayerId>) -> GameSnapshot {
        GameSnapshot::capture(self, viewer)
    }

    /// What a strategy playing `player` may look at.
    pub fn player_view(&self, player: PlayerId) -> Result<PlayerView, RamiError> {
        if !self.players.contains(player) {
            return Err(IllegalAction::UnknownPlayer(player).into());
        }
        Ok(PlayerView::capture(self, player))
    }

    /// Intent kinds `player` may submit right now.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<ActionKind> {
        match self.status {
            GameStatus::Finished { .. } => Vec::new(),
            GameStatus::InProgress => self.round.legal_actions(player),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RamiConfig {
        &self.config
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        self.round.phase()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.round.current_player()
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.round.turn()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    /// Cumulative scores, lower is better.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.players.map(|_, p| p.score)
    }

    /// Finished rounds, oldest first.
    #[must_use]
    pub fn round_summaries(&self) -> &[RoundSummary] {
        &self.summaries
    }

    /// Accepted intents, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.round.card_count()
    }

    /// True if every card is accounted for exactly once and every table
    /// meld is legal.
    #[must_use]
    pub fn audit(&self) -> bool {
        self.round.audit()
    }
}
