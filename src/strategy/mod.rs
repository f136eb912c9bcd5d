//! Computer players.
//!
//! A `Strategy` turns a `PlayerView` into intents. It sees only what the
//! seat it plays may see, keeps no memory between calls, and takes its
//! randomness from the caller so every decision is reproducible.
//!
//! `play_turn` drives one full turn through the same `Game::apply`
//! contract a human's intents go through. Any "thinking" delay belongs to
//! the caller.

pub mod config;
pub mod heuristic;

pub use config::HeuristicConfig;
pub use heuristic::HeuristicStrategy;

use tracing::debug;

use crate::cards::CardId;
use crate::core::{DrawSource, GameRng, Intent, RamiError};
use crate::rules::Game;
use crate::view::{PlayerView, TurnStage};

/// Upper bound on intents in one turn: a draw, one meld, one discard.
const MAX_TURN_STEPS: usize = 8;

pub trait Strategy: Send + Sync {
    /// Pick the draw source. Only called at the start of the seat's turn.
    fn choose_draw(&self, view: &PlayerView, rng: &mut GameRng) -> DrawSource;

    /// The meld action to take now, or `None` to move on. With a pending
    /// `forced_card`, the returned intent must use it.
    fn choose_meld(
        &self,
        view: &PlayerView,
        forced_card: Option<CardId>,
        rng: &mut GameRng,
    ) -> Option<Intent>;

    /// The card to discard.
    fn choose_discard(&self, view: &PlayerView, rng: &mut GameRng) -> Option<CardId>;

    /// Next intent for the viewing seat, or `None` if it has nothing to do.
    fn next_intent(&self, view: &PlayerView, rng: &mut GameRng) -> Option<Intent> {
        let player = view.player;
        match view.stage {
            TurnStage::Waiting | TurnStage::RoundOver => None,
            TurnStage::Draw => Some(Intent::Draw {
                player,
                source: self.choose_draw(view, rng),
            }),
            TurnStage::MeldOrDiscard { forced_card: Some(card) } => Some(
                self.choose_meld(view, Some(card), rng)
                    .unwrap_or(Intent::ForfeitForcedDraw { player }),
            ),
            TurnStage::MeldOrDiscard { forced_card: None } => {
                self.choose_meld(view, None, rng).or_else(|| {
                    self.choose_discard(view, rng)
                        .map(|card| Intent::Discard { player, card })
                })
            }
            TurnStage::Discard => self
                .choose_discard(view, rng)
                .map(|card| Intent::Discard { player, card }),
        }
    }
}

/// Play the current seat's turn with `strategy`.
///
/// Returns the applied intents. Stops when the turn passes, the round
/// ends, or the strategy has nothing more to do. A rejected intent is
/// returned as the error, with the game left as it was before that intent.
pub fn play_turn(
    game: &mut Game,
    strategy: &dyn Strategy,
    rng: &mut GameRng,
) -> Result<Vec<Intent>, RamiError> {
    let player = game.current_player();
    let round = game.round().number();
    let mut applied = Vec::new();

    for _ in 0..MAX_TURN_STEPS {
        let view = game.player_view(player)?;
        let Some(intent) = strategy.next_intent(&view, rng) else {
            break;
        };
        game.apply(intent.clone())?;
        applied.push(intent);

        if game.phase().is_round_over()
            || game.current_player() != player
            || game.round().number() != round
        {
            break;
        }
    }
    debug!(player = %player, intents = applied.len(), "computer turn played");
    Ok(applied)
}
