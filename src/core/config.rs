//! Rule configuration.
//!
//! `RamiConfig` carries the numeric house rules. Defaults are the standard
//! Tunisian table: 14-card hands, a 51-point opening, elimination at 100.
//! Configs can be built in code with the `with_*` builders or loaded from
//! JSON, where missing fields take their defaults.

use serde::{Deserialize, Serialize};

use super::error::RamiError;
use crate::cards::DECK_SIZE;

/// Fewest seats at a table.
pub const MIN_PLAYERS: usize = 2;

/// Most seats at a table.
pub const MAX_PLAYERS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RamiConfig {
    /// Cards dealt to each player.
    pub hand_size: usize,

    /// Points a player's first melds must reach together.
    pub first_meld_points: u32,

    /// A game ends once someone's total reaches this.
    pub game_over_score: u32,

    /// Multiplier on opponents' hand points after a clean win.
    pub clean_win_multiplier: u32,

    /// Penalty for a joker left in hand at round end.
    pub joker_hand_points: u32,

    /// Move the opening seat one to the left each round.
    pub rotate_first_player: bool,
}

impl Default for RamiConfig {
    fn default() -> Self {
        Self {
            hand_size: 14,
            first_meld_points: 51,
            game_over_score: 100,
            clean_win_multiplier: 2,
            joker_hand_points: 0,
            rotate_first_player: true,
        }
    }
}

impl RamiConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_first_meld_points(mut self, points: u32) -> Self {
        self.first_meld_points = points;
        self
    }

    #[must_use]
    pub fn with_game_over_score(mut self, score: u32) -> Self {
        self.game_over_score = score;
        self
    }

    #[must_use]
    pub fn with_clean_win_multiplier(mut self, multiplier: u32) -> Self {
        self.clean_win_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_joker_hand_points(mut self, points: u32) -> Self {
        self.joker_hand_points = points;
        self
    }

    #[must_use]
    pub fn with_rotate_first_player(mut self, rotate: bool) -> Self {
        self.rotate_first_player = rotate;
        self
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, RamiError> {
        let config: RamiConfig =
            serde_json::from_str(json).map_err(|e| RamiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that do not depend on the number of players.
    pub fn validate(&self) -> Result<(), RamiError> {
        if self.hand_size == 0 {
            return Err(RamiError::InvalidConfig("hand_size must be at least 1".into()));
        }
        if self.game_over_score == 0 {
            return Err(RamiError::InvalidConfig("game_over_score must be at least 1".into()));
        }
        if self.clean_win_multiplier == 0 {
            return Err(RamiError::InvalidConfig("clean_win_multiplier must be at least 1".into()));
        }
        Ok(())
    }

    /// Check that a deal for `players` seats fits in one deck with a card
    /// left over to start the discard pile.
    pub fn validate_for(&self, players: usize) -> Result<(), RamiError> {
        self.validate()?;
        let needed = self.hand_size * players + 1;
        if needed > DECK_SIZE {
            return Err(RamiError::InvalidConfig(format!(
                "{} hands of {} need {} cards, the deck has {}",
                players, self.hand_size, needed, DECK_SIZE
            )));
        }
        Ok(())
    }
}
