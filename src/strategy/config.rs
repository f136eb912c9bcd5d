//! Heuristic strategy configuration.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Chance of taking an unhelpful discard anyway, to stay unpredictable.
    pub random_discard_draw: f64,

    /// A card with a same-suit neighbour within this many ranks is kept.
    pub dead_card_distance: u8,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            random_discard_draw: 0.3,
            dead_card_distance: 2,
        }
    }
}

impl HeuristicConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probability is clamped to [0, 1].
    #[must_use]
    pub fn with_random_discard_draw(mut self, probability: f64) -> Self {
        self.random_discard_draw = probability.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_dead_card_distance(mut self, distance: u8) -> Self {
        self.dead_card_distance = distance;
        self
    }

    /// Never take an unhelpful discard. Useful for reproducible tests.
    #[must_use]
    pub fn deterministic() -> Self {
        Self::default().with_random_discard_draw(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let config = HeuristicConfig::default();
        assert!((config.random_discard_draw - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.dead_card_distance, 2);

        let config = HeuristicConfig::new()
            .with_random_discard_draw(1.7)
            .with_dead_card_distance(1);
        assert!((config.random_discard_draw - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.dead_card_distance, 1);

        assert_eq!(HeuristicConfig::deterministic().random_discard_draw, 0.0);
    }

    #[test]
    fn test_partial_json() {
        let config: HeuristicConfig = serde_json::from_str(r#"{"dead_card_distance": 3}"#).unwrap();
        assert_eq!(config.dead_card_distance, 3);
        assert!((config.random_discard_draw - 0.3).abs() < f64::EPSILON);
    }
}
