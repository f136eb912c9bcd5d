//! Round scoring and the game-over test.
//!
//! Scores are penalty points: lower is better. The round winner takes 0;
//! everyone else takes the value of the cards left in their hand.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{PlayerId, PlayerMap, RamiConfig, RoundOutcome};

/// Penalty value of a hand.
#[must_use]
pub fn hand_points(hand: &[Card], config: &RamiConfig) -> u32 {
    hand.iter()
        .map(|card| {
            if card.is_joker {
                config.joker_hand_points
            } else {
                card.points()
            }
        })
        .sum()
}

/// Points each player takes for a finished round.
///
/// A clean win multiplies every opponent's hand value. An exhausted round
/// charges every player their hand value.
#[must_use]
pub fn round_points(
    outcome: RoundOutcome,
    hand_values: &PlayerMap<u32>,
    config: &RamiConfig,
) -> PlayerMap<u32> {
    match outcome {
        RoundOutcome::Won { winner, clean } => hand_values.map(|player, &value| {
            if player == winner {
                0
            } else if clean {
                value * config.clean_win_multiplier
            } else {
                value
            }
        }),
        RoundOutcome::Exhausted => hand_values.clone(),
    }
}

/// The game winner once anyone has reached `threshold`: the unique lowest
/// total. A tie for lowest means the game goes on.
#[must_use]
pub fn game_winner(totals: &PlayerMap<u32>, threshold: u32) -> Option<PlayerId> {
    if !totals.values().any(|&score| score >= threshold) {
        return None;
    }
    let lowest = *totals.values().min()?;
    let mut leaders = totals.iter().filter(|(_, score)| **score == lowest);
    let (winner, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(winner)
}

/// Result of one finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub outcome: RoundOutcome,
    /// Points taken this round.
    pub points: PlayerMap<u32>,
    /// Totals after this round.
    pub totals: PlayerMap<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Rank, Suit};

    fn card(id: u8, rank: Rank) -> Card {
        Card::standard(CardId::new(id), Suit::Spades, rank)
    }

    #[test]
    fn test_hand_points() {
        let config = RamiConfig::default();
        let hand = [
            card(0, Rank::Ace),
            card(1, Rank::Seven),
            card(2, Rank::King),
            Card::joker(CardId::new(104), Suit::Hearts),
        ];
        assert_eq!(hand_points(&hand, &config), 18);
        assert_eq!(hand_points(&hand, &config.clone().with_joker_hand_points(30)), 48);
        assert_eq!(hand_points(&[], &config), 0);
    }

    #[test]
    fn test_round_points_plain_win() {
        let values = PlayerMap::from_vec(vec![0, 12, 30]);
        let points = round_points(
            RoundOutcome::Won { winner: PlayerId::new(0), clean: false },
            &values,
            &RamiConfig::default(),
        );
        assert_eq!(points.values().copied().collect::<Vec<_>>(), vec![0, 12, 30]);
    }

    #[test]
    fn test_round_points_clean_win_doubles() {
        let values = PlayerMap::from_vec(vec![15, 0, 7]);
        let points = round_points(
            RoundOutcome::Won { winner: PlayerId::new(1), clean: true },
            &values,
            &RamiConfig::default(),
        );
        assert_eq!(points.values().copied().collect::<Vec<_>>(), vec![30, 0, 14]);
    }

    #[test]
    fn test_round_points_exhausted() {
        let values = PlayerMap::from_vec(vec![15, 22]);
        let points = round_points(RoundOutcome::Exhausted, &values, &RamiConfig::default());
        assert_eq!(points, values);
    }

    #[test]
    fn test_game_winner() {
        assert_eq!(game_winner(&PlayerMap::from_vec(vec![40, 99]), 100), None);
        assert_eq!(
            game_winner(&PlayerMap::from_vec(vec![40, 100, 60]), 100),
            Some(PlayerId::new(0))
        );
        // tie for lowest keeps the game going
        assert_eq!(game_winner(&PlayerMap::from_vec(vec![50, 120, 50]), 100), None);
    }
}
