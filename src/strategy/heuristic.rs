//! A greedy computer player.
//!
//! Draw: take the discard if it completes a set (two other suits of its
//! rank in hand) or a three-card run with same-suit neighbours; otherwise
//! take it at random with a small probability, else draw from the deck.
//!
//! Meld: a discard-drawn card is placed first, or forfeited. Before
//! opening, look for one candidate or a disjoint pair worth the threshold.
//! After opening, lay one set, else one run, else extend one table meld.
//! At most one meld action per turn.
//!
//! Discard: the highest "dead" card (no same-rank partner, no same-suit
//! neighbour within `dead_card_distance`), else the highest non-joker. A
//! joker goes only when nothing else is left.

use rustc_hash::FxHashSet;

use super::config::HeuristicConfig;
use super::Strategy;
use crate::cards::{Card, CardId, Suit};
use crate::core::{CardGroup, DrawSource, GameRng, Intent};
use crate::melds::{
    can_extend_meld, candidate_runs, candidate_sets, find_meld_with, find_opening, Candidate,
};
use crate::view::PlayerView;

#[derive(Clone, Debug, Default)]
pub struct HeuristicStrategy {
    config: HeuristicConfig,
}

impl HeuristicStrategy {
    pub const NAME: &'static str = "Heuristic";

    #[must_use]
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    fn forced_meld(&self, view: &PlayerView, card: CardId) -> Option<Intent> {
        if !view.has_opened {
            return find_opening(&view.hand, view.first_meld_points, Some(card))
                .map(|found| propose(view, &found));
        }
        if let Some(found) = find_meld_with(&view.hand, card) {
            return Some(propose(view, &[found]));
        }
        let drawn = view.hand_card(card)?;
        extension(view, std::iter::once(drawn))
    }

    fn free_meld(&self, view: &PlayerView) -> Option<Intent> {
        if !view.has_opened {
            return find_opening(&view.hand, view.first_meld_points, None)
                .map(|found| propose(view, &found));
        }
        let single = candidate_sets(&view.hand)
            .into_iter()
            .next()
            .or_else(|| candidate_runs(&view.hand).into_iter().next());
        if let Some(found) = single {
            return Some(propose(view, &[found]));
        }
        let naturals = view.hand.iter().filter(|c| !c.is_joker);
        let jokers = view.hand.iter().filter(|c| c.is_joker);
        extension(view, naturals.chain(jokers))
    }
}

impl Strategy for HeuristicStrategy {
    fn choose_draw(&self, view: &PlayerView, rng: &mut GameRng) -> DrawSource {
        let Some(top) = view.discard_top else {
            return DrawSource::Deck;
        };
        // A card that cannot be placed this turn would only be forfeited.
        if !can_place_discard(view, &top) {
            return DrawSource::Deck;
        }
        if discard_is_useful(&view.hand, &top) || rng.gen_bool(self.config.random_discard_draw) {
            DrawSource::Discard
        } else {
            DrawSource::Deck
        }
    }

    fn choose_meld(
        &self,
        view: &PlayerView,
        forced_card: Option<CardId>,
        _rng: &mut GameRng,
    ) -> Option<Intent> {
        match forced_card {
            Some(card) => self.forced_meld(view, card),
            None => self.free_meld(view),
        }
    }

    fn choose_discard(&self, view: &PlayerView, _rng: &mut GameRng) -> Option<CardId> {
        choose_discard(&view.hand, self.config.dead_card_distance)
    }
}

fn propose(view: &PlayerView, found: &[Candidate]) -> Intent {
    Intent::ProposeMelds {
        player: view.player,
        groups: found
            .iter()
            .map(|c| c.cards.iter().map(|card| card.id).collect::<CardGroup>())
            .collect(),
    }
}

fn extension<'a>(view: &PlayerView, cards: impl Iterator<Item = &'a Card>) -> Option<Intent> {
    for card in cards {
        if let Some(meld) = view.melds.iter().find(|m| can_extend_meld(m, card)) {
            return Some(Intent::ExtendMeld {
                player: view.player,
                meld: meld.id,
                card: card.id,
            });
        }
    }
    None
}

/// Whether the meld step would place `top` this turn if it were drawn.
///
/// Mirrors the forced-card search: an opening that includes it before the
/// seat has opened, afterwards a new meld with it or a table extension.
#[must_use]
pub fn can_place_discard(view: &PlayerView, top: &Card) -> bool {
    let mut with_top = view.hand.clone();
    with_top.push(*top);
    if !view.has_opened {
        return find_opening(&with_top, view.first_meld_points, Some(top.id)).is_some();
    }
    find_meld_with(&with_top, top.id).is_some()
        || view.melds.iter().any(|meld| can_extend_meld(meld, top))
}

/// Whether `top` would complete a set or a three-card run with `hand`.
#[must_use]
pub fn discard_is_useful(hand: &[Card], top: &Card) -> bool {
    if top.is_joker {
        let mut with_top = hand.to_vec();
        with_top.push(*top);
        return find_meld_with(&with_top, top.id).is_some();
    }

    let other_suits: FxHashSet<Suit> = hand
        .iter()
        .filter(|c| !c.is_joker && c.rank == top.rank && c.suit != top.suit)
        .map(|c| c.suit)
        .collect();
    if other_suits.len() >= 2 {
        return true;
    }

    let rank = i16::from(top.rank.number());
    let has = |n: i16| {
        hand.iter()
            .any(|c| !c.is_joker && c.suit == top.suit && i16::from(c.rank.number()) == n)
    };
    (has(rank - 2) && has(rank - 1))
        || (has(rank - 1) && has(rank + 1))
        || (has(rank + 1) && has(rank + 2))
}

/// A non-joker with no same-rank partner and no same-suit neighbour
/// within `distance` ranks.
#[must_use]
pub fn is_dead_card(hand: &[Card], card: &Card, distance: u8) -> bool {
    if card.is_joker {
        return false;
    }
    !hand.iter().any(|other| {
        other.id != card.id
            && !other.is_joker
            && (other.rank == card.rank
                || (other.suit == card.suit
                    && other.rank.number().abs_diff(card.rank.number()) <= distance))
    })
}

/// The card the heuristic throws away, or `None` for an empty hand.
#[must_use]
pub fn choose_discard(hand: &[Card], distance: u8) -> Option<CardId> {
    hand.iter()
        .filter(|c| is_dead_card(hand, c, distance))
        .max_by_key(|c| c.points())
        .or_else(|| hand.iter().filter(|c| !c.is_joker).max_by_key(|c| c.points()))
        .or_else(|| hand.first())
        .map(|c| c.id)
}
