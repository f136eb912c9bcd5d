//! Round state: card locations, table melds, whose turn, what phase.
//!
//! A `RoundState` is dealt fresh for every round. It owns all 108 cards
//! through its `ZoneManager`; transitions live in `rules::turn` and only
//! move cards between zones, so the physical deck is conserved.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::RamiConfig;
use super::phase::TurnPhase;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{build_deck, Card, CardId, Deck, DECK_SIZE};
use crate::melds::{Meld, MeldId, MeldKind};
use crate::zones::{Zone, ZoneManager};

/// Table bookkeeping for one meld. Its cards live in `Zone::Meld(id)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldEntry {
    pub id: MeldId,
    pub kind: MeldKind,
    pub owner: PlayerId,
}

#[derive(Clone, Debug)]
pub struct RoundState {
    pub(crate) number: u32,
    pub(crate) zones: ZoneManager,
    /// Melds in the order they were laid.
    pub(crate) melds: Vec<MeldEntry>,
    pub(crate) phase: TurnPhase,
    pub(crate) current: PlayerId,
    /// Game-wide turn counter; keeps counting across rounds.
    pub(crate) turn: u32,
    pub(crate) opened: PlayerMap<bool>,
    pub(crate) dealer_first: PlayerId,
    next_meld: u32,
}

impl RoundState {
    /// Shuffle a fresh deck, deal `hand_size` cards to each seat starting
    /// with `first`, and turn one card face up to start the discard pile.
    ///
    /// Panics if the deal does not fit in the deck; configs are validated
    /// before any round is dealt.
    #[must_use]
    pub fn deal(
        number: u32,
        player_count: usize,
        first: PlayerId,
        first_turn: u32,
        config: &RamiConfig,
        rng: &mut GameRng,
    ) -> Self {
        Self::deal_from(build_deck(rng), number, player_count, first, first_turn, config)
    }

    /// Deal from a deck in the given order. Cards come off the top one at a
    /// time, round-robin from `first`; the next card starts the discard pile.
    #[must_use]
    pub fn deal_from(
        deck: Deck,
        number: u32,
        player_count: usize,
        first: PlayerId,
        first_turn: u32,
        config: &RamiConfig,
    ) -> Self {
        assert!(
            config.hand_size * player_count < DECK_SIZE,
            "{} hands of {} do not fit in the deck",
            player_count,
            config.hand_size
        );

        let mut zones = ZoneManager::new();
        for card in deck.into_cards() {
            zones.insert(card, Zone::Deck);
        }

        let mut seat = first;
        for _ in 0..config.hand_size * player_count {
            zones.move_top(Zone::Deck, Zone::Hand(seat));
            seat = seat.next(player_count);
        }
        zones.move_top(Zone::Deck, Zone::Discard);

        Self {
            number,
            zones,
            melds: Vec::new(),
            phase: TurnPhase::AwaitingDraw,
            current: first,
            turn: first_turn,
            opened: PlayerMap::with_value(player_count, false),
            dealer_first: first,
            next_meld: 0,
        }
    }

    /// Round number, starting at 1.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// The seat that took the first turn of this round.
    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.dealer_first
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.opened.player_count()
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        self.zones.cards(Zone::Hand(player))
    }

    #[must_use]
    pub fn has_opened(&self, player: PlayerId) -> bool {
        self.opened.get(player).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.zones.len(Zone::Deck)
    }

    /// Discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        self.zones.cards(Zone::Discard)
    }

    #[must_use]
    pub fn discard_top(&self) -> Option<&Card> {
        self.zones.top(Zone::Discard)
    }

    #[must_use]
    pub fn meld(&self, id: MeldId) -> Option<Meld> {
        let entry = self.meld_entry(id)?;
        Some(self.materialize(entry))
    }

    /// Table melds in the order they were laid.
    #[must_use]
    pub fn melds(&self) -> Vec<Meld> {
        self.melds.iter().map(|entry| self.materialize(entry)).collect()
    }

    #[must_use]
    pub fn meld_count(&self) -> usize {
        self.melds.len()
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    /// Cards across every zone.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.zones.iter().map(|(_, cards)| cards.len()).sum()
    }

    /// True if every one of the 108 ids is in exactly one zone and every
    /// table meld is still legal.
    #[must_use]
    pub fn audit(&self) -> bool {
        let mut seen: FxHashSet<CardId> = FxHashSet::default();
        for (zone, cards) in self.zones.iter() {
            for card in cards {
                if !seen.insert(card.id) || self.zones.zone_of(card.id) != Some(zone) {
                    return false;
                }
            }
        }
        let complete = seen.len() == DECK_SIZE && self.zones.total_cards() == DECK_SIZE;
        complete && self.melds().iter().all(|m| crate::melds::validate(m.kind, &m.cards).is_ok())
    }

    pub(crate) fn meld_entry(&self, id: MeldId) -> Option<&MeldEntry> {
        self.melds.iter().find(|entry| entry.id == id)
    }

    pub(crate) fn alloc_meld_id(&mut self) -> MeldId {
        let id = MeldId::new(self.next_meld);
        self.next_meld += 1;
        id
    }

    fn materialize(&self, entry: &MeldEntry) -> Meld {
        Meld {
            id: entry.id,
            kind: entry.kind,
            owner: entry.owner,
            cards: self.zones.cards(Zone::Meld(entry.id)).to_vec(),
        }
    }
}
