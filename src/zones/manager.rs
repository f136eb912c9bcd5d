//! Zone manager for card locations and movement.
//!
//! Every physical card is in exactly one zone at all times: the deck, the
//! discard pile, a player's hand, or a meld on the table. The manager
//! keeps a location index next to the ordered card lists so both "where
//! is this card" and "what is on top of the pile" are cheap.
//!
//! Ordered zones store bottom first, top last.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::{GameRng, PlayerId};
use crate::melds::MeldId;

/// Where a card can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Discard,
    Hand(PlayerId),
    Meld(MeldId),
}

/// Tracks the location and order of every card in a round.
///
/// ```
/// use rami_engine::cards::{Card, CardId, Rank, Suit};
/// use rami_engine::core::PlayerId;
/// use rami_engine::zones::{Zone, ZoneManager};
///
/// let mut zones = ZoneManager::new();
/// let card = Card::standard(CardId::new(0), Suit::Hearts, Rank::Ace);
/// zones.insert(card, Zone::Deck);
///
/// zones.move_top(Zone::Deck, Zone::Hand(PlayerId::new(0)));
/// assert_eq!(zones.zone_of(card.id), Some(Zone::Hand(PlayerId::new(0))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// card id -> zone
    locations: FxHashMap<CardId, Zone>,

    /// Ordered card lists per zone.
    zones: FxHashMap<Zone, Vec<Card>>,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a card on top of a zone.
    ///
    /// Panics if the card is already tracked.
    pub fn insert(&mut self, card: Card, zone: Zone) {
        if self.locations.contains_key(&card.id) {
            panic!("{} already exists in zone manager", card.id);
        }
        self.locations.insert(card.id, zone);
        self.zones.entry(zone).or_default().push(card);
    }

    /// Move a card to the top of another zone.
    ///
    /// Returns the old zone, or `None` if the card isn't tracked.
    pub fn move_card(&mut self, card: CardId, to: Zone) -> Option<Zone> {
        let from = self.locations.get(&card).copied()?;
        if from == to {
            return Some(from);
        }

        let list = self.zones.get_mut(&from)?;
        let pos = list.iter().position(|c| c.id == card)?;
        let moved = list.remove(pos);

        self.locations.insert(card, to);
        self.zones.entry(to).or_default().push(moved);
        Some(from)
    }

    /// Move the top card of `from` onto `to`.
    pub fn move_top(&mut self, from: Zone, to: Zone) -> Option<Card> {
        let card = *self.top(from)?;
        self.move_card(card.id, to)?;
        Some(card)
    }

    /// Move every card of `from` except its top onto `to`, keeping their
    /// relative order. Returns how many cards moved.
    pub fn move_all_but_top(&mut self, from: Zone, to: Zone) -> usize {
        let Some(list) = self.zones.get_mut(&from) else {
            return 0;
        };
        if list.len() <= 1 {
            return 0;
        }
        let top = list.split_off(list.len() - 1);
        let moved = std::mem::replace(list, top);
        let count = moved.len();
        for card in &moved {
            self.locations.insert(card.id, to);
        }
        self.zones.entry(to).or_default().extend(moved);
        count
    }

    /// Replace the order of a zone with a permutation of its cards.
    ///
    /// Panics if `cards` is not exactly the zone's current contents.
    pub fn set_order(&mut self, zone: Zone, cards: Vec<Card>) {
        let current = self.cards(zone);
        assert_eq!(current.len(), cards.len(), "reorder of {:?} changes its size", zone);
        assert!(
            cards.iter().all(|c| self.locations.get(&c.id) == Some(&zone)),
            "reorder of {:?} brings in foreign cards",
            zone
        );
        self.zones.insert(zone, cards);
    }

    pub fn shuffle_zone(&mut self, zone: Zone, rng: &mut GameRng) {
        if let Some(list) = self.zones.get_mut(&zone) {
            rng.shuffle(list);
        }
    }

    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn is_in_zone(&self, card: CardId, zone: Zone) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// The card with this id, if it is in `zone`.
    #[must_use]
    pub fn find_in(&self, zone: Zone, card: CardId) -> Option<Card> {
        if !self.is_in_zone(card, zone) {
            return None;
        }
        self.cards(zone).iter().find(|c| c.id == card).copied()
    }

    /// Cards in a zone, bottom first.
    #[must_use]
    pub fn cards(&self, zone: Zone) -> &[Card] {
        self.zones.get(&zone).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        self.cards(zone).len()
    }

    #[must_use]
    pub fn is_empty(&self, zone: Zone) -> bool {
        self.cards(zone).is_empty()
    }

    #[must_use]
    pub fn top(&self, zone: Zone) -> Option<&Card> {
        self.zones.get(&zone)?.last()
    }

    /// Non-empty zones with their cards.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &[Card])> {
        self.zones
            .iter()
            .filter(|(_, cards)| !cards.is_empty())
            .map(|(zone, cards)| (*zone, cards.as_slice()))
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }
}
