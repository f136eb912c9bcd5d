//! The 108-card double deck.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Rank, Suit};
use crate::core::{GameRng, RamiError};

/// Copies of each standard 52-card deck.
pub const STANDARD_COPIES: usize = 2;
pub const JOKER_COUNT: usize = 4;
pub const DECK_SIZE: usize = STANDARD_COPIES * 52 + JOKER_COUNT;

/// An ordered sequence of cards. The top of the deck is the end of the vec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Id of `copy` (0 or 1) of the given standard card.
    #[must_use]
    pub const fn card_id(copy: usize, suit: Suit, rank: Rank) -> CardId {
        CardId::new((copy * 52 + suit.index() * 13 + (rank.number() as usize - 1)) as u8)
    }

    /// Id of joker `n` (0..4).
    #[must_use]
    pub const fn joker_id(n: usize) -> CardId {
        CardId::new((STANDARD_COPIES * 52 + n) as u8)
    }

    /// The full deck in canonical (unshuffled) id order.
    #[must_use]
    pub fn canonical() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for copy in 0..STANDARD_COPIES {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::standard(Self::card_id(copy, suit, rank), suit, rank));
                }
            }
        }
        for j in 0..JOKER_COUNT {
            cards.push(Card::joker(Self::joker_id(j), Suit::ALL[j % 4]));
        }
        Self { cards }
    }

    /// A deck in a caller-chosen order, top last.
    ///
    /// The cards must be exactly the canonical 108, each once.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, RamiError> {
        if cards.len() != DECK_SIZE {
            return Err(RamiError::InvalidConfig(format!(
                "a deck holds {} cards, got {}",
                DECK_SIZE,
                cards.len()
            )));
        }
        let mut seen = [false; DECK_SIZE];
        for card in &cards {
            let index = usize::from(card.id.raw());
            if Self::canonical_card(card.id).as_ref() != Some(card) {
                return Err(RamiError::InvalidConfig(format!(
                    "{} is not a card of this deck",
                    card.id
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(RamiError::InvalidConfig(format!("{} appears twice", card.id)));
            }
        }
        Ok(Self { cards })
    }

    /// The card an id names, or `None` for ids outside the deck.
    #[must_use]
    pub fn canonical_card(id: CardId) -> Option<Card> {
        let raw = usize::from(id.raw());
        let standard = STANDARD_COPIES * 52;
        if raw < standard {
            let face = raw % 52;
            let rank = Rank::from_number((face % 13) as u8 + 1)?;
            return Some(Card::standard(id, Suit::ALL[face / 13], rank));
        }
        (raw < DECK_SIZE).then(|| Card::joker(id, Suit::ALL[(raw - standard) % 4]))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Build a fresh shuffled 108-card deck.
pub fn build_deck(rng: &mut GameRng) -> Deck {
    shuffle(Deck::canonical(), rng)
}

/// Uniformly permute a deck.
pub fn shuffle(mut deck: Deck, rng: &mut GameRng) -> Deck {
    rng.shuffle(&mut deck.cards);
    deck
}
