//! Shared helpers for the integration tests: logging setup and stacked decks.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use rami_engine::{build_deck, CardId, Deck, GameRng, Rank, Seat, Suit};
use rustc_hash::FxHashSet;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Route engine logs to the test writer.
///
/// `TEST_LOG` wins over `RUST_LOG`; without either only warnings show.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// First copy of a standard card: `c(7, Suit::Hearts)`.
pub fn c(rank: u8, suit: Suit) -> CardId {
    card(0, rank, suit)
}

/// Second copy of a standard card.
pub fn c2(rank: u8, suit: Suit) -> CardId {
    card(1, rank, suit)
}

pub fn card(copy: usize, rank: u8, suit: Suit) -> CardId {
    let rank = Rank::from_number(rank).unwrap_or_else(|| panic!("no rank {}", rank));
    Deck::card_id(copy, suit, rank)
}

pub fn joker(n: usize) -> CardId {
    Deck::joker_id(n)
}

pub fn roster(n: usize) -> Vec<Seat> {
    (0..n).map(|i| Seat::human(format!("p{}", i))).collect()
}

/// A deck that deals `hands` (seat 0 first), turns `discard` face up, then
/// hands out `draws` in order to whoever draws from the deck.
///
/// Hands shorter than `hand_size` are topped up from a seeded shuffle of
/// the unused cards.
pub fn stacked_deck(
    hands: &[&[CardId]],
    discard: CardId,
    draws: &[CardId],
    hand_size: usize,
) -> Deck {
    let mut reserved: FxHashSet<CardId> = FxHashSet::default();
    for id in hands.iter().flat_map(|h| h.iter()).chain(draws).chain(std::iter::once(&discard)) {
        assert!(reserved.insert(*id), "{} stacked twice", id);
    }

    let mut fillers: Vec<CardId> = build_deck(&mut GameRng::new(0xDEC))
        .iter()
        .map(|card| card.id)
        .filter(|id| !reserved.contains(id))
        .collect();

    let full_hands: Vec<Vec<CardId>> = hands
        .iter()
        .map(|hand| {
            assert!(hand.len() <= hand_size, "hand longer than {}", hand_size);
            let mut full = hand.to_vec();
            while full.len() < hand_size {
                full.push(fillers.pop().expect("enough fillers"));
            }
            full
        })
        .collect();

    // Order in which cards leave the top of the deck.
    let seats = full_hands.len();
    let mut dealt = Vec::with_capacity(rami_engine::DECK_SIZE);
    for k in 0..hand_size * seats {
        dealt.push(full_hands[k % seats][k / seats]);
    }
    dealt.push(discard);
    dealt.extend_from_slice(draws);
    dealt.extend(fillers);

    let cards = dealt
        .into_iter()
        .rev()
        .map(|id| Deck::canonical_card(id).expect("canonical card"))
        .collect();
    Deck::from_cards(cards).expect("stacked deck is a full deck")
}
