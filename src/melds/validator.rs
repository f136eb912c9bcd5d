//! Set and run legality.
//!
//! Both predicates share the same frame: at least `MIN_MELD_SIZE` cards,
//! at most `MAX_JOKERS_PER_MELD` jokers, no card id repeated.
//!
//! ## Runs
//!
//! Non-joker cards share a suit and, sorted by rank, step by exactly one.
//! A single joker either fills one gap of exactly two ranks or extends an
//! otherwise gap-free sequence at one end (high end first, low end when
//! the run already reaches the King).
//!
//! ## Sets
//!
//! Non-joker cards share a rank with pairwise distinct suits. A joker
//! stands for a missing suit, so a set never exceeds four cards.

use crate::cards::{Card, Rank, Suit};
use crate::core::MeldRejection;

use super::meld::{Meld, MeldKind};

pub const MIN_MELD_SIZE: usize = 3;
pub const MAX_JOKERS_PER_MELD: usize = 1;
pub const MAX_SET_SIZE: usize = 4;

/// The rank positions a run covers, joker included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSpan {
    pub suit: Suit,
    /// Lowest covered position (1 = Ace).
    pub low: u8,
    /// Highest covered position (13 = King).
    pub high: u8,
    /// Position the joker stands for, if the run holds one.
    pub joker_at: Option<u8>,
}

impl RunSpan {
    /// Sum of the rank values across the covered positions.
    #[must_use]
    pub fn points(&self) -> u32 {
        (self.low..=self.high).map(Rank::points_at).sum()
    }
}

fn check_frame(cards: &[Card]) -> Result<(), MeldRejection> {
    if cards.len() < MIN_MELD_SIZE {
        return Err(MeldRejection::TooFewCards(cards.len()));
    }
    let jokers = cards.iter().filter(|c| c.is_joker).count();
    if jokers > MAX_JOKERS_PER_MELD {
        return Err(MeldRejection::TooManyJokers(jokers));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].iter().any(|c| c.id == card.id) {
            return Err(MeldRejection::DuplicateCard(card.id));
        }
    }
    Ok(())
}

/// Validate a set, returning its rank.
pub fn validate_set(cards: &[Card]) -> Result<Rank, MeldRejection> {
    check_frame(cards)?;
    if cards.len() > MAX_SET_SIZE {
        return Err(MeldRejection::NotASetOrRun);
    }

    let mut naturals = cards.iter().filter(|c| !c.is_joker);
    let first = naturals.next().ok_or(MeldRejection::NotASetOrRun)?;

    let mut seen_suits = [false; 4];
    seen_suits[first.suit.index()] = true;
    for card in naturals {
        if card.rank != first.rank || seen_suits[card.suit.index()] {
            return Err(MeldRejection::NotASetOrRun);
        }
        seen_suits[card.suit.index()] = true;
    }
    Ok(first.rank)
}

/// Validate a run, returning the positions it covers.
pub fn validate_run(cards: &[Card]) -> Result<RunSpan, MeldRejection> {
    check_frame(cards)?;

    let has_joker = cards.iter().any(|c| c.is_joker);
    let mut naturals: Vec<&Card> = cards.iter().filter(|c| !c.is_joker).collect();
    let suit = naturals.first().ok_or(MeldRejection::NotASetOrRun)?.suit;
    if naturals.iter().any(|c| c.suit != suit) {
        return Err(MeldRejection::NotASetOrRun);
    }
    naturals.sort_by_key(|c| c.rank);

    let mut gap_at = None;
    for pair in naturals.windows(2) {
        let (lo, hi) = (pair[0].rank.number(), pair[1].rank.number());
        match hi - lo {
            1 => {}
            2 if has_joker && gap_at.is_none() => gap_at = Some(lo + 1),
            _ => return Err(MeldRejection::NotASetOrRun),
        }
    }

    let low = naturals[0].rank.number();
    let high = naturals[naturals.len() - 1].rank.number();

    let span = match (has_joker, gap_at) {
        (false, _) => RunSpan { suit, low, high, joker_at: None },
        (true, Some(at)) => RunSpan { suit, low, high, joker_at: Some(at) },
        (true, None) if high < Rank::King.number() => RunSpan {
            suit,
            low,
            high: high + 1,
            joker_at: Some(high + 1),
        },
        (true, None) if low > Rank::Ace.number() => RunSpan {
            suit,
            low: low - 1,
            high,
            joker_at: Some(low - 1),
        },
        (true, None) => return Err(MeldRejection::NotASetOrRun),
    };
    Ok(span)
}

#[must_use]
pub fn is_valid_set(cards: &[Card]) -> bool {
    validate_set(cards).is_ok()
}

#[must_use]
pub fn is_valid_run(cards: &[Card]) -> bool {
    validate_run(cards).is_ok()
}

/// Validate a group against one meld kind.
pub fn validate(kind: MeldKind, cards: &[Card]) -> Result<(), MeldRejection> {
    match kind {
        MeldKind::Set => validate_set(cards).map(|_| ()),
        MeldKind::Run => validate_run(cards).map(|_| ()),
    }
}

/// Decide whether a group is a set or a run.
///
/// The two shapes are exclusive: a legal group holds at least two
/// non-joker cards, which cannot both share a rank with distinct suits
/// and share a suit with distinct ranks.
pub fn classify(cards: &[Card]) -> Result<MeldKind, MeldRejection> {
    check_frame(cards)?;
    if is_valid_set(cards) {
        Ok(MeldKind::Set)
    } else if is_valid_run(cards) {
        Ok(MeldKind::Run)
    } else {
        Err(MeldRejection::NotASetOrRun)
    }
}

/// Point value of a group, jokers valued as the rank they stand for.
///
/// Returns 0 for a group that is not a legal meld of `kind`.
#[must_use]
pub fn group_points(kind: MeldKind, cards: &[Card]) -> u32 {
    match kind {
        MeldKind::Set => validate_set(cards).map_or(0, |rank| rank.points() * cards.len() as u32),
        MeldKind::Run => validate_run(cards).map_or(0, |span| span.points()),
    }
}

/// Check that `card` may be added to a meld of `kind` holding `cards`.
///
/// Sets take a joker or a card of the set's rank in a suit not yet
/// present. Runs take a joker or a card of the run's suit one below the
/// covered low end or one above the covered high end. The grown group is
/// re-validated either way.
pub fn check_extension(kind: MeldKind, cards: &[Card], card: &Card) -> Result<(), MeldRejection> {
    if cards.iter().any(|c| c.id == card.id) {
        return Err(MeldRejection::DuplicateCard(card.id));
    }

    let fits = match kind {
        MeldKind::Set => {
            let rank = validate_set(cards)?;
            card.is_joker
                || (card.rank == rank && !cards.iter().any(|c| !c.is_joker && c.suit == card.suit))
        }
        MeldKind::Run => {
            let span = validate_run(cards)?;
            card.is_joker
                || (card.suit == span.suit
                    && (card.rank.number() + 1 == span.low || card.rank.number() == span.high + 1))
        }
    };
    if !fits {
        return Err(MeldRejection::CannotExtend(card.id));
    }

    let mut grown = cards.to_vec();
    grown.push(*card);
    validate(kind, &grown).map_err(|_| MeldRejection::CannotExtend(card.id))
}

#[must_use]
pub fn can_extend_meld(meld: &Meld, card: &Card) -> bool {
    check_extension(meld.kind, &meld.cards, card).is_ok()
}

/// Put a legal group into display order.
///
/// Runs ascend by rank with the joker at its standing position. Sets are
/// ordered by suit with the joker last. Illegal groups come back as given.
#[must_use]
pub fn arrange(kind: MeldKind, cards: &[Card]) -> Vec<Card> {
    let mut naturals: Vec<Card> = cards.iter().filter(|c| !c.is_joker).copied().collect();
    let joker = cards.iter().find(|c| c.is_joker).copied();

    match kind {
        MeldKind::Set => {
            if validate_set(cards).is_err() {
                return cards.to_vec();
            }
            naturals.sort_by_key(|c| c.suit);
            naturals.extend(joker);
            naturals
        }
        MeldKind::Run => {
            let Ok(span) = validate_run(cards) else {
                return cards.to_vec();
            };
            naturals.sort_by_key(|c| c.rank);
            if let (Some(joker), Some(at)) = (joker, span.joker_at) {
                let index = usize::from(at - span.low);
                naturals.insert(index, joker);
            }
            naturals
        }
    }
}
