//! Card identity: suit, rank, point value.
//!
//! ## Id Layout
//!
//! A 108-card double deck uses ids `0..108`:
//! - `copy * 52 + suit * 13 + (rank - 1)` for the two standard copies
//! - `104..108` for the four jokers
//!
//! The layout only matters to `Deck`; everything else compares ids.

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Card rank. Aces are low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position in a run, 1 (Ace) through 13 (King).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_number(n: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// Point value: A=1, 2-10 face value, J/Q/K=10.
    #[must_use]
    pub const fn points(self) -> u32 {
        let n = self as u32;
        if n > 10 {
            10
        } else {
            n
        }
    }

    /// Point value of the rank at run position `n`. Out-of-range positions
    /// are worth nothing.
    #[must_use]
    pub fn points_at(n: u8) -> u32 {
        Rank::from_number(n).map_or(0, Rank::points)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// Unique identity of one physical card within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// An immutable card.
///
/// Jokers keep a suit and rank as display defaults. Rule code must check
/// `is_joker` before looking at either.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub is_joker: bool,
}

impl Card {
    #[must_use]
    pub const fn standard(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self {
            id,
            suit,
            rank,
            is_joker: false,
        }
    }

    #[must_use]
    pub const fn joker(id: CardId, display_suit: Suit) -> Self {
        Self {
            id,
            suit: display_suit,
            rank: Rank::Ace,
            is_joker: true,
        }
    }

    /// Nominal point value. Jokers are worth 0 on their own; the value
    /// inside a meld comes from `melds::group_points`.
    #[must_use]
    pub const fn points(&self) -> u32 {
        if self.is_joker {
            0
        } else {
            self.rank.points()
        }
    }

    /// Same suit and rank, ignoring which copy it is.
    #[must_use]
    pub fn same_face(&self, other: &Card) -> bool {
        !self.is_joker && !other.is_joker && self.suit == other.suit && self.rank == other.rank
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_joker {
            write!(f, "JK")
        } else {
            write!(f, "{}{}", self.rank.label(), self.suit.symbol())
        }
    }
}
