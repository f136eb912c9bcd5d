//! Seats at the table and per-seat storage.
//!
//! ## PlayerId
//!
//! Seat index, 0-based, in turn order.
//!
//! ## PlayerMap
//!
//! Dense per-seat storage backed by a `Vec`, indexed by `PlayerId`.
//!
//! ## Player
//!
//! Everything a seat carries across rounds: name, controller kind and
//! cumulative score.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. The first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one at a table of `player_count`.
    ///
    /// ```
    /// use rami_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats of a table with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use rami_engine::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::with_value(3, 0);
/// scores[PlayerId::new(1)] += 12;
/// assert_eq!(scores[PlayerId::new(1)], 12);
/// assert_eq!(scores.values().sum::<u32>(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Wrap an existing vector, one entry per seat in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Look up a seat, returning `None` for seats outside the table.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Check whether a seat exists at this table.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Build a new map by transforming every entry.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.iter().map(|(p, v)| f(p, v)).collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Who decides a seat's moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// A roster entry handed to `Game::new`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    pub kind: PlayerKind,
}

impl Seat {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn computer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Computer,
        }
    }
}

/// A seat's identity and its score across rounds.
///
/// Hands and the per-round "has opened" flag live in the round state,
/// since both are reset on every deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    /// Cumulative penalty points. Lower is better.
    pub score: u32,
}

impl Player {
    #[must_use]
    pub fn from_seat(id: PlayerId, seat: Seat) -> Self {
        Self {
            id,
            name: seat.name,
            kind: seat.kind,
            score: 0,
        }
    }

    #[must_use]
    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }
}
