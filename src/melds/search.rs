//! Candidate meld search over a hand.
//!
//! Enumerates maximal sets (one card per suit of a rank, a joker topping
//! up a pair) and maximal runs (consecutive same-suit segments, a joker
//! bridging one two-rank gap or extending a segment). Used by the
//! computer strategy and by tests; the turn rules never depend on it.

use rustc_hash::FxHashSet;

use crate::cards::{Card, CardId, Suit};

use super::meld::MeldKind;
use super::validator;

/// A legal group found in a hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub kind: MeldKind,
    pub cards: Vec<Card>,
    pub points: u32,
}

impl Candidate {
    /// Build a candidate, keeping it only if the group is legal.
    #[must_use]
    pub fn new(kind: MeldKind, cards: Vec<Card>) -> Option<Self> {
        validator::validate(kind, &cards).ok()?;
        let points = validator::group_points(kind, &cards);
        Some(Self { kind, cards, points })
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card)
    }

    /// True if the two candidates share a physical card.
    #[must_use]
    pub fn overlaps(&self, other: &Candidate) -> bool {
        self.cards.iter().any(|c| other.contains(c.id))
    }

    #[must_use]
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }
}

/// Move `prefer` to the front so slot-filling picks it over its twin copy.
fn ordered_hand(hand: &[Card], prefer: Option<CardId>) -> Vec<Card> {
    let mut ordered = hand.to_vec();
    if let Some(id) = prefer {
        if let Some(pos) = ordered.iter().position(|c| c.id == id) {
            let card = ordered.remove(pos);
            ordered.insert(0, card);
        }
    }
    ordered
}

fn first_joker(hand: &[Card]) -> Option<Card> {
    hand.iter().find(|c| c.is_joker).copied()
}

/// Maximal sets in `hand`, highest rank first.
#[must_use]
pub fn candidate_sets(hand: &[Card]) -> Vec<Candidate> {
    let joker = first_joker(hand);
    let mut by_rank: [[Option<Card>; 4]; 14] = [[None; 4]; 14];
    for card in hand.iter().filter(|c| !c.is_joker) {
        let slot = &mut by_rank[usize::from(card.rank.number())][card.suit.index()];
        if slot.is_none() {
            *slot = Some(*card);
        }
    }

    let mut out = Vec::new();
    for rank in (1..=13).rev() {
        let naturals: Vec<Card> = by_rank[rank].iter().flatten().copied().collect();
        match (naturals.len(), joker) {
            (n, _) if n >= 3 => {
                out.extend(Candidate::new(MeldKind::Set, naturals.clone()));
                if let (3, Some(j)) = (n, joker) {
                    let mut with_joker = naturals;
                    with_joker.push(j);
                    out.extend(Candidate::new(MeldKind::Set, with_joker));
                }
            }
            (2, Some(j)) => {
                let mut with_joker = naturals;
                with_joker.push(j);
                out.extend(Candidate::new(MeldKind::Set, with_joker));
            }
            _ => {}
        }
    }
    out
}

/// Maximal runs in `hand`, per suit from the highest segment down.
#[must_use]
pub fn candidate_runs(hand: &[Card]) -> Vec<Candidate> {
    let joker = first_joker(hand);
    let mut out = Vec::new();

    for suit in Suit::ALL {
        let mut by_rank: [Option<Card>; 14] = [None; 14];
        for card in hand.iter().filter(|c| !c.is_joker && c.suit == suit) {
            let slot = &mut by_rank[usize::from(card.rank.number())];
            if slot.is_none() {
                *slot = Some(*card);
            }
        }

        // consecutive segments, lowest first
        let mut segments: Vec<Vec<Card>> = Vec::new();
        let mut current: Vec<Card> = Vec::new();
        for slot in &by_rank[1..] {
            match slot {
                Some(card) => current.push(*card),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        for (i, segment) in segments.iter().enumerate().rev() {
            if segment.len() >= 3 {
                out.extend(Candidate::new(MeldKind::Run, segment.clone()));
            }
            let Some(j) = joker else { continue };
            if let Some(next) = segments.get(i + 1) {
                let gap = next[0].rank.number() - segment[segment.len() - 1].rank.number();
                if gap == 2 {
                    let mut bridged = segment.clone();
                    bridged.push(j);
                    bridged.extend(next.iter().copied());
                    let arranged = validator::arrange(MeldKind::Run, &bridged);
                    out.extend(Candidate::new(MeldKind::Run, arranged));
                }
            }
            if segment.len() >= 2 {
                let mut extended = segment.clone();
                extended.push(j);
                let arranged = validator::arrange(MeldKind::Run, &extended);
                out.extend(Candidate::new(MeldKind::Run, arranged));
            }
        }
    }
    out
}

/// All candidates: sets first, then runs.
#[must_use]
pub fn candidates(hand: &[Card]) -> Vec<Candidate> {
    let mut all = candidate_sets(hand);
    all.extend(candidate_runs(hand));
    all
}

/// Candidates built so that `prefer` wins its slot over an identical copy.
#[must_use]
pub fn candidates_preferring(hand: &[Card], prefer: Option<CardId>) -> Vec<Candidate> {
    candidates(&ordered_hand(hand, prefer))
}

/// Find an opening: one candidate, or a disjoint pair, worth `threshold`.
///
/// With `required`, at least one chosen candidate must hold that card.
/// Returns the first qualifying combination in candidate order.
#[must_use]
pub fn find_opening(
    hand: &[Card],
    threshold: u32,
    required: Option<CardId>,
) -> Option<Vec<Candidate>> {
    let all = candidates_preferring(hand, required);
    let holds_required = |group: &[&Candidate]| {
        required.map_or(true, |id| group.iter().any(|c| c.contains(id)))
    };

    if let Some(single) = all
        .iter()
        .find(|c| c.points >= threshold && holds_required(&[*c]))
    {
        return Some(vec![single.clone()]);
    }

    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            if a.points + b.points >= threshold && !a.overlaps(b) && holds_required(&[a, b]) {
                return Some(vec![a.clone(), b.clone()]);
            }
        }
    }
    None
}

/// First candidate of any value that uses `card`.
#[must_use]
pub fn find_meld_with(hand: &[Card], card: CardId) -> Option<Candidate> {
    candidates_preferring(hand, Some(card))
        .into_iter()
        .find(|c| c.contains(card))
}

/// Ids of every card that appears in some candidate.
#[must_use]
pub fn meldable_cards(hand: &[Card]) -> FxHashSet<CardId> {
    candidates(hand)
        .iter()
        .flat_map(|c| c.cards.iter().map(|card| card.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    fn card(id: u8, suit: Suit, n: u8) -> Card {
        Card::standard(CardId::new(id), suit, Rank::from_number(n).unwrap())
    }

    fn joker(id: u8) -> Card {
        Card::joker(CardId::new(104 + id), Suit::Hearts)
    }

    #[test]
    fn test_sets_found_per_rank() {
        let hand = [
            card(1, Suit::Hearts, 13),
            card(2, Suit::Diamonds, 13),
            card(3, Suit::Clubs, 13),
            card(4, Suit::Hearts, 2),
        ];
        let sets = candidate_sets(&hand);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].points, 30);
    }

    #[test]
    fn test_set_skips_twin_copy() {
        let hand = [
            card(1, Suit::Hearts, 8),
            card(53, Suit::Hearts, 8),
            card(2, Suit::Clubs, 8),
            card(3, Suit::Spades, 8),
        ];
        let sets = candidate_sets(&hand);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].cards.len(), 3);
    }

    #[test]
    fn test_pair_plus_joker_is_set() {
        let hand = [card(1, Suit::Hearts, 6), card(2, Suit::Clubs, 6), joker(0)];
        let sets = candidate_sets(&hand);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].points, 18);
    }

    #[test]
    fn test_runs_segments_and_bridge() {
        let hand = [
            card(1, Suit::Spades, 5),
            card(2, Suit::Spades, 7),
            card(3, Suit::Spades, 8),
            joker(0),
        ];
        let runs = candidate_runs(&hand);
        // 5 + JK + 7 8 bridged, 7 8 + JK extended
        assert!(runs.iter().any(|r| r.cards.len() == 4 && r.points == 26));
        assert!(runs.iter().any(|r| r.cards.len() == 3 && r.contains(CardId::new(2))));
        assert!(runs.iter().all(|r| validator::is_valid_run(&r.cards)));
    }

    #[test]
    fn test_plain_run_without_joker() {
        let hand = [card(1, Suit::Clubs, 1), card(2, Suit::Clubs, 2), card(3, Suit::Clubs, 3)];
        let runs = candidate_runs(&hand);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].points, 6);
    }

    #[test]
    fn test_find_opening_disjoint_pair() {
        let hand = [
            card(1, Suit::Hearts, 13),
            card(2, Suit::Diamonds, 13),
            card(3, Suit::Clubs, 13),
            card(4, Suit::Spades, 12),
            card(5, Suit::Clubs, 12),
            card(6, Suit::Diamonds, 12),
            card(7, Suit::Hearts, 3),
        ];
        let opening = find_opening(&hand, 51, None).unwrap();
        assert_eq!(opening.len(), 2);
        assert_eq!(opening.iter().map(|c| c.points).sum::<u32>(), 60);
        assert!(!opening[0].overlaps(&opening[1]));
    }

    #[test]
    fn test_find_opening_below_threshold() {
        let hand = [card(1, Suit::Hearts, 7), card(2, Suit::Diamonds, 7), card(3, Suit::Clubs, 7)];
        assert!(find_opening(&hand, 51, None).is_none());
        assert!(find_opening(&hand, 21, None).is_some());
    }

    #[test]
    fn test_find_opening_requires_card() {
        let hand = [
            card(1, Suit::Hearts, 13),
            card(2, Suit::Diamonds, 13),
            card(3, Suit::Clubs, 13),
            card(4, Suit::Spades, 13),
            card(9, Suit::Hearts, 4),
        ];
        assert!(find_opening(&hand, 40, None).is_some());
        assert!(find_opening(&hand, 40, Some(CardId::new(9))).is_none());
    }

    #[test]
    fn test_find_meld_with_prefers_named_copy() {
        let hand = [
            card(1, Suit::Diamonds, 9),
            card(2, Suit::Clubs, 9),
            card(3, Suit::Spades, 9),
            card(53, Suit::Diamonds, 9),
        ];
        let meld = find_meld_with(&hand, CardId::new(53)).unwrap();
        assert!(meld.contains(CardId::new(53)));
        assert!(!meld.contains(CardId::new(1)));
    }

    #[test]
    fn test_meldable_cards() {
        let hand = [
            card(1, Suit::Hearts, 4),
            card(2, Suit::Hearts, 5),
            card(3, Suit::Hearts, 6),
            card(4, Suit::Clubs, 11),
        ];
        let ids = meldable_cards(&hand);
        assert!(ids.contains(&CardId::new(2)));
        assert!(!ids.contains(&CardId::new(4)));
    }
}
