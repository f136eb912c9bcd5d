//! Turn transitions on a `RoundState`.
//!
//! Each transition checks everything it needs before touching state, so a
//! rejected intent leaves the round byte-for-byte unchanged. Accepted
//! transitions only move cards between zones.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::cards::{Card, CardId};
use crate::core::{
    ActionKind, CardGroup, DrawSource, EmptyResource, GameRng, IllegalAction, MeldEntry,
    MeldRejection, PlayerId, RamiConfig, RamiError, RoundOutcome, RoundState, TurnContext,
    TurnPhase,
};
use crate::melds::{self, MeldId, MeldKind};
use crate::zones::Zone;

/// What an accepted transition did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    /// Same player keeps acting.
    Continued,
    /// The turn moved to the next seat.
    TurnPassed { next: PlayerId },
    Ended(RoundOutcome),
}

impl RoundState {
    /// Draw the top card of the deck or the discard pile.
    ///
    /// An empty deck is refilled from all but the top discard. If the
    /// discard pile has nothing to give, the round ends exhausted.
    pub fn draw(
        &mut self,
        player: PlayerId,
        source: DrawSource,
        rng: &mut GameRng,
    ) -> Result<RoundEvent, RamiError> {
        self.expect_turn(player)?;
        if !matches!(self.phase, TurnPhase::AwaitingDraw) {
            return Err(self.wrong_phase(ActionKind::Draw));
        }

        let hand = Zone::Hand(player);
        let card = match source {
            DrawSource::Discard => {
                let top = self
                    .zones
                    .top(Zone::Discard)
                    .copied()
                    .ok_or(EmptyResource::DiscardPile)?;
                self.zones.move_card(top.id, hand);
                top
            }
            DrawSource::Deck => {
                if self.zones.is_empty(Zone::Deck) {
                    if self.zones.len(Zone::Discard) <= 1 {
                        let outcome = RoundOutcome::Exhausted;
                        self.phase = TurnPhase::RoundOver { outcome };
                        return Ok(RoundEvent::Ended(outcome));
                    }
                    self.replenish_deck(rng);
                }
                self.zones
                    .move_top(Zone::Deck, hand)
                    .ok_or(EmptyResource::Deck)?
            }
        };

        let turn = TurnContext {
            source,
            drawn: card.id,
            opened_at_start: self.has_opened(player),
        };
        self.phase = TurnPhase::AwaitingMeldOrDiscard {
            turn,
            forced_card: (source == DrawSource::Discard).then_some(card.id),
        };
        Ok(RoundEvent::Continued)
    }

    /// Lay one or more new melds from the player's hand.
    ///
    /// All groups are validated together and committed together. Before
    /// the player has opened, their combined value must reach the
    /// first-meld threshold. While a discard-drawn card is pending, it must
    /// be in one of the groups.
    pub fn propose_melds(
        &mut self,
        player: PlayerId,
        groups: &[CardGroup],
        config: &RamiConfig,
    ) -> Result<RoundEvent, RamiError> {
        self.expect_turn(player)?;
        let (turn, forced) = self.meld_window(ActionKind::ProposeMeld)?;
        if groups.is_empty() {
            return Err(MeldRejection::TooFewCards(0).into());
        }

        let mut seen: FxHashSet<CardId> = FxHashSet::default();
        let mut resolved: Vec<(MeldKind, Vec<Card>)> = Vec::with_capacity(groups.len());
        for group in groups {
            let mut cards = Vec::with_capacity(group.len());
            for &id in group {
                if !seen.insert(id) {
                    return Err(MeldRejection::DuplicateCard(id).into());
                }
                let card = self.hand_card(player, id)?;
                cards.push(card);
            }
            let kind = melds::classify(&cards)?;
            resolved.push((kind, melds::arrange(kind, &cards)));
        }

        if let Some(card) = forced {
            if !seen.contains(&card) {
                return Err(RamiError::ForcedCardUnused { card });
            }
        }

        if !self.has_opened(player) {
            let actual: u32 = resolved
                .iter()
                .map(|(kind, cards)| melds::group_points(*kind, cards))
                .sum();
            if actual < config.first_meld_points {
                return Err(RamiError::InsufficientMeldValue {
                    required: config.first_meld_points,
                    actual,
                });
            }
        }

        for (kind, cards) in resolved {
            let id = self.alloc_meld_id();
            self.melds.push(MeldEntry { id, kind, owner: player });
            for card in &cards {
                self.zones.move_card(card.id, Zone::Meld(id));
            }
        }
        self.opened[player] = true;
        self.phase = TurnPhase::AwaitingDiscard { turn };
        Ok(self.after_meld(player, turn))
    }

    /// Add one card from the player's hand to a meld on the table.
    ///
    /// A player who has not opened may only extend their own melds, which
    /// in practice means none.
    pub fn extend_meld(
        &mut self,
        player: PlayerId,
        meld: MeldId,
        card: CardId,
    ) -> Result<RoundEvent, RamiError> {
        self.expect_turn(player)?;
        let (turn, forced) = self.meld_window(ActionKind::ExtendMeld)?;

        let entry = *self.meld_entry(meld).ok_or(RamiError::UnknownMeld(meld))?;
        let added = self.hand_card(player, card)?;
        if let Some(pending) = forced {
            if pending != card {
                return Err(RamiError::ForcedCardUnused { card: pending });
            }
        }
        if !self.has_opened(player) && entry.owner != player {
            return Err(IllegalAction::MeldNotOwned { meld, owner: entry.owner }.into());
        }

        let zone = Zone::Meld(meld);
        melds::check_extension(entry.kind, self.zones.cards(zone), &added)?;

        let mut grown = self.zones.cards(zone).to_vec();
        grown.push(added);
        let arranged = melds::arrange(entry.kind, &grown);
        self.zones.move_card(card, zone);
        self.zones.set_order(zone, arranged);

        self.phase = TurnPhase::AwaitingDiscard { turn };
        Ok(self.after_meld(player, turn))
    }

    /// Put a card from hand on the discard pile and end the turn.
    pub fn discard(&mut self, player: PlayerId, card: CardId) -> Result<RoundEvent, RamiError> {
        self.expect_turn(player)?;
        let turn = match self.phase {
            TurnPhase::AwaitingMeldOrDiscard {
                forced_card: Some(pending),
                ..
            } => return Err(RamiError::ForcedCardUnused { card: pending }),
            TurnPhase::AwaitingMeldOrDiscard { turn, forced_card: None }
            | TurnPhase::AwaitingDiscard { turn } => turn,
            _ => return Err(self.wrong_phase(ActionKind::Discard)),
        };
        self.hand_card(player, card)?;

        self.zones.move_card(card, Zone::Discard);
        if self.zones.is_empty(Zone::Hand(player)) {
            let outcome = RoundOutcome::Won {
                winner: player,
                clean: !turn.opened_at_start,
            };
            self.phase = TurnPhase::RoundOver { outcome };
            return Ok(RoundEvent::Ended(outcome));
        }
        Ok(self.pass_turn())
    }

    /// Return the pending discard-drawn card to the top of the pile and
    /// pass the turn without discarding.
    pub fn forfeit_forced_draw(&mut self, player: PlayerId) -> Result<RoundEvent, RamiError> {
        self.expect_turn(player)?;
        let Some(card) = self.phase.forced_card() else {
            return Err(self.wrong_phase(ActionKind::ForfeitForcedDraw));
        };
        self.hand_card(player, card)?;

        self.zones.move_card(card, Zone::Discard);
        Ok(self.pass_turn())
    }

    /// Intent kinds the player may submit right now.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<ActionKind> {
        if player != self.current || !self.opened.contains(player) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match self.phase {
            TurnPhase::AwaitingDraw => actions.push(ActionKind::Draw),
            TurnPhase::AwaitingMeldOrDiscard { forced_card, .. } => {
                actions.push(ActionKind::ProposeMeld);
                if !self.melds.is_empty() {
                    actions.push(ActionKind::ExtendMeld);
                }
                actions.push(if forced_card.is_some() {
                    ActionKind::ForfeitForcedDraw
                } else {
                    ActionKind::Discard
                });
            }
            TurnPhase::AwaitingDiscard { .. } => {
                actions.push(ActionKind::ProposeMeld);
                actions.push(ActionKind::ExtendMeld);
                actions.push(ActionKind::Discard);
            }
            TurnPhase::RoundOver { .. } => {}
        }
        actions
    }

    fn expect_turn(&self, player: PlayerId) -> Result<(), RamiError> {
        if self.phase.is_round_over() {
            return Err(IllegalAction::RoundOver.into());
        }
        if !self.opened.contains(player) {
            return Err(IllegalAction::UnknownPlayer(player).into());
        }
        if player != self.current {
            return Err(IllegalAction::NotYourTurn {
                expected: self.current,
                actual: player,
            }
            .into());
        }
        Ok(())
    }

    /// Phases in which melding is allowed, with the pending forced card.
    fn meld_window(&self, action: ActionKind) -> Result<(TurnContext, Option<CardId>), RamiError> {
        match self.phase {
            TurnPhase::AwaitingMeldOrDiscard { turn, forced_card } => Ok((turn, forced_card)),
            TurnPhase::AwaitingDiscard { turn } => Ok((turn, None)),
            _ => Err(self.wrong_phase(action)),
        }
    }

    fn wrong_phase(&self, action: ActionKind) -> RamiError {
        IllegalAction::WrongPhase {
            action,
            phase: self.phase.kind(),
        }
        .into()
    }

    fn hand_card(&self, player: PlayerId, card: CardId) -> Result<Card, RamiError> {
        self.zones
            .find_in(Zone::Hand(player), card)
            .ok_or(RamiError::UnknownCard(card))
    }

    /// Going out by melding the last card wins without a discard.
    fn after_meld(&mut self, player: PlayerId, turn: TurnContext) -> RoundEvent {
        if !self.zones.is_empty(Zone::Hand(player)) {
            return RoundEvent::Continued;
        }
        let outcome = RoundOutcome::Won {
            winner: player,
            clean: !turn.opened_at_start,
        };
        self.phase = TurnPhase::RoundOver { outcome };
        RoundEvent::Ended(outcome)
    }

    fn pass_turn(&mut self) -> RoundEvent {
        let next = self.current.next(self.player_count());
        self.current = next;
        self.turn += 1;
        self.phase = TurnPhase::AwaitingDraw;
        RoundEvent::TurnPassed { next }
    }

    fn replenish_deck(&mut self, rng: &mut GameRng) {
        let moved = self.zones.move_all_but_top(Zone::Discard, Zone::Deck);
        self.zones.shuffle_zone(Zone::Deck, rng);
        trace!(round = self.number, cards = moved, "deck replenished from discard pile");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use smallvec::smallvec;

    fn id(suit: Suit, rank: u8, copy: u8) -> CardId {
        CardId::new(copy * 52 + suit.index() as u8 * 13 + (rank - 1))
    }

    /// Hearts, diamonds and clubs of one rank.
    fn set_of(rank: u8, copy: u8) -> CardGroup {
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs]
            .into_iter()
            .map(|suit| id(suit, rank, copy))
            .collect()
    }

    fn card(suit: Suit, rank: u8, copy: u8) -> Card {
        Card::standard(id(suit, rank, copy), suit, Rank::from_number(rank).unwrap())
    }

    /// A two-player round with every card parked in the deck, to be
    /// rearranged by the test.
    fn staged_round() -> (RoundState, GameRng) {
        let mut rng = GameRng::new(11);
        let round = RoundState::deal(1, 2, PlayerId::new(0), 1, &RamiConfig::default(), &mut rng);
        (round, rng)
    }

    fn give(round: &mut RoundState, player: PlayerId, cards: &[CardId]) {
        for &c in cards {
            round.zones.move_card(c, Zone::Hand(player));
        }
    }

    fn clear_hand(round: &mut RoundState, player: PlayerId) {
        let ids: Vec<CardId> = round.hand(player).iter().map(|c| c.id).collect();
        for c in ids {
            round.zones.move_card(c, Zone::Deck);
        }
    }

    fn discard_on_top(round: &mut RoundState, card: CardId) {
        round.zones.move_card(card, Zone::Hand(PlayerId::new(1)));
        round.zones.move_card(card, Zone::Discard);
    }

    fn deck_on_top(round: &mut RoundState, card: CardId) {
        round.zones.move_card(card, Zone::Hand(PlayerId::new(1)));
        round.zones.move_card(card, Zone::Deck);
    }

    #[test]
    fn test_draw_from_deck() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        let top = round.zones.top(Zone::Deck).copied().unwrap();

        let event = round.draw(p0, DrawSource::Deck, &mut rng).unwrap();
        assert_eq!(event, RoundEvent::Continued);
        assert_eq!(round.hand(p0).len(), 15);
        assert!(round.zones.is_in_zone(top.id, Zone::Hand(p0)));
        assert_eq!(round.phase.forced_card(), None);
    }

    #[test]
    fn test_draw_out_of_turn_rejected() {
        let (mut round, mut rng) = staged_round();
        let err = round.draw(PlayerId::new(1), DrawSource::Deck, &mut rng).unwrap_err();
        assert!(matches!(err, RamiError::IllegalAction(IllegalAction::NotYourTurn { .. })));
        assert_eq!(round.hand(PlayerId::new(1)).len(), 14);
    }

    #[test]
    fn test_draw_twice_rejected() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();
        let err = round.draw(p0, DrawSource::Deck, &mut rng).unwrap_err();
        assert!(matches!(err, RamiError::IllegalAction(IllegalAction::WrongPhase { .. })));
    }

    #[test]
    fn test_discard_draw_sets_forced_card() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        let top = round.discard_top().copied().unwrap();

        round.draw(p0, DrawSource::Discard, &mut rng).unwrap();
        assert_eq!(round.phase.forced_card(), Some(top.id));
        assert!(round.discard_pile().is_empty());

        let other = round.hand(p0).iter().find(|c| c.id != top.id).unwrap().id;
        let err = round.discard(p0, other).unwrap_err();
        assert_eq!(err, RamiError::ForcedCardUnused { card: top.id });
    }

    #[test]
    fn test_draw_from_empty_discard() {
        let (mut round, mut rng) = staged_round();
        let top = round.discard_top().copied().unwrap();
        round.zones.move_card(top.id, Zone::Deck);

        let err = round.draw(PlayerId::new(0), DrawSource::Discard, &mut rng).unwrap_err();
        assert_eq!(err, RamiError::EmptyResource(EmptyResource::DiscardPile));
        assert!(matches!(round.phase, TurnPhase::AwaitingDraw));
    }

    #[test]
    fn test_empty_deck_replenishes_from_discard() {
        let (mut round, mut rng) = staged_round();
        let deck: Vec<CardId> = round.zones.cards(Zone::Deck).iter().map(|c| c.id).collect();
        for c in deck {
            round.zones.move_card(c, Zone::Discard);
        }
        let pile = round.discard_pile().len();
        let top = round.discard_top().copied().unwrap();

        round.draw(PlayerId::new(0), DrawSource::Deck, &mut rng).unwrap();
        assert_eq!(round.discard_pile(), &[top]);
        assert_eq!(round.deck_count(), pile - 2);
        assert!(round.audit());
    }

    #[test]
    fn test_exhausted_round() {
        let (mut round, mut rng) = staged_round();
        let deck: Vec<CardId> = round.zones.cards(Zone::Deck).iter().map(|c| c.id).collect();
        for c in deck {
            round.zones.move_card(c, Zone::Hand(PlayerId::new(1)));
        }

        let event = round.draw(PlayerId::new(0), DrawSource::Deck, &mut rng).unwrap();
        assert_eq!(event, RoundEvent::Ended(RoundOutcome::Exhausted));
        assert!(round.phase.is_round_over());
        assert_eq!(round.card_count(), crate::cards::DECK_SIZE);
    }

    #[test]
    fn test_opening_below_threshold_rejected() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        clear_hand(&mut round, p0);
        let sevens = [id(Suit::Hearts, 7, 0), id(Suit::Diamonds, 7, 0), id(Suit::Clubs, 7, 0)];
        give(&mut round, p0, &sevens);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();

        let before = round.hand(p0).to_vec();
        let err = round
            .propose_melds(
                p0,
                &[smallvec![sevens[0], sevens[1], sevens[2]]],
                &RamiConfig::default(),
            )
            .unwrap_err();
        assert_eq!(err, RamiError::InsufficientMeldValue { required: 51, actual: 21 });
        assert_eq!(round.hand(p0), before.as_slice());
        assert_eq!(round.meld_count(), 0);
        assert!(!round.has_opened(p0));
    }

    #[test]
    fn test_multi_group_opening() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        clear_hand(&mut round, p0);
        let kings = set_of(13, 0);
        let run: CardGroup = smallvec![
            id(Suit::Spades, 9, 0),
            id(Suit::Spades, 10, 0),
            id(Suit::Spades, 11, 0)
        ];
        give(&mut round, p0, &kings);
        give(&mut round, p0, &run);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();

        let event = round
            .propose_melds(p0, &[kings.clone(), run.clone()], &RamiConfig::default())
            .unwrap();
        assert_eq!(event, RoundEvent::Continued);
        assert!(round.has_opened(p0));
        assert_eq!(round.meld_count(), 2);
        assert_eq!(round.hand(p0).len(), 1);
        assert!(matches!(round.phase, TurnPhase::AwaitingDiscard { .. }));
        assert!(round.audit());
    }

    #[test]
    fn test_duplicate_id_across_groups_rejected() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        clear_hand(&mut round, p0);
        let kings = [id(Suit::Hearts, 13, 0), id(Suit::Diamonds, 13, 0), id(Suit::Clubs, 13, 0)];
        give(&mut round, p0, &kings);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();

        let err = round
            .propose_melds(
                p0,
                &[smallvec![kings[0], kings[1], kings[2]], smallvec![kings[0]]],
                &RamiConfig::default(),
            )
            .unwrap_err();
        assert_eq!(err, RamiError::InvalidMeld(MeldRejection::DuplicateCard(kings[0])));
    }

    #[test]
    fn test_unknown_card_rejected() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();
        let foreign = round.hand(PlayerId::new(1))[0].id;
        let err = round.discard(p0, foreign).unwrap_err();
        assert_eq!(err, RamiError::UnknownCard(foreign));
    }

    #[test]
    fn test_forced_card_must_be_in_meld() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        clear_hand(&mut round, p0);
        let kings = set_of(13, 0);
        let queens = set_of(12, 0);
        give(&mut round, p0, &kings);
        give(&mut round, p0, &queens[..2]);
        let forced = queens[2];
        discard_on_top(&mut round, forced);

        round.draw(p0, DrawSource::Discard, &mut rng).unwrap();
        let err = round
            .propose_melds(p0, &[kings.clone()], &RamiConfig::default())
            .unwrap_err();
        assert_eq!(err, RamiError::ForcedCardUnused { card: forced });

        round
            .propose_melds(p0, &[kings, queens], &RamiConfig::default())
            .unwrap();
        assert!(round.has_opened(p0));
        assert_eq!(round.phase.forced_card(), None);
    }

    #[test]
    fn test_forfeit_returns_card() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        let top = round.discard_top().copied().unwrap();

        round.draw(p0, DrawSource::Discard, &mut rng).unwrap();
        let event = round.forfeit_forced_draw(p0).unwrap();
        assert_eq!(event, RoundEvent::TurnPassed { next: PlayerId::new(1) });
        assert_eq!(round.discard_top(), Some(&top));
        assert_eq!(round.hand(p0).len(), 14);
        assert_eq!(round.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_forfeit_without_discard_draw_rejected() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();
        let err = round.forfeit_forced_draw(p0).unwrap_err();
        assert!(matches!(err, RamiError::IllegalAction(IllegalAction::WrongPhase { .. })));
    }

    #[test]
    fn test_extend_requires_opening_for_foreign_meld() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        // player 1 already has a run of hearts 4-5-6 on the table
        let meld = round.alloc_meld_id();
        round.melds.push(MeldEntry { id: meld, kind: MeldKind::Run, owner: p1 });
        for rank in 4..=6 {
            round.zones.move_card(id(Suit::Hearts, rank, 0), Zone::Meld(meld));
        }
        round.opened[p1] = true;

        let seven = id(Suit::Hearts, 7, 0);
        clear_hand(&mut round, p0);
        give(&mut round, p0, &[seven, id(Suit::Clubs, 2, 0)]);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();

        let err = round.extend_meld(p0, meld, seven).unwrap_err();
        assert_eq!(err, RamiError::IllegalAction(IllegalAction::MeldNotOwned { meld, owner: p1 }));

        round.opened[p0] = true;
        round.extend_meld(p0, meld, seven).unwrap();
        let cards = round.meld(meld).unwrap().cards;
        assert_eq!(cards.last().map(|c| c.id), Some(seven));
        assert_eq!(cards.len(), 4);
    }

    #[test]
    fn test_extend_with_wrong_card_rejected() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        let meld = round.alloc_meld_id();
        round.melds.push(MeldEntry { id: meld, kind: MeldKind::Run, owner: p0 });
        for rank in 4..=6 {
            round.zones.move_card(id(Suit::Hearts, rank, 0), Zone::Meld(meld));
        }
        round.opened[p0] = true;

        let nine = id(Suit::Hearts, 9, 0);
        give(&mut round, p0, &[nine]);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();

        let err = round.extend_meld(p0, meld, nine).unwrap_err();
        assert_eq!(err, RamiError::InvalidMeld(MeldRejection::CannotExtend(nine)));
        assert_eq!(round.meld(meld).unwrap().len(), 3);

        let err = round.extend_meld(p0, MeldId::new(99), nine).unwrap_err();
        assert_eq!(err, RamiError::UnknownMeld(MeldId::new(99)));
    }

    #[test]
    fn test_discard_passes_turn() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();
        let card = round.hand(p0)[0];

        let event = round.discard(p0, card.id).unwrap();
        assert_eq!(event, RoundEvent::TurnPassed { next: PlayerId::new(1) });
        assert_eq!(round.discard_top(), Some(&card));
        assert_eq!(round.turn(), 2);
        assert!(matches!(round.phase, TurnPhase::AwaitingDraw));
    }

    #[test]
    fn test_going_out_by_discard() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        clear_hand(&mut round, p0);
        round.opened[p0] = true;
        let run: CardGroup = smallvec![
            id(Suit::Spades, 4, 0),
            id(Suit::Spades, 5, 0),
            id(Suit::Spades, 6, 0)
        ];
        give(&mut round, p0, &run);
        let two = id(Suit::Clubs, 2, 0);
        deck_on_top(&mut round, two);

        round.draw(p0, DrawSource::Deck, &mut rng).unwrap();
        round.propose_melds(p0, &[run], &RamiConfig::default()).unwrap();
        let event = round.discard(p0, two).unwrap();
        assert_eq!(
            event,
            RoundEvent::Ended(RoundOutcome::Won { winner: p0, clean: false })
        );
        assert_eq!(round.discard_top().map(|c| c.id), Some(two));
        assert_eq!(round.current_player(), p0);
    }

    #[test]
    fn test_clean_win_by_melding_everything() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        clear_hand(&mut round, p0);
        let kings = set_of(13, 0);
        let queens: CardGroup = smallvec![id(Suit::Hearts, 12, 0), id(Suit::Diamonds, 12, 0)];
        give(&mut round, p0, &kings);
        give(&mut round, p0, &queens);
        discard_on_top(&mut round, id(Suit::Clubs, 12, 0));

        round.draw(p0, DrawSource::Discard, &mut rng).unwrap();
        let mut all_queens = queens.clone();
        all_queens.push(id(Suit::Clubs, 12, 0));
        let event = round
            .propose_melds(p0, &[kings, all_queens], &RamiConfig::default())
            .unwrap();
        assert_eq!(
            event,
            RoundEvent::Ended(RoundOutcome::Won { winner: p0, clean: true })
        );
        assert!(round.hand(p0).is_empty());
    }

    #[test]
    fn test_legal_actions_follow_phase() {
        let (mut round, mut rng) = staged_round();
        let p0 = PlayerId::new(0);
        assert_eq!(round.legal_actions(p0), vec![ActionKind::Draw]);
        assert!(round.legal_actions(PlayerId::new(1)).is_empty());

        round.draw(p0, DrawSource::Discard, &mut rng).unwrap();
        assert_eq!(
            round.legal_actions(p0),
            vec![ActionKind::ProposeMeld, ActionKind::ForfeitForcedDraw]
        );
    }
}
