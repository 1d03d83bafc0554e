use crate::auction::Auction;
use crate::board::{Partnership, Position, Vulnerability};
use crate::call::Call;
use crate::card::Card;
use crate::contract::Contract;
use crate::error::{HandError, IllegalCall, IllegalPlay};
use crate::hand::Hand;
use crate::trick::Trick;
use crate::{CARDS_IN_HAND, SEATS};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shuffle the deck and split it into four hands, North first.
pub fn deal_hands(rng: &mut impl Rng) -> [Hand; SEATS] {
    let mut deck: Vec<Card> = Card::all().collect();
    deck.shuffle(rng);
    let mut chunks = deck.chunks(CARDS_IN_HAND);
    std::array::from_fn(|_| Hand::from_distinct(chunks.next().unwrap_or_default().to_vec()))
}

/// One board from the deal through the last trick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    vulnerability: Vulnerability,
    /// Indexed by `Position::idx`.
    hands: [Hand; SEATS],
    auction: Auction,
    tricks: Vec<Trick>,
    current: Option<Trick>,
}

impl Deal {
    pub fn new(
        dealer: Position,
        vulnerability: Vulnerability,
        hands: [Hand; SEATS],
    ) -> Result<Self, HandError> {
        let mut seen = HashSet::new();
        for card in hands.iter().flat_map(|h| h.cards()) {
            if !seen.insert(*card) {
                return Err(HandError::DealtTwice(*card));
            }
        }
        Ok(Self {
            vulnerability,
            hands,
            auction: Auction::new(dealer),
            tricks: Vec::with_capacity(CARDS_IN_HAND),
            current: None,
        })
    }

    /// A freshly shuffled board, with dealer and vulnerability taken from the
    /// board number.
    pub fn random(board_number: u32, rng: &mut impl Rng) -> Self {
        Self {
            vulnerability: Vulnerability::from_board_number(board_number),
            hands: deal_hands(rng),
            auction: Auction::new(Position::dealer_from_board_number(board_number)),
            tricks: Vec::with_capacity(CARDS_IN_HAND),
            current: None,
        }
    }

    pub fn dealer(&self) -> Position {
        self.auction.dealer()
    }

    pub fn vulnerability(&self) -> Vulnerability {
        self.vulnerability
    }

    pub fn hand(&self, pos: Position) -> &Hand {
        &self.hands[pos.idx()]
    }

    pub fn hands(&self) -> impl Iterator<Item = (Position, &Hand)> {
        Position::ALL.into_iter().zip(self.hands.iter())
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.auction.final_contract()
    }

    /// Completed tricks in play order.
    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.current.as_ref()
    }

    pub fn tricks_played(&self) -> usize {
        self.tricks.len()
    }

    pub fn tricks_won(&self, partnership: Partnership) -> usize {
        self.tricks
            .iter()
            .filter_map(Trick::winner)
            .filter(|w| partnership.contains(*w))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.tricks.len() == CARDS_IN_HAND
    }

    pub fn next_to_call(&self) -> Option<Position> {
        self.auction.next_to_call()
    }

    pub fn to_play(&self) -> Option<Position> {
        self.current.as_ref().and_then(Trick::to_play)
    }

    /// Make the next call. Settling on a contract opens play.
    pub fn call(&mut self, call: Call) -> Result<(), IllegalCall> {
        self.auction.add_call(call)?;
        if let Some(contract) = self.auction.final_contract() {
            debug!("{} on lead against {}", contract.opening_leader().name(), contract);
            self.current = Some(Trick::opening(contract));
        }
        Ok(())
    }

    /// Cards the seat due to play may choose from.
    pub fn legal_plays(&self) -> Vec<Card> {
        match (&self.current, self.to_play()) {
            (Some(trick), Some(seat)) => self.hand(seat).legal_plays(trick),
            _ => Vec::new(),
        }
    }

    /// Play `card` from the hand due to play. Returns the seat that played it.
    pub fn play(&mut self, card: Card) -> Result<Position, IllegalPlay> {
        let trick = self.current.as_ref().ok_or(IllegalPlay::NotInPlay)?;
        let seat = trick.to_play().ok_or(IllegalPlay::TrickClosed)?;
        if let Some(holder) = Position::ALL
            .into_iter()
            .find(|p| *p != seat && self.hand(*p).holds(card))
        {
            return Err(IllegalPlay::OutOfTurn {
                expected: seat,
                actual: holder,
            });
        }
        self.hand(seat).check_play(card, trick)?;

        let trick = self.current.as_mut().ok_or(IllegalPlay::NotInPlay)?;
        trick.play(card)?;
        self.hands[seat.idx()].play_card(card);
        if trick.is_closed() {
            if let Some(trick) = self.current.take() {
                self.close_trick(trick);
            }
        }
        Ok(seat)
    }

    /// Record a trick resolved elsewhere, marking each seat's card as played.
    ///
    /// Only accepted once play has started, with the same leader and strain as
    /// the trick in play. Nothing changes unless every card is held, unplayed,
    /// by the seat that played it.
    pub fn add_trick(&mut self, trick: Trick) -> Result<(), IllegalPlay> {
        let expected = match (self.contract(), &self.current) {
            (Some(_), Some(current)) => current,
            _ => return Err(IllegalPlay::NotInPlay),
        };
        if !trick.is_closed() {
            return Err(IllegalPlay::Incomplete);
        }
        if !expected.is_empty() {
            return Err(IllegalPlay::InProgress);
        }
        if trick.leader() != expected.leader() || trick.strain() != expected.strain() {
            return Err(IllegalPlay::OutOfSequence);
        }
        for (seat, card) in trick.plays() {
            let hand = self.hand(seat);
            if !hand.holds(card) {
                return Err(IllegalPlay::NotHeld(card));
            }
            if hand.has_played(card) {
                return Err(IllegalPlay::AlreadyPlayed(card));
            }
        }
        for (seat, card) in trick.plays() {
            self.hands[seat.idx()].play_card(card);
        }
        self.current = None;
        self.close_trick(trick);
        Ok(())
    }

    fn close_trick(&mut self, trick: Trick) {
        let strain = trick.strain();
        let winner = trick.winner();
        self.tricks.push(trick);
        if let Some(winner) = winner {
            debug!("trick {} won by {}", self.tricks.len(), winner.name());
            if !self.is_complete() {
                self.current = Some(Trick::new(strain, winner));
            }
        }
        if self.is_complete() {
            if let Some(contract) = self.contract() {
                debug!(
                    "play complete: {} took {} tricks",
                    contract.declarer.name(),
                    self.tricks_won(contract.partnership())
                );
            }
        }
    }
}
