use crate::board::Position;
use crate::card::Card;
use crate::contract::Contract;
use crate::error::IllegalPlay;
use crate::strain::Strain;
use crate::suit::Suit;
use crate::SEATS;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// One round of play: up to four cards, one per seat, starting with the
/// leader and going clockwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    strain: Strain,
    leader: Position,
    cards: Vec<Card>,
    /// Slot in `cards` holding the card currently winning.
    winning_slot: usize,
}

impl Trick {
    pub fn new(strain: Strain, leader: Position) -> Self {
        Self {
            strain,
            leader,
            cards: Vec::with_capacity(SEATS),
            winning_slot: 0,
        }
    }

    /// The first trick of play: declarer's LHO leads under the contract strain.
    pub fn opening(contract: &Contract) -> Self {
        Self::new(contract.strain, contract.opening_leader())
    }

    pub fn strain(&self) -> Strain {
        self.strain
    }

    pub fn leader(&self) -> Position {
        self.leader
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.cards.len() == SEATS
    }

    pub fn players_to_go(&self) -> usize {
        SEATS - self.cards.len()
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.cards.first().map(|c| c.suit())
    }

    /// Seat due to play, `None` once all four have played.
    pub fn to_play(&self) -> Option<Position> {
        (!self.is_closed()).then(|| self.leader.offset(self.cards.len()))
    }

    /// `(seat, card)` in play order.
    pub fn plays(&self) -> impl Iterator<Item = (Position, Card)> + '_ {
        self.cards
            .iter()
            .enumerate()
            .map(|(slot, card)| (self.leader.offset(slot), *card))
    }

    /// The card this seat contributed, if it has played yet.
    pub fn card_played_by(&self, pos: Position) -> Option<Card> {
        self.cards.get(self.leader.distance_to(pos)).copied()
    }

    pub fn winning_card(&self) -> Option<Card> {
        self.cards.get(self.winning_slot).copied()
    }

    /// Seat currently holding the trick; `None` before the lead.
    pub fn winning_seat(&self) -> Option<Position> {
        (!self.is_empty()).then(|| self.leader.offset(self.winning_slot))
    }

    /// Seat that won the trick; `None` until the fourth card is played.
    pub fn winner(&self) -> Option<Position> {
        if self.is_closed() {
            self.winning_seat()
        } else {
            None
        }
    }

    /// Whether `card`, played next, would take over the trick.
    pub fn card_will_win(&self, card: Card) -> bool {
        match self.winning_card() {
            None => true,
            Some(winning) => beats(card, winning, self.strain.trump()),
        }
    }

    pub fn lead(&mut self, card: Card) -> Result<(), IllegalPlay> {
        if !self.is_empty() {
            return Err(IllegalPlay::AlreadyLed);
        }
        trace!("{} leads {}", self.leader.name(), card);
        self.cards.push(card);
        self.winning_slot = 0;
        Ok(())
    }

    /// Add the next card in clockwise order. Leads if the trick is empty.
    pub fn play(&mut self, card: Card) -> Result<(), IllegalPlay> {
        if self.is_empty() {
            return self.lead(card);
        }
        if self.is_closed() {
            return Err(IllegalPlay::TrickClosed);
        }
        if self.cards.contains(&card) {
            return Err(IllegalPlay::DuplicateCard(card));
        }
        let wins = self.card_will_win(card);
        let seat = self.leader.offset(self.cards.len());
        trace!("{} plays {}", seat.name(), card);
        self.cards.push(card);
        if wins {
            self.winning_slot = self.cards.len() - 1;
        }
        if let Some(winner) = self.winner() {
            debug!("trick to {}", winner.name());
        }
        Ok(())
    }
}

/// Whether `card` beats the currently winning card under `trump`.
///
/// Only a trump can beat a card of another suit; otherwise the higher rank
/// of the same suit wins.
fn beats(card: Card, winning: Card, trump: Option<Suit>) -> bool {
    match trump {
        Some(t) if card.suit() == t && winning.suit() != t => true,
        Some(t) if card.suit() != t && winning.suit() == t => false,
        _ => card.suit() == winning.suit() && card.rank() > winning.rank(),
    }
}
