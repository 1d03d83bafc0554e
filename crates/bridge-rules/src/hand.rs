use crate::card::Card;
use crate::error::{HandError, IllegalPlay, ParseError};
use crate::suit::Suit;
use crate::trick::Trick;
use crate::CARDS_IN_HAND;
use serde::{Deserialize, Serialize};

/// Thirteen distinct cards, kept in ascending card order.
///
/// Played cards stay in the hand with their played flag set; `lengths`
/// counts only the cards still to be played. Two hands are equal only when
/// they hold the same cards with the same ones played.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand {
    cards: Vec<Card>,
    lengths: [u8; 4],
}

impl Hand {
    pub fn new(mut cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() != CARDS_IN_HAND {
            return Err(HandError::WrongSize(cards.len()));
        }
        cards.sort();
        if let Some(pair) = cards.windows(2).find(|w| w[0] == w[1]) {
            return Err(HandError::Duplicate(pair[0]));
        }
        Ok(Self::from_distinct(cards))
    }

    /// Caller guarantees 13 distinct cards.
    pub(crate) fn from_distinct(mut cards: Vec<Card>) -> Self {
        cards.sort();
        let mut hand = Self {
            cards,
            lengths: [0; 4],
        };
        hand.set_suits();
        hand
    }

    /// Parse the dotted `clubs.diamonds.hearts.spades` notation.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        crate::io::hand_parser::parse_hand(s)
    }

    fn set_suits(&mut self) {
        self.lengths = [0; 4];
        for card in self.cards.iter().filter(|c| !c.is_played()) {
            self.lengths[card.suit().idx()] += 1;
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn unplayed(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(|c| !c.is_played())
    }

    /// Cards of `suit` dealt to this hand, highest first, played or not.
    pub fn suit_cards(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards
            .iter()
            .rev()
            .copied()
            .filter(move |c| c.suit() == suit)
    }

    pub fn holds(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    pub fn has_played(&self, card: Card) -> bool {
        self.cards
            .binary_search(&card)
            .map(|i| self.cards[i].is_played())
            .unwrap_or(false)
    }

    /// Cards of `suit` still to be played.
    pub fn remaining_length(&self, suit: Suit) -> u8 {
        self.lengths[suit.idx()]
    }

    /// Cards of `suit` as dealt.
    pub fn length(&self, suit: Suit) -> u8 {
        self.suit_cards(suit).count() as u8
    }

    pub fn remaining(&self) -> usize {
        self.lengths.iter().map(|&l| l as usize).sum()
    }

    /// High card points, 4-3-2-1.
    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.point_count()).sum()
    }

    /// Mark `card` as played. Returns `false` if it is not in the hand or
    /// was played already.
    pub fn play_card(&mut self, card: Card) -> bool {
        match self.cards.binary_search(&card) {
            Ok(i) if !self.cards[i].is_played() => {
                self.cards[i].set_played(true);
                self.lengths[card.suit().idx()] -= 1;
                true
            }
            _ => false,
        }
    }

    /// Whether this hand may contribute `card` to `trick`.
    pub fn check_play(&self, card: Card, trick: &Trick) -> Result<(), IllegalPlay> {
        if trick.is_closed() {
            return Err(IllegalPlay::TrickClosed);
        }
        if !self.holds(card) {
            return Err(IllegalPlay::NotHeld(card));
        }
        if self.has_played(card) {
            return Err(IllegalPlay::AlreadyPlayed(card));
        }
        match trick.led_suit() {
            Some(led) if card.suit() != led && self.remaining_length(led) > 0 => {
                Err(IllegalPlay::MustFollowSuit(led))
            }
            _ => Ok(()),
        }
    }

    pub fn legal_plays(&self, trick: &Trick) -> Vec<Card> {
        self.unplayed()
            .filter(|c| self.check_play(*c, trick).is_ok())
            .collect()
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = HandError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Hand::new(cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.cards.len() == other.cards.len()
            && self
                .cards
                .iter()
                .zip(&other.cards)
                .all(|(a, b)| a == b && a.is_played() == b.is_played())
    }
}
