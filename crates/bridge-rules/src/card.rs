use crate::error::ParseError;
use crate::rank::Rank;
use crate::suit::Suit;
use crate::CARDS_IN_SUIT;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

static CARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(10|[2-9TJQKA])([CDHS])$").expect("card regex"));

/// One of the 52 cards, identified by `suit * 13 + rank`.
///
/// The played flag travels with the card but is not part of its identity:
/// equality, ordering and hashing only look at `id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "CardRepr")]
pub struct Card {
    id: u8,
    played: bool,
}

#[derive(Deserialize)]
struct CardRepr {
    id: u8,
    #[serde(default)]
    played: bool,
}

impl TryFrom<CardRepr> for Card {
    type Error = ParseError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        let mut card = Card::from_id(repr.id)
            .ok_or_else(|| ParseError::Card(format!("#{}", repr.id)))?;
        card.played = repr.played;
        Ok(card)
    }
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            id: (suit.idx() * CARDS_IN_SUIT + rank.idx()) as u8,
            played: false,
        }
    }

    /// `None` for ids outside `0..52`.
    pub fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < crate::CARDS_IN_DECK {
            Some(Self { id, played: false })
        } else {
            None
        }
    }

    pub fn id(self) -> u8 {
        self.id
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[self.id as usize / CARDS_IN_SUIT]
    }

    pub fn rank(self) -> Rank {
        Rank::ALL[self.id as usize % CARDS_IN_SUIT]
    }

    pub fn point_count(self) -> u8 {
        self.rank().points()
    }

    pub fn is_played(self) -> bool {
        self.played
    }

    pub fn set_played(&mut self, played: bool) {
        self.played = played;
    }

    /// Rank then suit, e.g. `10H` or `TH`.
    pub fn render(self, use10: bool) -> String {
        format!("{}{}", self.rank().render(use10), self.suit().to_char())
    }

    /// Suit then rank with `T` for the ten, as the LIN format writes cards.
    pub fn to_link(self) -> String {
        format!("{}{}", self.suit().to_char(), self.rank().to_char())
    }

    pub fn all() -> impl Iterator<Item = Card> {
        (0..crate::CARDS_IN_DECK as u8).map(|id| Card { id, played: false })
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = CARD_RE
            .captures(s.trim())
            .ok_or_else(|| ParseError::Card(s.to_string()))?;
        let rank = Rank::from_token(&caps[1].to_ascii_uppercase())
            .ok_or_else(|| ParseError::Card(s.to_string()))?;
        let suit = caps[2]
            .chars()
            .next()
            .and_then(Suit::from_char)
            .ok_or_else(|| ParseError::Card(s.to_string()))?;
        Ok(Card::new(suit, rank))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(true))
    }
}
