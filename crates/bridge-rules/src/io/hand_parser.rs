use crate::card::Card;
use crate::error::ParseError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a hand in the dotted "Clubs.Diamonds.Hearts.Spades" notation,
/// e.g. `AKQJ.T98.765.432`. Suits may be empty; `10` is accepted for the ten.
pub fn parse_hand(s: &str) -> Result<Hand, ParseError> {
    let err = || ParseError::Hand(s.to_string());
    let groups: Vec<&str> = s.trim().split('.').collect();
    if groups.len() != Suit::ALL.len() {
        return Err(err());
    }
    let mut cards = Vec::new();
    for (suit, group) in Suit::ALL.into_iter().zip(groups) {
        let group = group.replace("10", "T");
        for c in group.chars() {
            let rank = Rank::from_char(c).ok_or_else(err)?;
            cards.push(Card::new(suit, rank));
        }
    }
    Hand::new(cards).map_err(|_| err())
}

/// Renders a hand in the same notation, ten as `T`.
pub fn format_hand(hand: &Hand) -> String {
    Suit::ALL
        .into_iter()
        .map(|suit| {
            hand.suit_cards(suit)
                .map(|c| c.rank().to_char())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".")
}
