// cspell:ignore handviewer
use crate::board::{Position, Vulnerability};
use crate::call::Call;
use crate::card::Card;
use crate::deal::Deal;
use crate::error::{Error, ParseError};
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;
use crate::{CARDS_IN_HAND, SEATS};
use log::debug;

pub const HANDVIEWER_URL: &str = "https://www.bridgebase.com/tools/handviewer.html?lin=";

/// LIN lists hands starting with South and going clockwise.
const LIN_ORDER: [Position; SEATS] = [
    Position::South,
    Position::West,
    Position::North,
    Position::East,
];

/// Encode the deal, its calls and every played card as a LIN string.
pub fn export_deal(deal: &Deal) -> String {
    let mut lin = String::from("st||pn|~Msouth,~Mwest,~Mnorth,~Meast|");

    let hands: Vec<String> = LIN_ORDER
        .iter()
        .map(|pos| export_hand(deal.hand(*pos)))
        .collect();
    lin.push_str(&format!("md|{}{}|", dealer_digit(deal.dealer()), hands.join(",")));

    let sv = match deal.vulnerability() {
        Vulnerability::None => "o",
        Vulnerability::NS => "n",
        Vulnerability::EW => "e",
        Vulnerability::Both => "b",
    };
    lin.push_str(&format!("sv|{}|rh||ah|deal|", sv));

    for call in deal.auction().history() {
        lin.push_str(&format!("mb|{}|an||", call.call.render()));
    }

    let tricks = deal.tricks().iter().chain(deal.current_trick());
    for trick in tricks {
        for card in trick.cards() {
            lin.push_str(&format!("pc|{}|", card.to_link()));
        }
    }
    lin
}

/// Full BBO handviewer link for the deal.
pub fn handviewer_link(deal: &Deal) -> String {
    format!("{}{}", HANDVIEWER_URL, export_deal(deal))
}

fn dealer_digit(dealer: Position) -> u8 {
    LIN_ORDER.iter().position(|p| *p == dealer).unwrap_or(0) as u8 + 1
}

fn export_hand(hand: &Hand) -> String {
    let mut s = String::new();
    for suit in Suit::DESCENDING {
        s.push(suit.to_char());
        for card in hand.suit_cards(suit) {
            s.push(card.rank().to_char());
        }
    }
    s
}

/// Rebuild a deal from a LIN string (or a handviewer link) by replaying its
/// calls and plays through the rules. An illegal call or play is an error.
pub fn import_deal(lin: &str) -> Result<Deal, Error> {
    let lin = lin.split_once("lin=").map_or(lin, |(_, rest)| rest);
    let parts: Vec<&str> = lin.trim().split('|').collect();

    let mut md = None;
    let mut vulnerability = Vulnerability::None;
    let mut actions = Vec::new();
    for pair in parts.chunks(2) {
        let (key, value) = match pair {
            [key, value] => (*key, *value),
            [key] if key.is_empty() => continue,
            _ => return Err(ParseError::Lin(lin.to_string()).into()),
        };
        match key {
            "md" => md = Some(import_md(value)?),
            "sv" => vulnerability = import_vulnerability(value)?,
            "mb" | "pc" => actions.push((key, value)),
            _ => {}
        }
    }

    let (dealer, hands) = md.ok_or_else(|| ParseError::Lin("missing md".to_string()))?;
    let mut deal = Deal::new(dealer, vulnerability, hands)?;
    for (key, value) in actions {
        if key == "mb" {
            deal.call(import_call(value)?)?;
        } else {
            let card = import_card(value)?;
            deal.play(card)?;
        }
    }
    debug!(
        "imported deal: {} calls, {} tricks",
        deal.auction().len(),
        deal.tricks_played()
    );
    Ok(deal)
}

fn import_md(value: &str) -> Result<(Position, [Hand; SEATS]), ParseError> {
    let err = || ParseError::Lin(value.to_string());
    let mut chars = value.chars();
    let dealer = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .and_then(|d| LIN_ORDER.get((d as usize).checked_sub(1)?))
        .copied()
        .ok_or_else(err)?;

    let mut cards: Vec<Vec<Card>> = chars
        .as_str()
        .split(',')
        .filter(|h| !h.is_empty())
        .map(import_hand_cards)
        .collect::<Result<_, _>>()?;
    match cards.len() {
        SEATS => {}
        3 => {
            let rest: Vec<Card> = Card::all()
                .filter(|c| !cards.iter().flatten().any(|d| d == c))
                .collect();
            cards.push(rest);
        }
        _ => return Err(err()),
    }

    let mut hands: [Option<Hand>; SEATS] = Default::default();
    for (pos, cards) in LIN_ORDER.iter().zip(cards) {
        if cards.len() != CARDS_IN_HAND {
            return Err(err());
        }
        hands[pos.idx()] = Some(Hand::new(cards).map_err(|_| err())?);
    }
    let [n, e, s, w] = hands;
    match (n, e, s, w) {
        (Some(n), Some(e), Some(s), Some(w)) => Ok((dealer, [n, e, s, w])),
        _ => Err(err()),
    }
}

fn import_hand_cards(s: &str) -> Result<Vec<Card>, ParseError> {
    let mut cards = Vec::new();
    let mut suit = None;
    for c in s.chars() {
        if let Some(next) = Suit::from_char(c) {
            suit = Some(next);
        } else {
            let rank = Rank::from_char(c).ok_or_else(|| ParseError::Lin(s.to_string()))?;
            let suit = suit.ok_or_else(|| ParseError::Lin(s.to_string()))?;
            cards.push(Card::new(suit, rank));
        }
    }
    Ok(cards)
}

fn import_vulnerability(s: &str) -> Result<Vulnerability, ParseError> {
    match s.to_ascii_lowercase().as_str() {
        "" | "o" | "0" => Ok(Vulnerability::None),
        "n" => Ok(Vulnerability::NS),
        "e" => Ok(Vulnerability::EW),
        "b" => Ok(Vulnerability::Both),
        _ => Err(ParseError::Lin(s.to_string())),
    }
}

fn import_call(s: &str) -> Result<Call, ParseError> {
    s.trim_end_matches('!')
        .parse()
        .map_err(|_| ParseError::Lin(s.to_string()))
}

/// Suit first, then rank: `SA`, `HT`.
fn import_card(s: &str) -> Result<Card, ParseError> {
    let mut chars = s.chars();
    match (
        chars.next().and_then(Suit::from_char),
        chars.next().and_then(Rank::from_char),
        chars.next(),
    ) {
        (Some(suit), Some(rank), None) => Ok(Card::new(suit, rank)),
        _ => Err(ParseError::Lin(s.to_string())),
    }
}
