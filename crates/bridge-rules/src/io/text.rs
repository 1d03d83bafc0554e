use crate::auction::Auction;
use crate::board::Position;
use crate::deal::Deal;
use crate::hand::Hand;
use crate::suit::Suit;
use crate::trick::Trick;

/// Seat order for diagrams and auction columns.
const TABLE_ORDER: [Position; 4] = [
    Position::South,
    Position::West,
    Position::North,
    Position::East,
];

/// Four lines, spades first: `S A,K,10`.
pub fn hand_diagram(hand: &Hand) -> String {
    let mut out = String::new();
    for suit in Suit::DESCENDING {
        let cards: Vec<String> = hand
            .suit_cards(suit)
            .map(|c| c.rank().render(true))
            .collect();
        out.push(suit.to_char());
        out.push(' ');
        out.push_str(&cards.join(","));
        out.push('\n');
    }
    out
}

/// Every hand with its high card points, South first.
pub fn deal_summary(deal: &Deal) -> String {
    let mut out = String::new();
    for pos in TABLE_ORDER {
        let hand = deal.hand(pos);
        out.push_str(&format!("{} {}\n", pos.name(), hand.hcp()));
        out.push_str(&hand_diagram(hand));
        out.push('\n');
    }
    out
}

/// Calls laid out under `S W N E` columns, starting in the dealer's column.
pub fn auction_table(auction: &Auction) -> String {
    let mut out = String::from("S   W   N   E\n");
    let start = TABLE_ORDER
        .iter()
        .position(|p| *p == auction.dealer())
        .unwrap_or(0);
    let mut cells: Vec<String> = vec![String::new(); start];
    cells.extend(auction.history().map(|c| c.call.render()));
    for row in cells.chunks(4) {
        let line: Vec<String> = row.iter().map(|c| format!("{:<3}", c)).collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    if let Some(outcome) = auction.outcome() {
        out.push_str(&outcome.to_string());
        out.push('\n');
    }
    out
}

/// `W: 2C N: 3S E: 4H S: 5D`, plus the winner once the trick is closed.
pub fn trick_line(trick: &Trick) -> String {
    let plays: Vec<String> = trick
        .plays()
        .map(|(seat, card)| format!("{}: {}", seat, card))
        .collect();
    let mut line = plays.join(" ");
    if let Some(winner) = trick.winner() {
        line.push_str(&format!(" won by {}", winner));
    }
    line
}
