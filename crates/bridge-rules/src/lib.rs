//! Legal-play rules of contract bridge: card and call encodings, the auction
//! state machine, and trick winner resolution.

pub mod auction;
pub mod board;
pub mod call;
pub mod card;
pub mod contract;
pub mod deal;
pub mod error;
pub mod hand;
pub mod io;
pub mod rank;
pub mod strain;
pub mod suit;
pub mod trick;

pub use auction::Auction;
pub use board::{Partnership, Position, Vulnerability};
pub use call::{AuctionCall, Call};
pub use card::Card;
pub use contract::{Contract, DoubleStatus, Outcome};
pub use deal::{deal_hands, Deal};
pub use error::{Error, HandError, IllegalCall, IllegalPlay, ParseError, Result};
pub use hand::Hand;
pub use rank::Rank;
pub use strain::Strain;
pub use suit::Suit;
pub use trick::Trick;

pub const CARDS_IN_SUIT: usize = 13;
pub const CARDS_IN_HAND: usize = 13;
pub const CARDS_IN_DECK: usize = 52;
pub const SEATS: usize = 4;
pub const MAX_LEVEL: u8 = 7;
