use crate::board::Position;
use crate::error::ParseError;
use crate::strain::Strain;
use crate::suit::Suit;
use crate::MAX_LEVEL;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static BID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([1-7])(C|D|H|S|NT|N)$").expect("bid regex"));

const BID_OFFSET: u8 = 3;
const STRAINS: u8 = 5;

/// Any auction utterance.
///
/// Variant order gives the total order: pass < double < redouble < 1C < 1D
/// < 1H < 1S < 1NT < 2C < ... < 7NT. Deserializing rejects levels outside
/// `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "CallRepr")]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

#[derive(Deserialize)]
enum CallRepr {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl TryFrom<CallRepr> for Call {
    type Error = ParseError;

    fn try_from(repr: CallRepr) -> Result<Self, Self::Error> {
        match repr {
            CallRepr::Pass => Ok(Call::Pass),
            CallRepr::Double => Ok(Call::Double),
            CallRepr::Redouble => Ok(Call::Redouble),
            CallRepr::Bid { level, strain } => Call::bid(level, strain)
                .ok_or_else(|| ParseError::Call(format!("{}{}", level, strain.token()))),
        }
    }
}

impl Call {
    /// Highest valid code (7NT).
    pub const MAX_CODE: u8 = (MAX_LEVEL - 1) * STRAINS + BID_OFFSET + 4;

    /// `None` for levels outside `1..=7`.
    pub fn bid(level: u8, strain: Strain) -> Option<Self> {
        (1..=MAX_LEVEL)
            .contains(&level)
            .then_some(Call::Bid { level, strain })
    }

    /// False only for a bid whose level is outside `1..=7`.
    pub fn is_valid(&self) -> bool {
        match self {
            Call::Bid { level, .. } => (1..=MAX_LEVEL).contains(level),
            _ => true,
        }
    }

    /// True only for level/strain bids.
    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    /// Returns the level of this call, if it's a bid.
    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Returns the strain of this call, if it's a bid.
    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    /// Returns the suit of this call, if it's a suited bid.
    pub fn suit(&self) -> Option<Suit> {
        self.strain().and_then(|s| s.trump())
    }

    /// Compact code: 0, 1, 2 for pass, double, redouble and
    /// `(level - 1) * 5 + 3 + strain` for bids. `None` for an invalid level.
    pub fn code(self) -> Option<u8> {
        match self {
            Call::Pass => Some(0),
            Call::Double => Some(1),
            Call::Redouble => Some(2),
            Call::Bid { level, strain } if self.is_valid() => {
                Some((level - 1) * STRAINS + BID_OFFSET + strain.idx() as u8)
            }
            Call::Bid { .. } => None,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Call::Pass),
            1 => Some(Call::Double),
            2 => Some(Call::Redouble),
            c if c <= Self::MAX_CODE => {
                let c = c - BID_OFFSET;
                let strain = Strain::from_idx((c % STRAINS) as usize)?;
                Some(Call::Bid {
                    level: c / STRAINS + 1,
                    strain,
                })
            }
            _ => None,
        }
    }

    /// Every level/strain bid, lowest first.
    pub fn all_bids() -> impl Iterator<Item = Call> {
        (1..=MAX_LEVEL)
            .flat_map(|level| Strain::ALL.into_iter().map(move |strain| Call::Bid { level, strain }))
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "D".to_string(),
            Call::Redouble => "R".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.token()),
        }
    }
}

impl FromStr for Call {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "D" | "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "R" | "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }
        let caps = BID_RE
            .captures(&upper)
            .ok_or_else(|| ParseError::Call(s.to_string()))?;
        let level = caps[1]
            .parse::<u8>()
            .map_err(|_| ParseError::Call(s.to_string()))?;
        let strain = Strain::from_token(&caps[2]).ok_or_else(|| ParseError::Call(s.to_string()))?;
        Ok(Call::Bid { level, strain })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// A call together with the seat that made it.
///
/// Orders by call first and falls back to the caller, so the comparison is
/// total even for two identical calls from different seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuctionCall {
    pub call: Call,
    pub caller: Position,
}

impl AuctionCall {
    pub fn new(call: Call, caller: Position) -> Self {
        Self { call, caller }
    }
}

impl fmt::Display for AuctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.call, self.caller)
    }
}
