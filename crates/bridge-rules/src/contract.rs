use crate::board::{Partnership, Position};
use crate::call::Call;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Position,
}

impl Contract {
    pub fn call(&self) -> Call {
        Call::Bid {
            level: self.level,
            strain: self.strain,
        }
    }

    pub fn partnership(&self) -> Partnership {
        self.declarer.partnership()
    }

    pub fn belongs_to(&self, partnership: Partnership) -> bool {
        self.partnership() == partnership
    }

    /// The seat on lead to the first trick.
    pub fn opening_leader(&self) -> Position {
        self.declarer.lho()
    }

    pub fn dummy(&self) -> Position {
        self.declarer.partner()
    }

    /// Tricks declarer needs: six plus the level.
    pub fn tricks_needed(&self) -> usize {
        6 + self.level as usize
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level, self.strain.token())?;
        match self.double_status {
            DoubleStatus::Undoubled => {}
            DoubleStatus::Doubled => write!(f, "X")?,
            DoubleStatus::Redoubled => write!(f, "XX")?,
        }
        write!(f, " by {}", self.declarer.name())
    }
}

/// How a settled auction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Four passes; nobody declares.
    PassedOut,
    Contract(Contract),
}

impl Outcome {
    pub fn contract(&self) -> Option<&Contract> {
        match self {
            Outcome::PassedOut => None,
            Outcome::Contract(c) => Some(c),
        }
    }

    pub fn declarer(&self) -> Option<Position> {
        self.contract().map(|c| c.declarer)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PassedOut => write!(f, "Passed out"),
            Outcome::Contract(c) => write!(f, "{}", c),
        }
    }
}
