use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A seat at the table. Seats rotate clockwise N → E → S → W → N.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Position {
    #[default]
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub fn contains(self, pos: Position) -> bool {
        pos.partnership() == self
    }

    pub fn idx(self) -> usize {
        match self {
            Partnership::NS => 0,
            Partnership::EW => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn partnership(self) -> Partnership {
        match self {
            Position::North | Position::South => Partnership::NS,
            Position::East | Position::West => Partnership::EW,
        }
    }

    pub fn is_opponent(self, other: Position) -> bool {
        self.partnership() != other.partnership()
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// The seat `n` places clockwise from this one.
    pub fn offset(self, n: usize) -> Self {
        Position::ALL[(self.idx() + n) % 4]
    }

    /// Clockwise steps from `self` to `other`, in `0..4`.
    pub fn distance_to(self, other: Position) -> usize {
        (other.idx() + 4 - self.idx()) % 4
    }

    pub fn idx(self) -> usize {
        match self {
            Position::North => 0,
            Position::East => 1,
            Position::South => 2,
            Position::West => 3,
        }
    }

    pub fn partner(self) -> Self {
        self.offset(2)
    }

    /// Left-hand opponent (next in clockwise order).
    pub fn lho(self) -> Self {
        self.next()
    }

    /// Right-hand opponent (previous in clockwise order).
    pub fn rho(self) -> Self {
        self.offset(3)
    }

    pub fn name(self) -> &'static str {
        match self {
            Position::North => "North",
            Position::East => "East",
            Position::South => "South",
            Position::West => "West",
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    pub fn dealer_from_board_number(board_number: u32) -> Self {
        let index = (board_number + 3) % 4;
        Position::ALL[index as usize]
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Position::ALL
            .into_iter()
            .find(|p| {
                lower == p.name().to_ascii_lowercase()
                    || lower == p.to_char().to_ascii_lowercase().to_string()
            })
            .ok_or_else(|| ParseError::Position(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    pub fn is_vulnerable(self, pos: Position) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::NS => pos.partnership() == Partnership::NS,
            Vulnerability::EW => pos.partnership() == Partnership::EW,
            Vulnerability::Both => true,
        }
    }

    pub fn from_board_number(board_number: u32) -> Self {
        // http://www.jazclass.aust.com/bridge/scoring/score11.htm
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::Both,
        }
    }
}

impl FromStr for Vulnerability {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "neither" | "o" | "-" => Ok(Vulnerability::None),
            "ns" | "n" => Ok(Vulnerability::NS),
            "ew" | "e" => Ok(Vulnerability::EW),
            "both" | "all" | "b" => Ok(Vulnerability::Both),
            _ => Err(ParseError::Vulnerability(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_next() {
        assert_eq!(Position::North.next(), Position::East);
        assert_eq!(Position::West.next(), Position::North);
        assert_eq!(Position::South.lho(), Position::West);
        assert_eq!(Position::South.rho(), Position::East);
        assert_eq!(Position::East.partner(), Position::West);
    }

    #[test]
    fn test_offsets_and_distance() {
        assert_eq!(Position::South.distance_to(Position::South), 0);
        assert_eq!(Position::South.distance_to(Position::West), 1);
        assert_eq!(Position::East.distance_to(Position::West), 2);
        assert_eq!(Position::West.distance_to(Position::East), 2);
        assert_eq!(Position::West.distance_to(Position::South), 3);
        assert_eq!(Position::South.distance_to(Position::East), 3);
        assert_eq!(Position::West.offset(2), Position::East);
        assert_eq!(Position::North.offset(3), Position::West);
        assert_eq!(Position::North.offset(4), Position::North);
        for a in Position::ALL {
            for b in Position::ALL {
                assert_eq!(a.offset(a.distance_to(b)), b);
            }
        }
    }

    #[test]
    fn test_opponents() {
        assert!(Position::North.is_opponent(Position::East));
        assert!(Position::South.is_opponent(Position::West));
        assert!(!Position::West.is_opponent(Position::East));
        assert!(!Position::North.is_opponent(Position::South));
    }

    #[test]
    fn test_vulnerability() {
        assert!(Vulnerability::NS.is_vulnerable(Position::North));
        assert!(!Vulnerability::NS.is_vulnerable(Position::East));
        assert!(Vulnerability::Both.is_vulnerable(Position::West));
        assert!(!Vulnerability::None.is_vulnerable(Position::South));
        assert_eq!(Vulnerability::from_board_number(1), Vulnerability::None);
        assert_eq!(Vulnerability::from_board_number(4), Vulnerability::Both);
        assert_eq!(Vulnerability::from_board_number(16), Vulnerability::EW);
        assert_eq!("both".parse::<Vulnerability>(), Ok(Vulnerability::Both));
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!(Position::from_char('W'), Some(Position::West));
        assert_eq!(Position::from_char('X'), None);
        assert_eq!("south".parse::<Position>(), Ok(Position::South));
        assert_eq!("E".parse::<Position>(), Ok(Position::East));
        assert!("middle".parse::<Position>().is_err());
        assert_eq!(Position::dealer_from_board_number(1), Position::North);
        assert_eq!(Position::dealer_from_board_number(3), Position::South);
    }

    #[test]
    fn test_partnership() {
        assert_eq!(Position::North.partnership(), Partnership::NS);
        assert_eq!(Position::West.partnership(), Partnership::EW);
        assert!(Partnership::NS.contains(Position::South));
        assert!(!Partnership::NS.contains(Position::East));
        assert_eq!(Partnership::EW.opponent(), Partnership::NS);
    }
}
