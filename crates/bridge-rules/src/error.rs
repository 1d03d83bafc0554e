use crate::board::Position;
use crate::call::Call;
use crate::card::Card;
use crate::suit::Suit;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed card, call, seat or hand text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid card `{0}`")]
    Card(String),

    #[error("invalid call `{0}`")]
    Call(String),

    #[error("invalid seat `{0}`")]
    Position(String),

    #[error("invalid vulnerability `{0}`")]
    Vulnerability(String),

    #[error("invalid hand `{0}`")]
    Hand(String),

    #[error("invalid LIN token `{0}`")]
    Lin(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("a hand holds exactly 13 cards, got {0}")]
    WrongSize(usize),

    #[error("card {0} appears more than once")]
    Duplicate(Card),

    #[error("card {0} is dealt to more than one hand")]
    DealtTwice(Card),
}

/// Why a proposed call was rejected. The auction is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalCall {
    #[error("the auction is already settled")]
    Settled,

    #[error("no bid at level {0}")]
    InvalidLevel(u8),

    #[error("{call} is insufficient over {over}")]
    Insufficient { call: Call, over: Call },

    #[error("there is no contract to double")]
    NothingToDouble,

    #[error("cannot double your own side's contract")]
    OwnContract,

    #[error("the contract is already doubled")]
    AlreadyDoubled,

    #[error("the contract has been redoubled")]
    AlreadyRedoubled,

    #[error("there is no contract to redouble")]
    NothingToRedouble,

    #[error("cannot redouble the opponents' contract")]
    OpponentsContract,

    #[error("the contract is not doubled")]
    NotDoubled,
}

/// Why a card could not be played. Trick and hands are unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalPlay {
    #[error("the trick is complete")]
    TrickClosed,

    #[error("the trick has already been led")]
    AlreadyLed,

    #[error("{0} is already in this trick")]
    DuplicateCard(Card),

    #[error("{0} is not held")]
    NotHeld(Card),

    #[error("{0} has already been played")]
    AlreadyPlayed(Card),

    #[error("must follow suit in {0}")]
    MustFollowSuit(Suit),

    #[error("it is {expected}'s turn, not {actual}'s")]
    OutOfTurn { expected: Position, actual: Position },

    #[error("play has not started or is over")]
    NotInPlay,

    #[error("the trick is not complete")]
    Incomplete,

    #[error("a trick is already in progress")]
    InProgress,

    #[error("the trick does not follow the one in play")]
    OutOfSequence,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Hand(#[from] HandError),

    #[error("illegal call: {0}")]
    Call(#[from] IllegalCall),

    #[error("illegal play: {0}")]
    Play(#[from] IllegalPlay),
}
