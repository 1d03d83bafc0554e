use crate::board::{Partnership, Position};
use crate::call::{AuctionCall, Call};
use crate::contract::{Contract, DoubleStatus, Outcome};
use crate::error::{Error, IllegalCall};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The bidding for one deal.
///
/// Calls are kept most recent first. Once three passes follow a bid (or the
/// first four calls are all passes) the auction is settled and accepts no
/// further calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    dealer: Position,
    calls: VecDeque<AuctionCall>,
    outcome: Option<Outcome>,
}

impl Auction {
    pub fn new(dealer: Position) -> Self {
        Self {
            dealer,
            calls: VecDeque::new(),
            outcome: None,
        }
    }

    /// Build an auction from space-separated calls like "P 1C P 2C".
    pub fn bidding(dealer: Position, calls: &str) -> Result<Self, Error> {
        let mut auction = Self::new(dealer);
        auction.bids(calls)?;
        Ok(auction)
    }

    /// Parse and add space-separated calls. Stops at the first bad token;
    /// calls before it stay in the auction.
    pub fn bids(&mut self, calls: &str) -> Result<(), Error> {
        for token in calls.split_whitespace() {
            self.add_call(token.parse()?)?;
        }
        Ok(())
    }

    pub fn dealer(&self) -> Position {
        self.dealer
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Calls from most recent to first.
    pub fn recent(&self) -> impl Iterator<Item = &AuctionCall> {
        self.calls.iter()
    }

    /// Calls in the order they were made.
    pub fn history(&self) -> impl Iterator<Item = &AuctionCall> {
        self.calls.iter().rev()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Call)> + '_ {
        self.history().map(|c| (c.caller, c.call))
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_settled(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn final_contract(&self) -> Option<&Contract> {
        self.outcome.as_ref().and_then(Outcome::contract)
    }

    pub fn declarer(&self) -> Option<Position> {
        self.final_contract().map(|c| c.declarer)
    }

    /// The seat due to call, or `None` once the auction is settled.
    pub fn next_to_call(&self) -> Option<Position> {
        if self.is_settled() {
            return None;
        }
        Some(self.following_seat())
    }

    fn following_seat(&self) -> Position {
        self.calls
            .front()
            .map_or(self.dealer, |last| last.caller.next())
    }

    /// The most recent level/strain bid: the call currently open to being
    /// doubled, redoubled or overcalled.
    pub fn potential_contract(&self) -> Option<&AuctionCall> {
        self.potential_contract_at().map(|(_, c)| c)
    }

    fn potential_contract_at(&self) -> Option<(usize, &AuctionCall)> {
        self.calls.iter().enumerate().find(|(_, c)| c.call.is_bid())
    }

    /// Double status of the potential contract.
    pub fn double_status(&self) -> DoubleStatus {
        for c in &self.calls {
            match c.call {
                Call::Redouble => return DoubleStatus::Redoubled,
                Call::Double => return DoubleStatus::Doubled,
                Call::Bid { .. } => break,
                Call::Pass => {}
            }
        }
        DoubleStatus::Undoubled
    }

    pub fn partnership_has_bid(&self, partnership: Partnership) -> bool {
        self.calls
            .iter()
            .any(|c| c.caller.partnership() == partnership && c.call.is_bid())
    }

    /// Whether `call` would be accepted from the seat due to call.
    pub fn check(&self, call: Call) -> Result<(), IllegalCall> {
        if self.is_settled() {
            return Err(IllegalCall::Settled);
        }
        let me = self.following_seat();
        match call {
            Call::Pass => Ok(()),
            Call::Bid { level, .. } if !call.is_valid() => Err(IllegalCall::InvalidLevel(level)),
            Call::Bid { .. } => match self.potential_contract() {
                Some(pc) if call <= pc.call => Err(IllegalCall::Insufficient {
                    call,
                    over: pc.call,
                }),
                _ => Ok(()),
            },
            Call::Double => {
                let (idx, pc) = self
                    .potential_contract_at()
                    .ok_or(IllegalCall::NothingToDouble)?;
                if !pc.caller.is_opponent(me) {
                    return Err(IllegalCall::OwnContract);
                }
                let since = self.calls.iter().take(idx).map(|c| c.call);
                let mut doubled = false;
                for c in since {
                    match c {
                        Call::Redouble => return Err(IllegalCall::AlreadyRedoubled),
                        Call::Double => doubled = true,
                        _ => {}
                    }
                }
                if doubled {
                    Err(IllegalCall::AlreadyDoubled)
                } else {
                    Ok(())
                }
            }
            Call::Redouble => {
                let (idx, pc) = self
                    .potential_contract_at()
                    .ok_or(IllegalCall::NothingToRedouble)?;
                if pc.caller.is_opponent(me) {
                    return Err(IllegalCall::OpponentsContract);
                }
                let since = || self.calls.iter().take(idx).map(|c| c.call);
                if since().any(|c| c == Call::Redouble) {
                    return Err(IllegalCall::AlreadyRedoubled);
                }
                if since().any(|c| c == Call::Double) {
                    Ok(())
                } else {
                    Err(IllegalCall::NotDoubled)
                }
            }
        }
    }

    pub fn is_legal(&self, call: Call) -> bool {
        self.check(call).is_ok()
    }

    /// Add `call` for the seat due to call. On rejection the auction is
    /// unchanged.
    pub fn add_call(&mut self, call: Call) -> Result<(), IllegalCall> {
        self.check(call)?;
        let caller = self.following_seat();
        self.calls.push_front(AuctionCall::new(call, caller));
        debug!("{} calls {}", caller.name(), call);

        if call.is_pass() && self.has_three_passes() {
            let outcome = match self.potential_contract().copied() {
                Some(AuctionCall {
                    call: Call::Bid { level, strain },
                    caller,
                }) => Outcome::Contract(Contract {
                    level,
                    strain,
                    double_status: self.double_status(),
                    declarer: caller,
                }),
                _ => Outcome::PassedOut,
            };
            debug!("auction settled: {}", outcome);
            self.outcome = Some(outcome);
        }
        Ok(())
    }

    fn has_three_passes(&self) -> bool {
        self.calls.len() > 3 && self.calls.iter().take(3).all(|c| c.call.is_pass())
    }

    /// All calls that would be legal next, lowest first.
    pub fn legal_calls(&self) -> Vec<Call> {
        if self.is_settled() {
            return Vec::new();
        }
        [Call::Pass, Call::Double, Call::Redouble]
            .into_iter()
            .chain(Call::all_bids())
            .filter(|c| self.is_legal(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strain::Strain;

    fn call(s: &str) -> Call {
        s.parse().unwrap()
    }

    fn auction(dealer: Position, calls: &str) -> Auction {
        Auction::bidding(dealer, calls).unwrap()
    }

    #[test]
    fn test_next_to_call() {
        let mut a = Auction::new(Position::South);
        assert_eq!(a.next_to_call(), Some(Position::South));
        a.add_call(Call::Pass).unwrap();
        assert_eq!(a.next_to_call(), Some(Position::West));
        a.bids("P P").unwrap();
        assert_eq!(a.next_to_call(), Some(Position::East));
        a.add_call(Call::Pass).unwrap();
        assert_eq!(a.next_to_call(), None);
    }

    #[test]
    fn test_three_passes_then_one_spade() {
        let a = auction(Position::South, "P P P 1S P P P");
        let contract = a.final_contract().unwrap();
        assert_eq!(contract.call(), call("1S"));
        assert_eq!(contract.declarer, Position::East);
        assert_eq!(contract.double_status, DoubleStatus::Undoubled);
    }

    #[test]
    fn test_not_settled_before_three_passes() {
        let mut a = auction(Position::South, "P P P 1S P P");
        assert!(!a.is_settled());
        assert_eq!(a.declarer(), None);
        a.add_call(Call::Pass).unwrap();
        assert!(a.is_settled());
    }

    #[test]
    fn test_pass_out_from_every_dealer() {
        for dealer in Position::ALL {
            let mut a = Auction::new(dealer);
            for _ in 0..3 {
                a.add_call(Call::Pass).unwrap();
                assert!(!a.is_settled());
            }
            a.add_call(Call::Pass).unwrap();
            assert_eq!(a.outcome(), Some(&Outcome::PassedOut));
            assert_eq!(a.declarer(), None);
            assert_eq!(a.check(Call::Pass), Err(IllegalCall::Settled));
        }
    }

    #[test]
    fn test_insufficient_bid() {
        let mut a = auction(Position::East, "P P 1S");
        assert_eq!(
            a.check(call("1H")),
            Err(IllegalCall::Insufficient {
                call: call("1H"),
                over: call("1S")
            })
        );
        assert!(!a.is_legal(call("1S")));
        assert_eq!(
            a.add_call(call("1H")),
            Err(IllegalCall::Insufficient {
                call: call("1H"),
                over: call("1S")
            })
        );
        assert_eq!(a.len(), 3);
        a.bids("D R 1NT").unwrap();
        assert_eq!(a.potential_contract().unwrap().call, call("1NT"));
        assert_eq!(a.double_status(), DoubleStatus::Undoubled);
    }

    #[test]
    fn test_bid_level_out_of_range() {
        let mut a = Auction::new(Position::North);
        for level in [0, 8, 9] {
            let bad = Call::Bid {
                level,
                strain: Strain::Clubs,
            };
            assert_eq!(a.add_call(bad), Err(IllegalCall::InvalidLevel(level)));
            assert!(!a.legal_calls().contains(&bad));
        }
        assert!(a.is_empty());
        a.add_call(call("7NT")).unwrap();
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_double_needs_a_contract() {
        let a = Auction::new(Position::South);
        assert_eq!(a.check(Call::Double), Err(IllegalCall::NothingToDouble));
        assert_eq!(a.check(Call::Redouble), Err(IllegalCall::NothingToRedouble));
        let a = auction(Position::South, "P P");
        assert_eq!(a.check(Call::Double), Err(IllegalCall::NothingToDouble));
    }

    #[test]
    fn test_double_and_redouble_settle() {
        let a = auction(Position::South, "1H D R P P P");
        let contract = a.final_contract().unwrap();
        assert_eq!(contract.call(), call("1H"));
        assert_eq!(contract.declarer, Position::South);
        assert_eq!(contract.double_status, DoubleStatus::Redoubled);
    }

    #[test]
    fn test_double_restrictions() {
        // E: P, S: 1H, W: D
        let mut a = auction(Position::East, "P 1H D");
        assert_eq!(a.check(Call::Double), Err(IllegalCall::OwnContract));
        a.add_call(Call::Pass).unwrap(); // N
        assert_eq!(a.check(Call::Double), Err(IllegalCall::AlreadyDoubled));
        a.add_call(Call::Pass).unwrap(); // E
        assert!(a.is_legal(Call::Redouble)); // S, after P P D
        a.add_call(Call::Redouble).unwrap();
        assert_eq!(a.check(Call::Double), Err(IllegalCall::AlreadyRedoubled));
        a.bids("P P P").unwrap();
        let contract = a.final_contract().unwrap();
        assert_eq!(contract.call(), call("1H"));
        assert_eq!(contract.declarer, Position::South);
        assert_eq!(a.check(call("2S")), Err(IllegalCall::Settled));
    }

    #[test]
    fn test_balancing_double() {
        // E: P, S: 1H, W: P, N: P, E: D
        let a = auction(Position::East, "P 1H P P D P P P");
        let contract = a.final_contract().unwrap();
        assert_eq!(contract.declarer, Position::South);
        assert_eq!(contract.double_status, DoubleStatus::Doubled);
    }

    #[test]
    fn test_redouble_restrictions() {
        let mut a = auction(Position::East, "P 1H P");
        assert_eq!(a.check(Call::Redouble), Err(IllegalCall::NotDoubled)); // N
        a.bids("P D P").unwrap(); // N, E, S
        assert_eq!(a.check(Call::Redouble), Err(IllegalCall::OpponentsContract)); // W
        a.add_call(Call::Pass).unwrap(); // W
        a.add_call(Call::Redouble).unwrap(); // N, after P P D
        a.bids("P P P").unwrap();
        assert_eq!(a.add_call(call("3S")), Err(IllegalCall::Settled));
        let contract = a.final_contract().unwrap();
        assert_eq!(contract.call(), call("1H"));
        assert_eq!(contract.declarer, Position::South);
        assert_eq!(contract.double_status, DoubleStatus::Redoubled);
    }

    #[test]
    fn test_no_double_after_redouble_behind_passes() {
        // N: 1H, E: D, S: R, W: P, N: P; East may not double again.
        let a = auction(Position::North, "1H D R P P");
        assert_eq!(a.check(Call::Double), Err(IllegalCall::AlreadyRedoubled));
        assert_eq!(a.check(Call::Redouble), Err(IllegalCall::OpponentsContract));
    }

    #[test]
    fn test_no_second_redouble() {
        let mut a = auction(Position::North, "1H D R");
        assert_eq!(a.check(Call::Double), Err(IllegalCall::AlreadyRedoubled));
        a.add_call(Call::Pass).unwrap(); // W
        assert_eq!(a.check(Call::Redouble), Err(IllegalCall::AlreadyRedoubled)); // N
        assert_eq!(a.double_status(), DoubleStatus::Redoubled);
    }

    #[test]
    fn test_new_bid_clears_doubles() {
        let a = auction(Position::North, "1H D R 2C");
        assert_eq!(a.double_status(), DoubleStatus::Undoubled);
        // West's 2C is open to North.
        assert!(a.is_legal(Call::Double));
        assert_eq!(a.check(Call::Redouble), Err(IllegalCall::OpponentsContract));
    }

    #[test]
    fn test_rejected_call_leaves_history() {
        let mut a = auction(Position::North, "1S");
        let before = a.clone();
        assert!(a.add_call(call("1C")).is_err());
        assert!(a.add_call(Call::Redouble).is_err());
        assert_eq!(a, before);
    }

    #[test]
    fn test_bids_stops_at_first_error() {
        let mut a = Auction::new(Position::North);
        let err = a.bids("1C P zz 1D").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(a.len(), 2);
        let err = a.bids("1C").unwrap_err();
        assert!(matches!(err, Error::Call(IllegalCall::Insufficient { .. })));
    }

    #[test]
    fn test_history_order() {
        let a = auction(Position::West, "1C 1D 1H 1S");
        let calls: Vec<_> = a.iter().collect();
        assert_eq!(calls[0], (Position::West, call("1C")));
        assert_eq!(calls[3], (Position::South, call("1S")));
        assert_eq!(a.recent().next().unwrap().call, call("1S"));
        assert!(a.partnership_has_bid(Partnership::NS));
    }

    #[test]
    fn test_legal_calls_empty_auction() {
        let a = Auction::new(Position::North);
        let calls = a.legal_calls();
        // Pass + 35 bids
        assert_eq!(calls.len(), 36);
        assert_eq!(calls[0], Call::Pass);
        assert_eq!(calls[1], call("1C"));
    }

    #[test]
    fn test_legal_calls_after_bid() {
        let a = auction(Position::North, "1H");
        let calls = a.legal_calls();
        assert!(calls.contains(&Call::Pass));
        assert!(calls.contains(&Call::Double));
        assert!(!calls.contains(&Call::Redouble));
        assert!(!calls.contains(&call("1C")));
        assert!(calls.contains(&call("1S")));
        assert!(auction(Position::North, "P P P P").legal_calls().is_empty());
    }
}
