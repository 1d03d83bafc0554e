use bridge_rules::{
    Auction, Call, Card, Deal, IllegalCall, Outcome, Partnership, Position, Strain, Suit, Trick,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn position() -> impl Strategy<Value = Position> {
    prop::sample::select(Position::ALL.to_vec())
}

fn strain() -> impl Strategy<Value = Strain> {
    prop::sample::select(Strain::ALL.to_vec())
}

fn call() -> impl Strategy<Value = Call> {
    (0..=Call::MAX_CODE).prop_map(|code| Call::from_code(code).unwrap())
}

/// Four distinct cards.
fn four_cards() -> impl Strategy<Value = Vec<Card>> {
    Just(Card::all().collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|deck| deck[..4].to_vec())
}

/// Winner by brute force: highest trump if any was played, else highest
/// card of the led suit.
fn oracle_winner(leader: Position, cards: &[Card], strain: Strain) -> Position {
    let led = cards[0].suit();
    let key = |c: &Card| {
        let tier = match strain.trump() {
            Some(t) if c.suit() == t => 2,
            _ if c.suit() == led => 1,
            _ => 0,
        };
        (tier, c.rank())
    };
    let (slot, _) = cards
        .iter()
        .enumerate()
        .max_by_key(|(_, c)| key(c))
        .unwrap();
    leader.offset(slot)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_card_render_parse(id in 0u8..52, use10 in any::<bool>()) {
        let card = Card::from_id(id).unwrap();
        let text = card.render(use10);
        prop_assert_eq!(text.parse::<Card>().unwrap(), card);
        prop_assert_eq!(card.suit().idx() * 13 + card.rank().idx(), id as usize);
    }

    #[test]
    fn prop_call_order_matches_code(a in call(), b in call()) {
        prop_assert_eq!(a.cmp(&b), a.code().cmp(&b.code()));
        prop_assert_eq!(a.code().and_then(Call::from_code), Some(a));
        prop_assert_eq!(a.render().parse::<Call>().unwrap(), a);
    }

    #[test]
    fn prop_trick_winner_matches_oracle(
        cards in four_cards(),
        strain in strain(),
        leader in position(),
    ) {
        let mut trick = Trick::new(strain, leader);
        for c in &cards {
            prop_assert!(trick.winner().is_none());
            trick.play(*c).unwrap();
        }
        prop_assert_eq!(trick.winner(), Some(oracle_winner(leader, &cards, strain)));
    }

    #[test]
    fn prop_trump_beats_plain_card_in_either_order(
        cards in four_cards(),
        trump in prop::sample::select(Suit::ALL.to_vec()),
    ) {
        let plain = cards.iter().find(|c| c.suit() != trump).copied();
        if let Some(plain) = plain {
            let ruff = Card::all().find(|c| c.suit() == trump).unwrap();
            let mut trick = Trick::new(Strain::from_suit(trump), Position::North);
            trick.play(plain).unwrap();
            prop_assert!(trick.card_will_win(ruff));
            trick.play(ruff).unwrap();
            prop_assert_eq!(trick.winning_seat(), Some(Position::East));
            for c in Card::all().filter(|c| c.suit() != trump) {
                prop_assert!(!trick.card_will_win(c));
            }
        }
    }

    #[test]
    fn prop_random_auction_stays_legal(
        dealer in position(),
        picks in prop::collection::vec(any::<u16>(), 0..60),
    ) {
        let mut auction = Auction::new(dealer);
        for pick in picks {
            let legal = auction.legal_calls();
            if legal.is_empty() {
                prop_assert!(auction.is_settled());
                prop_assert_eq!(auction.check(Call::Pass), Err(IllegalCall::Settled));
                break;
            }
            // Every call outside the legal list is rejected without effect.
            for c in (0..=Call::MAX_CODE).filter_map(Call::from_code) {
                if !legal.contains(&c) {
                    let before = auction.clone();
                    prop_assert!(auction.add_call(c).is_err());
                    prop_assert_eq!(&auction, &before);
                }
            }
            let seat = auction.next_to_call().unwrap();
            let c = legal[pick as usize % legal.len()];
            auction.add_call(c).unwrap();
            prop_assert_eq!(auction.recent().next().unwrap().caller, seat);
        }

        match auction.outcome() {
            None => prop_assert!(auction.next_to_call().is_some()),
            Some(Outcome::PassedOut) => {
                prop_assert_eq!(auction.len(), 4);
                prop_assert!(auction.potential_contract().is_none());
            }
            Some(Outcome::Contract(contract)) => {
                let last_bid = auction.history().filter(|c| c.call.is_bid()).last().unwrap();
                prop_assert_eq!(contract.declarer, last_bid.caller);
                prop_assert_eq!(contract.call(), last_bid.call);
                prop_assert!(auction.recent().take(3).all(|c| c.call.is_pass()));
            }
        }
    }

    #[test]
    fn prop_random_play_to_completion(seed in any::<u64>(), board in 1u32..=16) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deal = Deal::random(board, &mut rng);
        let total: u32 = deal.hands().map(|(_, h)| h.hcp() as u32).sum();
        prop_assert_eq!(total, 40);

        deal.call("1NT".parse().unwrap()).unwrap();
        for _ in 0..3 {
            deal.call(Call::Pass).unwrap();
        }
        let declarer = deal.contract().unwrap().declarer;
        prop_assert_eq!(deal.to_play(), Some(declarer.lho()));

        while let Some(seat) = deal.to_play() {
            let legal = deal.legal_plays();
            prop_assert!(!legal.is_empty());
            if let Some(led) = deal.current_trick().and_then(Trick::led_suit) {
                if deal.hand(seat).remaining_length(led) > 0 {
                    prop_assert!(legal.iter().all(|c| c.suit() == led));
                }
            }
            let card = legal[rng.gen_range(0..legal.len())];
            prop_assert_eq!(deal.play(card), Ok(seat));
            for (_, hand) in deal.hands() {
                let by_suit: u8 = Suit::ALL.into_iter().map(|s| hand.remaining_length(s)).sum();
                prop_assert_eq!(hand.remaining(), hand.unplayed().count());
                prop_assert_eq!(by_suit as usize, hand.unplayed().count());
            }
        }

        prop_assert!(deal.is_complete());
        prop_assert_eq!(
            deal.tricks_won(Partnership::NS) + deal.tricks_won(Partnership::EW),
            13
        );
        for (_, hand) in deal.hands() {
            prop_assert_eq!(hand.remaining(), 0);
        }
        for pair in deal.tricks().windows(2) {
            prop_assert_eq!(pair[0].winner(), Some(pair[1].leader()));
        }
    }
}
