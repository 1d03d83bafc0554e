use bridge_rules::io::{lin, text};
use bridge_rules::{deal_hands, Deal, Partnership, Position, Vulnerability};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Deal a board, replay calls and plays through the rules, and print the result"
)]
struct Args {
    /// Board number; picks dealer and vulnerability unless overridden
    #[arg(short, long, env = "DEAL_TABLE_BOARD", default_value_t = 1)]
    board: u32,

    /// Random seed for a reproducible deal (random if omitted, always printed)
    #[arg(short, long, env = "DEAL_TABLE_SEED")]
    seed: Option<u64>,

    /// Dealer override (N, E, S, W)
    #[arg(short, long)]
    dealer: Option<Position>,

    /// Vulnerability override (none, ns, ew, both)
    #[arg(long)]
    vulnerability: Option<Vulnerability>,

    /// Start from a LIN string or handviewer link instead of dealing
    #[arg(long, conflicts_with_all = ["seed", "dealer", "vulnerability"])]
    lin: Option<String>,

    /// Space-separated calls, e.g. "1NT P 3NT P P P"
    #[arg(short, long, default_value = "")]
    calls: String,

    /// Space-separated cards in play order, e.g. "QS 2S AS 5S"
    #[arg(short, long, default_value = "")]
    plays: String,

    /// Finish play by always choosing the lowest legal card
    #[arg(long)]
    autoplay: bool,

    #[arg(short, long, value_enum, env = "DEAL_TABLE_FORMAT", default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Lin,
    Json,
}

fn build_deal(args: &Args) -> Result<Deal, Box<dyn Error>> {
    if let Some(link) = &args.lin {
        return Ok(lin::import_deal(link)?);
    }
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    eprintln!("Seed: {seed} | Board: {}", args.board);
    let mut rng = StdRng::seed_from_u64(seed);
    let dealer = args
        .dealer
        .unwrap_or_else(|| Position::dealer_from_board_number(args.board));
    let vulnerability = args
        .vulnerability
        .unwrap_or_else(|| Vulnerability::from_board_number(args.board));
    Ok(Deal::new(dealer, vulnerability, deal_hands(&mut rng))?)
}

fn replay(deal: &mut Deal, calls: &str, plays: &str, autoplay: bool) -> Result<(), Box<dyn Error>> {
    for token in calls.split_whitespace() {
        deal.call(token.parse()?)?;
    }
    for token in plays.split_whitespace() {
        deal.play(token.parse()?)?;
    }
    if autoplay {
        while let Some(card) = deal.legal_plays().first().copied() {
            deal.play(card)?;
        }
    }
    Ok(())
}

fn render(deal: &Deal, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Json => serde_json::to_string_pretty(deal),
        Format::Lin => Ok(lin::handviewer_link(deal)),
        Format::Text => {
            let mut out = text::deal_summary(deal);
            out.push_str(&text::auction_table(deal.auction()));
            for trick in deal.tricks() {
                out.push_str(&text::trick_line(trick));
                out.push('\n');
            }
            if let Some(contract) = deal.contract() {
                let side = contract.partnership();
                out.push_str(&format!(
                    "Declarer {} tricks, defenders {}\n",
                    deal.tricks_won(side),
                    deal.tricks_won(side.opponent())
                ));
            }
            Ok(out)
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut deal = build_deal(args)?;
    replay(&mut deal, &args.calls, &args.plays, args.autoplay)?;
    info!(
        "{} calls, {} tricks, NS {} EW {}",
        deal.auction().len(),
        deal.tricks_played(),
        deal.tricks_won(Partnership::NS),
        deal.tricks_won(Partnership::EW)
    );
    println!("{}", render(&deal, args.format)?);
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
