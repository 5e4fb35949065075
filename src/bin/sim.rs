use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use submarine::{play_local, Field, Outcome, Player, RandomPlayer, SessionOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let players: [(Box<dyn Player>, SmallRng); 2] = [
        (
            Box::new(RandomPlayer::with_name("player1")),
            SmallRng::seed_from_u64(seed1),
        ),
        (
            Box::new(RandomPlayer::with_name("player2")),
            SmallRng::seed_from_u64(seed2),
        ),
    ];
    let summary = play_local(&Field::default(), players, &SessionOptions::default()).await?;

    let status = |player: usize| match summary.outcome {
        Outcome::Winner(w) if w == player => "Won",
        Outcome::Winner(_) => "Lost",
        Outcome::Draw => "Draw",
    };
    let result = json!({
        "player1": {"status": status(0)},
        "player2": {"status": status(1)},
        "winner": summary.winner_name(),
        "turns": summary.turns,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
