use std::collections::BTreeMap;

use submarine::{
    init_logging, play_local, server_main, CliPlayer, Field, GameStatus, Player, PlayerNode,
    RandomPlayer, ServerConfig, SessionOptions, TcpTransport,
};

use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
enum PlayerType {
    Random,
    Human,
}

#[derive(Parser)]
enum Commands {
    /// Host matches between pairs of connecting players.
    Server(ServerConfig),
    /// Join a server as a player.
    Client {
        /// Hostname of the server, e.g. localhost
        host: String,
        /// Port of the server, e.g. 2000
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerType::Random)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Name announced to the server.
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        verbose: bool,
    },
    /// Play random players against each other on the local machine.
    Local {
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Do not print the boards after every turn.
        #[arg(long)]
        quiet: bool,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Server(config) => {
            init_logging(config.verbose);
            server_main(&config).await?;
        }
        Commands::Client {
            host,
            port,
            player,
            seed,
            name,
            verbose,
        } => {
            init_logging(verbose);
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let transport = TcpTransport::connect((host.as_str(), port)).await?;
            let player: Box<dyn Player> = match (player, name) {
                (PlayerType::Random, Some(name)) => Box::new(RandomPlayer::with_name(name)),
                (PlayerType::Random, None) => Box::new(RandomPlayer::new()),
                (PlayerType::Human, Some(name)) => Box::new(CliPlayer::with_input(
                    name,
                    std::io::BufReader::new(std::io::stdin()),
                )),
                (PlayerType::Human, None) => Box::new(CliPlayer::new()),
            };
            let mut rng = make_rng(seed);
            let mut node = PlayerNode::new(player, Box::new(transport));
            match node.run(&mut rng).await {
                Ok(GameStatus::Won) => println!("you win"),
                Ok(GameStatus::Lost) => println!("you lose"),
                Ok(_) => println!("even"),
                Err(e) => eprintln!("Game ended with an error: {}", e),
            }
        }
        Commands::Local { games, seed, quiet } => {
            init_logging(false);
            let field = Field::default();
            let options = SessionOptions {
                quiet,
                ..SessionOptions::default()
            };
            let mut rng = make_rng(seed);
            let mut wins: BTreeMap<String, usize> = BTreeMap::new();
            for game in 0..games {
                let players: [(Box<dyn Player>, SmallRng); 2] = [
                    (
                        Box::new(RandomPlayer::with_name("random-1")),
                        SmallRng::from_rng(&mut rng),
                    ),
                    (
                        Box::new(RandomPlayer::with_name("random-2")),
                        SmallRng::from_rng(&mut rng),
                    ),
                ];
                let summary = play_local(&field, players, &options).await?;
                println!(
                    "game {}: {} after {} turns",
                    game + 1,
                    summary.winner_name().unwrap_or("draw"),
                    summary.turns
                );
                if let Some(name) = summary.winner_name() {
                    *wins.entry(name.to_string()).or_default() += 1;
                }
            }
            if games > 1 {
                for (name, count) in &wins {
                    println!("{} win {} time(s)", name, count);
                }
            }
        }
    }
    Ok(())
}
