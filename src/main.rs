use backgammon_rules::simulation::{SimulationConfig, simulate_games};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plays random backgammon games through the rules engine and reports the results.
#[derive(Debug, Parser)]
#[command(name = "backgammon-sim", version, about)]
struct Args {
    /// Number of games to play.
    #[arg(short, long, default_value_t = 1000)]
    games: usize,

    /// Base seed; game i uses seed + i.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Turn limit per game.
    #[arg(long, default_value_t = 2000)]
    max_turns: u32,
}

impl From<Args> for SimulationConfig {
    fn from(args: Args) -> Self {
        SimulationConfig {
            games: args.games,
            seed: args.seed,
            max_turns: args.max_turns,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SimulationConfig::from(Args::parse());
    info!(?config, "starting simulation");
    let start = std::time::Instant::now();
    let stats = simulate_games(config)?;

    println!("{}", stats);
    println!("Finished in {:?}", start.elapsed());
    Ok(())
}
