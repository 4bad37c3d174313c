use std::path::PathBuf;

use clap::Parser;
use holdem_arena::arena::settings::GameSettings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(name = "holdem-sim")]
#[command(about = "Play no-limit hold'em games between built in agents")]
struct Cli {
    /// JSON settings file. The built in defaults are used when not given.
    settings: Option<PathBuf>,

    /// How many independent games to play. More than one runs in parallel.
    #[arg(short, long, default_value_t = 1)]
    games: usize,

    /// Seed for the deck, overriding the settings file.
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => GameSettings::from_json(&std::fs::read_to_string(path)?)?,
        None => GameSettings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    if cli.games <= 1 {
        let result = settings.build_game()?.run()?;
        match result.winner {
            Some(idx) => println!("Seat {} won after {} rounds", idx, result.rounds_played),
            None => println!("No winner after {} rounds", result.rounds_played),
        }
        println!("Final stacks: {:?}", result.final_stacks);
        println!("Elimination order: {:?}", result.elimination_order);
    } else {
        let stats = settings.build_competition()?.run(cli.games)?;
        println!("Games: {} ({} unfinished)", stats.num_games, stats.unfinished_games);
        println!("Rounds played: {}", stats.rounds_played);
        for (idx, agent) in settings.agents.iter().enumerate() {
            println!(
                "Seat {idx} {agent:?}: won {} games, {} showdowns, first out {} times",
                stats.games_won[idx], stats.showdowns_won[idx], stats.first_out[idx]
            );
        }
    }
    Ok(())
}
