//! Noughts binary.

use anyhow::{Context, Result};
use clap::Parser;
use noughts::{
    Cli, Command, GameConfig, JsonFileScoreStore, init_file_tracing, init_stderr_tracing,
    run_autoplay, run_tui,
};
use noughts_engine::{MemoryScoreStore, ScoreStore, ScoreTally};
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)?;
    if let Some(path) = &cli.scores_file {
        config = config.with_scores_path(path.clone());
    }

    match cli.command {
        Command::Play {
            mode,
            computer_plays,
            delay_ms,
            seed,
        } => {
            if let Some(mode) = mode {
                config = config.with_mode(mode);
            }
            if let Some(side) = computer_plays {
                config = config.with_computer_plays(side);
            }
            if let Some(delay) = delay_ms {
                config = config.with_computer_delay_ms(delay);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }

            init_file_tracing(config.log_file())
                .with_context(|| format!("Failed to open log file {}", config.log_file().display()))?;
            let store = open_store(&config, cli.no_persist);
            run_tui(&config, store).await?;
        }
        Command::Scores { json } => {
            init_stderr_tracing();
            let tally = open_store(&config, cli.no_persist).load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tally)?);
            } else {
                print_tally(&tally);
            }
        }
        Command::ResetScores => {
            init_stderr_tracing();
            open_store(&config, cli.no_persist).save(&ScoreTally::new())?;
            println!("Scores reset.");
        }
        Command::Autoplay {
            games,
            seed,
            record,
            json,
        } => {
            init_stderr_tracing();
            let seed = seed.or(*config.seed());
            let store = if record {
                open_store(&config, cli.no_persist)
            } else {
                Box::new(MemoryScoreStore::default())
            };
            let report = run_autoplay(games, seed, store);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            println!("Played {} games", report.games());
            print_tally(report.session());
            if record {
                println!("Overall:");
                print_tally(report.overall());
            }
        }
    }

    Ok(())
}

/// Picks the score store for this run.
#[instrument(skip(config))]
fn open_store(config: &GameConfig, no_persist: bool) -> Box<dyn ScoreStore> {
    if no_persist {
        info!("Scores kept in memory only");
        Box::new(MemoryScoreStore::default())
    } else {
        Box::new(JsonFileScoreStore::new(config.scores_path()))
    }
}

fn print_tally(tally: &ScoreTally) {
    println!("  X wins: {}", tally.x);
    println!("  O wins: {}", tally.o);
    println!("  Draws:  {}", tally.draws);
}
