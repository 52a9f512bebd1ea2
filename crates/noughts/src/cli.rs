//! Command-line interface for noughts.

use crate::config::{ModeSetting, Side};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Noughts - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with a computer opponent and persistent scores", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Score file (overrides the config file)
    #[arg(long, global = true)]
    pub scores_file: Option<PathBuf>,

    /// Keep scores in memory only
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Opponent mode
        #[arg(long, value_enum)]
        mode: Option<ModeSetting>,

        /// Side the computer plays
        #[arg(long, value_enum)]
        computer_plays: Option<Side>,

        /// Pause before computer moves, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the score tally
    Scores {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Zero the score tally
    ResetScores,

    /// Let the computer play itself
    Autoplay {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Add the results to the persisted tally
        #[arg(long)]
        record: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
