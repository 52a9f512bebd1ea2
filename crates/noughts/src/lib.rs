//! Noughts - tic-tac-toe in the terminal.
//!
//! Wraps [`noughts_engine`] with a TOML config, a JSON score file, a
//! ratatui front end and a headless autoplay runner.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod autoplay;
pub mod cli;
pub mod config;
pub mod logging;
pub mod store;
pub mod tui;

pub use autoplay::{AutoplayReport, run_autoplay};
pub use cli::{Cli, Command};
pub use config::{ConfigError, GameConfig, ModeSetting, Side};
pub use logging::{init_file_tracing, init_stderr_tracing};
pub use store::JsonFileScoreStore;
pub use tui::run_tui;
