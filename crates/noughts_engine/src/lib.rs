//! Tic-tac-toe game logic.
//!
//! A [`GameEngine`] owns one session: board, turn, status, opponent mode and
//! score tally. Callers (a terminal UI, a test harness) feed it cell
//! selections and render the [`MoveOutcome`] it returns. The computer side
//! is a greedy one-ply heuristic whose random tie-breaks come from an
//! injectable [`RandomSource`]; scores persist through a [`ScoreStore`].
//!
//! # Example
//!
//! ```
//! use noughts_engine::{GameEngine, GameStatus, OpponentMode, Player};
//!
//! let mut engine = GameEngine::new(OpponentMode::TwoPlayer);
//! for index in [0, 4, 1, 5, 2] {
//!     engine.place_mark(index).expect("index in range");
//! }
//! assert_eq!(engine.status().winner(), Some(Player::X));
//! assert_eq!(engine.scores().x, 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod opponent;
mod position;
mod random;
mod rules;
mod scores;
mod types;

pub use engine::{GameEngine, MoveOutcome, OpponentMode, Placement};
pub use error::EngineError;
pub use opponent::{MoveReason, choose_move, choose_move_with_reason, find_completing_move};
pub use position::Position;
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom, random_source};
pub use rules::{GameStatus, WIN_LINES, WinLine, check_winner, evaluate, is_draw, is_full};
pub use scores::{MemoryScoreStore, ScoreKey, ScoreStore, ScoreTally, StoreError};
pub use types::{Board, Player, Square};
