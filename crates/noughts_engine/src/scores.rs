//! Score tally and the persistence seam behind it.

use super::Player;
use super::rules::GameStatus;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// Which counter of the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScoreKey {
    /// Wins for X.
    #[display("X")]
    X,
    /// Wins for O.
    #[display("O")]
    O,
    /// Drawn games.
    #[display("Draw")]
    Draw,
}

impl From<Player> for ScoreKey {
    fn from(player: Player) -> Self {
        match player {
            Player::X => ScoreKey::X,
            Player::O => ScoreKey::O,
        }
    }
}

/// Wins per player and draws.
///
/// Serialises as `{"X": n, "O": n, "draw": n}`. Missing counters read as
/// zero so records written without a draw counter still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTally {
    /// Games won by X.
    #[serde(rename = "X")]
    pub x: u32,
    /// Games won by O.
    #[serde(rename = "O")]
    pub o: u32,
    /// Drawn games.
    #[serde(rename = "draw")]
    pub draws: u32,
}

impl ScoreTally {
    /// A zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one counter.
    pub fn get(&self, key: ScoreKey) -> u32 {
        match key {
            ScoreKey::X => self.x,
            ScoreKey::O => self.o,
            ScoreKey::Draw => self.draws,
        }
    }

    /// Adds one to a counter.
    pub fn increment(&mut self, key: ScoreKey) {
        let slot = match key {
            ScoreKey::X => &mut self.x,
            ScoreKey::O => &mut self.o,
            ScoreKey::Draw => &mut self.draws,
        };
        *slot = slot.saturating_add(1);
    }

    /// Counts a finished game. Returns the counter that changed, or `None`
    /// while the game is still in progress.
    #[instrument(skip(self))]
    pub fn record(&mut self, status: &GameStatus) -> Option<ScoreKey> {
        let key = match status {
            GameStatus::InProgress => return None,
            GameStatus::Won { player, .. } => ScoreKey::from(*player),
            GameStatus::Draw => ScoreKey::Draw,
        };
        self.increment(key);
        debug!(%key, tally = ?self, "Score recorded");
        Some(key)
    }

    /// Total games counted.
    pub fn total(&self) -> u32 {
        self.x.saturating_add(self.o).saturating_add(self.draws)
    }
}

/// Score persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Key-value persistence for the tally.
///
/// The engine loads once when a store is attached and saves after every
/// change. Neither call is assumed to succeed.
pub trait ScoreStore: Send + std::fmt::Debug {
    /// Reads the persisted tally.
    fn load(&self) -> Result<ScoreTally, StoreError>;

    /// Persists `tally`, replacing whatever was stored.
    fn save(&self, tally: &ScoreTally) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<ScoreTally, StoreError> {
        (**self).load()
    }

    fn save(&self, tally: &ScoreTally) -> Result<(), StoreError> {
        (**self).save(tally)
    }
}

/// In-memory store. Clones share the same slot, so a test can keep one
/// handle and inspect what the engine saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    slot: Arc<Mutex<ScoreTally>>,
}

impl MemoryScoreStore {
    /// Creates a store preloaded with `tally`.
    pub fn with_tally(tally: ScoreTally) -> Self {
        Self {
            slot: Arc::new(Mutex::new(tally)),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<ScoreTally, StoreError> {
        self.slot
            .lock()
            .map(|tally| *tally)
            .map_err(|e| StoreError::new(format!("Score slot poisoned: {}", e)))
    }

    fn save(&self, tally: &ScoreTally) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::new(format!("Score slot poisoned: {}", e)))?;
        *slot = *tally;
        Ok(())
    }
}
