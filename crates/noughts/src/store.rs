//! JSON file persistence for the score tally.

use noughts_engine::{ScoreStore, ScoreTally, StoreError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Score store backed by a small JSON file, `{"X":n,"O":n,"draw":n}`.
///
/// A missing file reads as a zeroed tally. Saves go through a sibling
/// temporary file and a rename so a crash never leaves half a record.
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    /// Creates a store for the file at `path`. Nothing is read yet.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        debug!("Creating JSON score store");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileScoreStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<ScoreTally, StoreError> {
        if !self.path.exists() {
            debug!("No score file yet, starting from zero");
            return Ok(ScoreTally::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::new(format!("Failed to read '{}': {}", self.path.display(), e))
        })?;
        let tally: ScoreTally = serde_json::from_str(&content).map_err(|e| {
            StoreError::new(format!("Failed to parse '{}': {}", self.path.display(), e))
        })?;

        info!(x = tally.x, o = tally.o, draws = tally.draws, "Scores loaded");
        Ok(tally)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn save(&self, tally: &ScoreTally) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string(tally)
            .map_err(|e| StoreError::new(format!("Failed to encode scores: {}", e)))?;
        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|e| {
            StoreError::new(format!("Failed to write '{}': {}", temp.display(), e))
        })?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            StoreError::new(format!("Failed to replace '{}': {}", self.path.display(), e))
        })?;

        debug!(x = tally.x, o = tally.o, draws = tally.draws, "Scores saved");
        Ok(())
    }
}
