//! Game engine for tic-tac-toe.
//!
//! One [`GameEngine`] per session owns the board, whose turn it is, the
//! opponent mode and the score tally. Callers feed it cell selections and
//! render whatever [`MoveOutcome`] it hands back.

use super::error::EngineError;
use super::opponent::choose_move_with_reason;
use super::random::{RandomSource, ThreadRandom};
use super::rules::{self, GameStatus};
use super::scores::{MemoryScoreStore, ScoreStore, ScoreTally};
use super::{Board, Player, Position, Square};
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument, warn};

/// Who the human is playing against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpponentMode {
    /// Two humans share the board.
    #[default]
    TwoPlayer,
    /// The engine plays one side.
    Computer {
        /// The side the computer plays.
        plays: Player,
    },
}

impl OpponentMode {
    /// The side the computer plays, if any.
    pub fn computer_player(self) -> Option<Player> {
        match self {
            OpponentMode::TwoPlayer => None,
            OpponentMode::Computer { plays } => Some(plays),
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            OpponentMode::TwoPlayer => "2 Players",
            OpponentMode::Computer { .. } => "vs Computer",
        }
    }

    /// Flips between two-player and computer mode. The computer keeps
    /// `plays` when switched on.
    pub fn toggle(self, plays: Player) -> Self {
        match self {
            OpponentMode::TwoPlayer => OpponentMode::Computer { plays },
            OpponentMode::Computer { .. } => OpponentMode::TwoPlayer,
        }
    }
}

/// A mark that was written to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Where the mark went.
    pub position: Position,
    /// Whose mark it is.
    pub player: Player,
}

/// What a move request did.
///
/// `placed` is `None` when the request was ignored (occupied square, game
/// over, computer not due); `status` and `to_move` are then unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct MoveOutcome {
    /// The mark written, if any.
    placed: Option<Placement>,
    /// Status after the request.
    status: GameStatus,
    /// Whose turn it is now.
    to_move: Player,
}

impl MoveOutcome {
    /// Whether a mark was written.
    pub fn is_applied(&self) -> bool {
        self.placed.is_some()
    }
}

/// Tic-tac-toe game engine.
#[derive(Debug)]
pub struct GameEngine {
    board: Board,
    to_move: Player,
    status: GameStatus,
    mode: OpponentMode,
    scores: ScoreTally,
    history: Vec<Position>,
    rng: Box<dyn RandomSource>,
    store: Box<dyn ScoreStore>,
}

impl GameEngine {
    /// Creates an engine with a fresh board, thread-local randomness and an
    /// in-memory score store.
    #[instrument]
    pub fn new(mode: OpponentMode) -> Self {
        info!(mode = mode.label(), "Creating game engine");
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            mode,
            scores: ScoreTally::new(),
            history: Vec::new(),
            rng: Box::new(ThreadRandom),
            store: Box::new(MemoryScoreStore::default()),
        }
    }

    /// Replaces the random source used for the opponent's tie-breaks.
    #[instrument(skip(self))]
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Attaches a score store and loads the tally from it.
    ///
    /// An unreadable store leaves the tally at zero.
    #[instrument(skip(self))]
    pub fn with_store(mut self, store: impl ScoreStore + 'static) -> Self {
        self.scores = match store.load() {
            Ok(tally) => {
                debug!(?tally, "Scores loaded");
                tally
            }
            Err(e) => {
                warn!(error = %e, "Failed to load scores, starting from zero");
                ScoreTally::new()
            }
        };
        self.store = Box::new(store);
        self
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the score tally.
    pub fn scores(&self) -> &ScoreTally {
        &self.scores
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns false once the game is won or drawn.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Returns the opponent mode.
    pub fn mode(&self) -> OpponentMode {
        self.mode
    }

    /// Positions in the order they were played.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Whether [`GameEngine::computer_move`] would play right now.
    pub fn is_computer_turn(&self) -> bool {
        self.is_active() && self.mode.computer_player() == Some(self.to_move)
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CellOutOfRange`] for indices past 8. An
    /// occupied square or a finished game is not an error: the returned
    /// outcome simply has nothing placed.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn place_mark(&mut self, index: usize) -> Result<MoveOutcome, EngineError> {
        let pos = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Rejected out-of-range cell");
            EngineError::CellOutOfRange(index)
        })?;
        Ok(self.place_at(pos))
    }

    /// Places the current player's mark at `pos`.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn place_at(&mut self, pos: Position) -> MoveOutcome {
        if !self.is_active() {
            debug!(position = %pos, "Ignoring move, game is over");
            return self.outcome(None);
        }
        if !self.board.is_empty(pos) {
            debug!(position = %pos, "Ignoring move, square occupied");
            return self.outcome(None);
        }

        let player = self.to_move;
        self.board.set(pos, Square::Occupied(player));
        self.history.push(pos);
        self.update_status();

        self.outcome(Some(Placement {
            position: pos,
            player,
        }))
    }

    /// Lets the computer play its move.
    ///
    /// Does nothing unless the engine is in computer mode, the game is
    /// active and it is the computer's turn.
    #[instrument(skip(self))]
    pub fn computer_move(&mut self) -> MoveOutcome {
        if !self.is_computer_turn() {
            debug!(mode = ?self.mode, to_move = %self.to_move, "Computer move not due");
            return self.outcome(None);
        }

        match choose_move_with_reason(&self.board, self.to_move, self.rng.as_mut()) {
            Some((pos, reason)) => {
                info!(position = %pos, %reason, player = %self.to_move, "Computer chose move");
                self.place_at(pos)
            }
            None => self.outcome(None),
        }
    }

    /// The greedy opponent's choice for whoever is to move. `None` once the
    /// game is over.
    #[instrument(skip(self))]
    pub fn suggest_move(&mut self) -> Option<Position> {
        if !self.is_active() {
            return None;
        }
        choose_move_with_reason(&self.board, self.to_move, self.rng.as_mut()).map(|(pos, _)| pos)
    }

    /// Clears the board for a new game with X to move.
    ///
    /// With `keep_scores == false` the tally is zeroed and saved as well.
    #[instrument(skip(self))]
    pub fn reset(&mut self, keep_scores: bool) {
        info!(keep_scores, "Resetting game");
        self.board = Board::new();
        self.to_move = Player::X;
        self.status = GameStatus::InProgress;
        self.history.clear();

        if !keep_scores {
            self.scores = ScoreTally::new();
            self.persist_scores();
        }
    }

    /// Switches opponent mode and starts a new game, keeping scores.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: OpponentMode) {
        info!(mode = mode.label(), "Changing opponent mode");
        self.mode = mode;
        self.reset(true);
    }

    /// Updates status after a mark: count the result or pass the turn.
    fn update_status(&mut self) {
        self.status = rules::evaluate(&self.board);
        match self.status {
            GameStatus::InProgress => {
                self.to_move = self.to_move.opponent();
            }
            GameStatus::Won { player, line } => {
                info!(%player, line = ?line.indices(), "Game won");
                self.scores.record(&self.status);
                self.persist_scores();
            }
            GameStatus::Draw => {
                info!("Game drawn");
                self.scores.record(&self.status);
                self.persist_scores();
            }
        }
    }

    fn persist_scores(&self) {
        if let Err(e) = self.store.save(&self.scores) {
            warn!(error = %e, "Failed to save scores");
        }
    }

    fn outcome(&self, placed: Option<Placement>) -> MoveOutcome {
        MoveOutcome::new(placed, self.status, self.to_move)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(OpponentMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn test_starts_with_x_on_empty_board() {
        let engine = GameEngine::default();
        assert_eq!(engine.to_move(), Player::X);
        assert_eq!(engine.board().marks_placed(), 0);
        assert!(engine.is_active());
        assert_eq!(engine.mode(), OpponentMode::TwoPlayer);
    }

    #[test]
    fn test_turn_passes_after_move() {
        let mut engine = GameEngine::default();
        let outcome = engine.place_mark(4).expect("in range");
        assert_eq!(
            *outcome.placed(),
            Some(Placement {
                position: Position::Center,
                player: Player::X
            })
        );
        assert_eq!(*outcome.to_move(), Player::O);
        assert_eq!(engine.history(), &[Position::Center]);
    }

    #[test]
    fn test_computer_not_due_in_two_player_mode() {
        let mut engine = GameEngine::default();
        let outcome = engine.computer_move();
        assert!(!outcome.is_applied());
        assert_eq!(engine.board().marks_placed(), 0);
    }

    #[test]
    fn test_computer_waits_for_its_turn() {
        let mut engine = GameEngine::new(OpponentMode::Computer { plays: Player::O })
            .with_random(ScriptedRandom::default());
        assert!(!engine.is_computer_turn());
        assert!(!engine.computer_move().is_applied());

        engine.place_mark(0).expect("in range");
        assert!(engine.is_computer_turn());
        let outcome = engine.computer_move();
        assert_eq!(
            outcome.placed().map(|p| p.position),
            Some(Position::Center)
        );
        assert_eq!(engine.to_move(), Player::X);
    }

    #[test]
    fn test_set_mode_resets_board_and_keeps_scores() {
        let mut engine = GameEngine::default();
        for index in [0, 3, 1, 4, 2] {
            engine.place_mark(index).expect("in range");
        }
        assert_eq!(engine.scores().x, 1);

        engine.set_mode(OpponentMode::Computer { plays: Player::O });
        assert_eq!(engine.board().marks_placed(), 0);
        assert!(engine.is_active());
        assert_eq!(engine.scores().x, 1);
    }

    #[test]
    fn test_suggest_move_stops_after_game_over() {
        let mut engine = GameEngine::default().with_random(ScriptedRandom::default());
        assert_eq!(engine.suggest_move(), Some(Position::Center));
        for index in [0, 3, 1, 4, 2] {
            engine.place_mark(index).expect("in range");
        }
        assert_eq!(engine.suggest_move(), None);
    }
}
