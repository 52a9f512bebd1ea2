//! Application state and logic.

use super::input::{digit_to_index, move_cursor};
use crossterm::event::KeyCode;
use noughts_engine::{GameEngine, GameStatus, MoveOutcome, Player, Position};
use tracing::{debug, info, instrument, warn};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Keep running.
    Continue,
    /// Leave the UI.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    engine: GameEngine,
    cursor: Position,
    status_message: String,
    computer_plays: Player,
}

impl App {
    /// Creates a new application around `engine`.
    ///
    /// `computer_plays` is the side the computer takes whenever computer
    /// mode is switched on.
    #[instrument(skip(engine))]
    pub fn new(engine: GameEngine, computer_plays: Player) -> Self {
        let mut app = Self {
            engine,
            cursor: Position::Center,
            status_message: String::new(),
            computer_plays,
        };
        app.status_message = app.turn_message();
        app
    }

    /// Gets the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the computer should move next.
    pub fn computer_pending(&self) -> bool {
        self.engine.is_computer_turn()
    }

    /// Title and message for the end-of-game banner.
    pub fn banner(&self) -> Option<(String, String)> {
        match self.engine.status() {
            GameStatus::InProgress => None,
            GameStatus::Won { player, .. } => Some((
                format!("{} Wins!", player),
                format!("Player {} has won the game!", player),
            )),
            GameStatus::Draw => Some((
                "It's a Draw!".to_string(),
                "The game ended in a tie!".to_string(),
            )),
        }
    }

    /// Lets the computer take its turn.
    #[instrument(skip(self))]
    pub fn play_computer(&mut self) {
        let outcome = self.engine.computer_move();
        self.apply_outcome(outcome);
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> KeyResponse {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return KeyResponse::Quit;
            }
            KeyCode::Char('r') => self.restart(true),
            KeyCode::Char('n') => self.restart(false),
            KeyCode::Char('m') => self.toggle_mode(),
            KeyCode::Char(' ') | KeyCode::Enter => self.select(self.cursor.to_index()),
            KeyCode::Char(c) => {
                if let Some(index) = digit_to_index(c) {
                    self.select(index);
                }
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            _ => {}
        }
        KeyResponse::Continue
    }

    /// Places the human's mark at `index`.
    fn select(&mut self, index: usize) {
        if self.engine.is_computer_turn() {
            self.status_message = "Computer is thinking...".to_string();
            return;
        }
        if let Some(pos) = Position::from_index(index) {
            self.cursor = pos;
        }
        match self.engine.place_mark(index) {
            Ok(outcome) => self.apply_outcome(outcome),
            Err(e) => {
                warn!(error = %e, "Rejected selection");
                self.status_message = e.to_string();
            }
        }
    }

    /// Updates the status line from a move result.
    fn apply_outcome(&mut self, outcome: MoveOutcome) {
        debug!(?outcome, "Applying move outcome");
        if !outcome.is_applied() {
            self.status_message = if outcome.status().is_terminal() {
                "Game over. Press 'r' to play again.".to_string()
            } else {
                "That square is taken.".to_string()
            };
            return;
        }

        self.status_message = match self.banner() {
            Some((title, message)) => format!("{} {}", title, message),
            None => self.turn_message(),
        };
    }

    fn restart(&mut self, keep_scores: bool) {
        debug!(keep_scores, "Restarting game");
        self.engine.reset(keep_scores);
        self.cursor = Position::Center;
        self.status_message = if keep_scores {
            format!("Game restarted. {}", self.turn_message())
        } else {
            format!("New game, scores cleared. {}", self.turn_message())
        };
    }

    fn toggle_mode(&mut self) {
        let mode = self.engine.mode().toggle(self.computer_plays);
        self.engine.set_mode(mode);
        self.cursor = Position::Center;
        self.status_message = format!("Mode: {}. {}", mode.label(), self.turn_message());
    }

    fn turn_message(&self) -> String {
        format!("Player {}'s turn", self.engine.to_move())
    }
}
