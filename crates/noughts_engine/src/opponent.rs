//! Greedy computer opponent.
//!
//! One-ply priority rules, first match wins: complete own line, block the
//! opponent's line, take the center, take a random free corner, take any
//! random free square. It never looks further ahead and can be beaten.

use super::random::RandomSource;
use super::rules::WIN_LINES;
use super::{Board, Player, Position, Square};
use tracing::{debug, instrument};

/// Why the opponent picked a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveReason {
    /// Completes one of the mover's lines.
    #[display("win")]
    Win,
    /// Stops the other player from completing a line.
    #[display("block")]
    Block,
    /// Center was free.
    #[display("center")]
    Center,
    /// Random free corner.
    #[display("corner")]
    Corner,
    /// Random free square.
    #[display("any")]
    Any,
}

/// Finds the empty square that completes a line for `player`.
///
/// Lines are scanned in [`WIN_LINES`] order and the first line holding two
/// of `player`'s marks plus one empty square answers.
#[instrument(skip(board))]
pub fn find_completing_move(board: &Board, player: Player) -> Option<Position> {
    WIN_LINES.iter().find_map(|line| {
        let squares = line.positions().map(|pos| board.get(pos));
        let owned = squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count();
        let empty = squares.iter().position(|s| *s == Square::Empty);
        match (owned, empty) {
            (2, Some(slot)) => Some(line.positions()[slot]),
            _ => None,
        }
    })
}

/// Picks a move for `player` together with the rule that chose it.
///
/// Returns `None` only when the board is full.
#[instrument(skip(board, rng))]
pub fn choose_move_with_reason(
    board: &Board,
    player: Player,
    rng: &mut dyn RandomSource,
) -> Option<(Position, MoveReason)> {
    if let Some(pos) = find_completing_move(board, player) {
        return Some((pos, MoveReason::Win));
    }

    if let Some(pos) = find_completing_move(board, player.opponent()) {
        return Some((pos, MoveReason::Block));
    }

    if board.is_empty(Position::Center) {
        return Some((Position::Center, MoveReason::Center));
    }

    let corners: Vec<Position> = Position::CORNERS
        .into_iter()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    if !corners.is_empty() {
        let pos = corners[rng.pick(corners.len())];
        return Some((pos, MoveReason::Corner));
    }

    let open = Position::valid_moves(board);
    if open.is_empty() {
        debug!("No squares left to choose from");
        return None;
    }
    Some((open[rng.pick(open.len())], MoveReason::Any))
}

/// Picks a move for `player`, `None` when the board is full.
pub fn choose_move(board: &Board, player: Player, rng: &mut dyn RandomSource) -> Option<Position> {
    choose_move_with_reason(board, player, rng).map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn board_with(marks: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for (index, player) in marks {
            if let Some(pos) = Position::from_index(*index) {
                board.set(pos, Square::Occupied(*player));
            }
        }
        board
    }

    #[test]
    fn test_completing_move_ignores_blocked_lines() {
        // Top row is X X O: not completable.
        let board = board_with(&[(0, Player::X), (1, Player::X), (2, Player::O)]);
        assert_eq!(find_completing_move(&board, Player::X), None);
    }

    #[test]
    fn test_win_beats_block() {
        // O can win on 5 (middle row) and X threatens 2 (top row).
        let board = board_with(&[
            (0, Player::X),
            (1, Player::X),
            (3, Player::O),
            (4, Player::O),
            (8, Player::X),
        ]);
        let mut rng = ScriptedRandom::default();
        assert_eq!(
            choose_move_with_reason(&board, Player::O, &mut rng),
            Some((Position::MiddleRight, MoveReason::Win))
        );
    }

    #[test]
    fn test_corner_uses_random_source() {
        // Center taken, no threats: corners 0, 2, 6, 8 all free.
        let board = board_with(&[(4, Player::X)]);
        let mut rng = ScriptedRandom::new([2]);
        assert_eq!(
            choose_move_with_reason(&board, Player::O, &mut rng),
            Some((Position::BottomLeft, MoveReason::Corner))
        );
    }

    #[test]
    fn test_any_square_when_corners_gone() {
        // X O X / . X . / O X O with O to move and no live lines for anyone.
        let board = board_with(&[
            (0, Player::X),
            (1, Player::O),
            (2, Player::X),
            (4, Player::X),
            (6, Player::O),
            (7, Player::X),
            (8, Player::O),
        ]);
        // Open squares are 3 and 5; neither completes or blocks a line.
        let mut rng = ScriptedRandom::new([1]);
        assert_eq!(find_completing_move(&board, Player::O), None);
        assert_eq!(find_completing_move(&board, Player::X), None);
        assert_eq!(
            choose_move_with_reason(&board, Player::O, &mut rng),
            Some((Position::MiddleRight, MoveReason::Any))
        );
    }

    #[test]
    fn test_full_board_has_no_move() {
        let marks: Vec<_> = (0..9)
            .map(|i| (i, if i % 2 == 0 { Player::X } else { Player::O }))
            .collect();
        let board = board_with(&marks);
        let mut rng = ScriptedRandom::default();
        assert_eq!(choose_move(&board, Player::O, &mut rng), None);
    }
}
