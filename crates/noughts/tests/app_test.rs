//! Tests for terminal UI state and rendering.

use crossterm::event::KeyCode;
use noughts::tui::{App, KeyResponse, draw};
use noughts_engine::{
    GameEngine, GameStatus, MemoryScoreStore, OpponentMode, Player, Position, ScriptedRandom,
    Square,
};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};

fn two_player_app() -> App {
    let engine =
        GameEngine::new(OpponentMode::TwoPlayer).with_store(MemoryScoreStore::default());
    App::new(engine, Player::O)
}

fn press_all(app: &mut App, keys: &[char]) {
    for key in keys {
        assert_eq!(app.handle_key(KeyCode::Char(*key)), KeyResponse::Continue);
    }
}

fn render_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal.draw(|f| draw(f, app)).expect("draw");
    terminal.backend().buffer().clone()
}

fn render(app: &App) -> String {
    render_buffer(app, 60, 26)
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn highlighted_marks(buffer: &Buffer, mark: &str) -> usize {
    buffer
        .content()
        .iter()
        .filter(|cell| cell.bg == Color::Green && cell.symbol() == mark)
        .count()
}

#[test]
fn test_digit_keys_place_marks() {
    let mut app = two_player_app();
    press_all(&mut app, &['1', '5']);

    let board = app.engine().board();
    assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::X));
    assert_eq!(board.get(Position::Center), Square::Occupied(Player::O));
    assert_eq!(app.status_message(), "Player X's turn");
}

#[test]
fn test_arrows_and_enter_place_mark() {
    let mut app = two_player_app();
    app.handle_key(KeyCode::Up);
    app.handle_key(KeyCode::Left);
    assert_eq!(app.cursor(), Position::TopLeft);

    app.handle_key(KeyCode::Enter);
    assert_eq!(
        app.engine().board().get(Position::TopLeft),
        Square::Occupied(Player::X)
    );

    app.handle_key(KeyCode::Right);
    app.handle_key(KeyCode::Char(' '));
    assert_eq!(
        app.engine().board().get(Position::TopCenter),
        Square::Occupied(Player::O)
    );
}

#[test]
fn test_taken_square_keeps_turn() {
    let mut app = two_player_app();
    press_all(&mut app, &['5', '5']);
    assert_eq!(app.engine().to_move(), Player::O);
    assert_eq!(app.status_message(), "That square is taken.");
}

#[test]
fn test_win_shows_banner_and_counts() {
    let mut app = two_player_app();
    press_all(&mut app, &['1', '4', '2', '5', '3']);

    assert_eq!(app.engine().scores().x, 1);
    let (title, message) = app.banner().expect("game over");
    assert_eq!(title, "X Wins!");
    assert_eq!(message, "Player X has won the game!");
    assert!(app.status_message().starts_with("X Wins!"));

    press_all(&mut app, &['9']);
    assert!(app.status_message().starts_with("Game over"));
}

#[test]
fn test_draw_banner() {
    let mut app = two_player_app();
    press_all(&mut app, &['1', '2', '3', '5', '4', '6', '8', '7', '9']);

    assert_eq!(app.engine().status(), GameStatus::Draw);
    let (title, _) = app.banner().expect("game over");
    assert_eq!(title, "It's a Draw!");
}

#[test]
fn test_restart_keeps_scores_and_new_game_clears() {
    let mut app = two_player_app();
    press_all(&mut app, &['1', '4', '2', '5', '3']);

    press_all(&mut app, &['r']);
    assert_eq!(app.engine().board().marks_placed(), 0);
    assert_eq!(app.engine().scores().x, 1);

    press_all(&mut app, &['n']);
    assert_eq!(app.engine().scores().total(), 0);
}

#[test]
fn test_mode_toggle_and_computer_reply() {
    let engine = GameEngine::new(OpponentMode::TwoPlayer)
        .with_random(ScriptedRandom::new([0]))
        .with_store(MemoryScoreStore::default());
    let mut app = App::new(engine, Player::O);

    press_all(&mut app, &['m']);
    assert_eq!(app.engine().mode(), OpponentMode::Computer { plays: Player::O });

    press_all(&mut app, &['1']);
    assert!(app.computer_pending());

    // Human input waits for the computer.
    press_all(&mut app, &['2']);
    assert_eq!(app.engine().board().marks_placed(), 1);

    app.play_computer();
    assert_eq!(
        app.engine().board().get(Position::Center),
        Square::Occupied(Player::O)
    );
    assert!(!app.computer_pending());

    press_all(&mut app, &['m']);
    assert_eq!(app.engine().mode(), OpponentMode::TwoPlayer);
    assert_eq!(app.engine().board().marks_placed(), 0);
}

#[test]
fn test_quit_keys() {
    let mut app = two_player_app();
    assert_eq!(app.handle_key(KeyCode::Char('q')), KeyResponse::Quit);
    assert_eq!(app.handle_key(KeyCode::Esc), KeyResponse::Quit);
}

#[test]
fn test_render_shows_marks_and_scores() {
    let mut app = two_player_app();
    press_all(&mut app, &['1', '4', '2', '5', '3']);

    let screen = render(&app);
    assert!(screen.contains("Noughts - Tic Tac Toe"));
    assert!(screen.contains("X Wins!"));
    assert!(screen.contains("X: 1"));
    assert!(screen.contains("Mode: 2 Players"));
}

#[test]
fn test_winning_line_through_center_stays_visible() {
    let mut app = two_player_app();
    // X takes the middle row.
    press_all(&mut app, &['4', '1', '5', '2', '6']);
    assert!(app.banner().is_some());

    let buffer = render_buffer(&app, 80, 24);
    assert_eq!(highlighted_marks(&buffer, "X"), 3);
}

#[test]
fn test_every_winning_line_is_highlighted() {
    // One X win per line, O filling squares off the line.
    let games: [&[char]; 8] = [
        &['1', '4', '2', '5', '3'],
        &['4', '1', '5', '2', '6'],
        &['7', '1', '8', '2', '9'],
        &['1', '2', '4', '3', '7'],
        &['2', '1', '5', '3', '8'],
        &['3', '1', '6', '2', '9'],
        &['1', '2', '5', '3', '9'],
        &['3', '1', '5', '2', '7'],
    ];
    for keys in games {
        let mut app = two_player_app();
        press_all(&mut app, keys);
        assert_eq!(app.engine().status().winner(), Some(Player::X), "{keys:?}");

        let buffer = render_buffer(&app, 80, 24);
        assert_eq!(highlighted_marks(&buffer, "X"), 3, "{keys:?}");
    }
}
