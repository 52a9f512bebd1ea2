//! Stateless UI rendering for the game screen.

use super::app::App;
use noughts_engine::{Board, Player, Position, Square, WinLine};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const HELP: &str = "1-9/arrows+Enter: move  r: restart  n: new game  m: mode  q: quit";

/// Renders the whole screen for `app`.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Mode and turn
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Scores
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Noughts - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let engine = app.engine();
    let turn = if engine.is_active() {
        format!("Turn: {}", engine.to_move())
    } else {
        "Game over".to_string()
    };
    let header = Paragraph::new(format!("Mode: {}  |  {}", engine.mode().label(), turn))
        .alignment(Alignment::Center);
    frame.render_widget(header, chunks[1]);

    draw_board(
        frame,
        chunks[2],
        engine.board(),
        app.cursor(),
        engine.status().winning_line(),
    );

    let scores = engine.scores();
    let score_line = Line::from(vec![
        Span::styled(format!("X: {}", scores.x), player_style(Player::X)),
        Span::raw("   "),
        Span::styled(format!("O: {}", scores.o), player_style(Player::O)),
        Span::raw("   "),
        Span::raw(format!("Draws: {}", scores.draws)),
    ]);
    let score_panel = Paragraph::new(score_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Scores"));
    frame.render_widget(score_panel, chunks[3]);

    draw_status(frame, chunks[4], app);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);

}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    winning: Option<WinLine>,
) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let positions = [row * 3, row * 3 + 1, row * 3 + 2].map(|i| Position::ALL[i]);
        draw_row(frame, chunk, board, cursor, winning, positions);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    winning: Option<WinLine>,
    positions: [Position; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], board, cursor, winning, positions[0]);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], board, cursor, winning, positions[1]);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], board, cursor, winning, positions[2]);
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    winning: Option<WinLine>,
    pos: Position,
) {
    let (symbol, base_style) = match board.get(pos) {
        Square::Empty => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(player) => (format!(" {} ", player), player_style(player)),
    };

    let style = if winning.is_some_and(|line| line.contains(pos)) {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    // Vertically centre the one-line symbol in the three-line cell.
    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(symbol, style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn player_style(player: Player) -> Style {
    let color = match player {
        Player::X => Color::Blue,
        Player::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Status line. Once the game is over the panel carries the result as its
/// title so the board, and the winning line, stay in view.
fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let (block, style) = match app.banner() {
        Some((title, _)) => (
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} Press r to play again ", title))
                .border_style(Style::default().fg(Color::Green)),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        None => (
            Block::default().borders(Borders::ALL),
            Style::default().fg(Color::Yellow),
        ),
    };
    let status_text = Paragraph::new(app.status_message())
        .style(style)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(status_text, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
