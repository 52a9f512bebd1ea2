//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

pub use app::{App, KeyResponse};
pub use input::{digit_to_index, move_cursor};
pub use ui::draw;

use crate::config::GameConfig;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts_engine::{GameEngine, ScoreStore, random_source};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Runs the interactive game until the user quits.
#[instrument(skip_all)]
pub async fn run_tui(config: &GameConfig, store: Box<dyn ScoreStore>) -> Result<()> {
    info!("Starting noughts TUI");

    let engine = GameEngine::new(config.opponent_mode())
        .with_random(random_source(*config.seed()))
        .with_store(store);
    let app = App::new(engine, (*config.computer_plays()).into());
    let delay = Duration::from_millis(*config.computer_delay_ms());

    enable_raw_mode()?;
    let mut terminal = with_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )?;

    let res = run_app(&mut terminal, app, delay).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Runs `setup`. If it fails, `restore` runs before the error is returned.
fn with_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    setup().inspect_err(|e| {
        error!(error = %e, "Terminal setup failed, restoring");
        restore();
    })
}

async fn run_app<B>(terminal: &mut Terminal<B>, mut app: App, delay: Duration) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| draw(f, &app))?;

        if app.computer_pending() {
            debug!(delay_ms = delay.as_millis() as u64, "Computer thinking");
            tokio::time::sleep(delay).await;
            app.play_computer();
            continue;
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if app.handle_key(key.code) == KeyResponse::Quit {
                info!("Leaving TUI");
                return Ok(());
            }
        }
    }
}
