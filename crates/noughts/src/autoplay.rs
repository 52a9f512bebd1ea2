//! Headless computer-vs-computer games.

use derive_getters::Getters;
use derive_new::new;
use noughts_engine::{
    GameEngine, GameStatus, OpponentMode, ScoreStore, ScoreTally, random_source,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Results of an autoplay run.
#[derive(Debug, Clone, Getters, new, Serialize)]
pub struct AutoplayReport {
    /// Games played.
    games: u32,
    /// Results of this run only.
    session: ScoreTally,
    /// Tally held by the store after the run.
    overall: ScoreTally,
}

/// Plays `games` games with the greedy opponent on both sides.
///
/// Every finished game goes through the engine, so results land in
/// `store` like human games do. With a seed the run is reproducible.
#[instrument(skip(store))]
pub fn run_autoplay(
    games: u32,
    seed: Option<u64>,
    store: impl ScoreStore + 'static,
) -> AutoplayReport {
    info!("Starting autoplay");
    let mut engine = GameEngine::new(OpponentMode::TwoPlayer)
        .with_random(random_source(seed))
        .with_store(store);

    let mut session = ScoreTally::new();
    for game in 0..games {
        engine.reset(true);
        while engine.is_active() {
            let Some(pos) = engine.suggest_move() else {
                warn!(game, "Active game without a legal move");
                break;
            };
            engine.place_at(pos);
        }

        let status = engine.status();
        debug!(game, ?status, moves = engine.history().len(), "Autoplay game finished");
        if status != GameStatus::InProgress {
            session.record(&status);
        }
    }

    info!(games, x = session.x, o = session.o, draws = session.draws, "Autoplay finished");
    AutoplayReport::new(games, session, *engine.scores())
}
