//! Tests for headless autoplay.

use noughts::run_autoplay;
use noughts_engine::{MemoryScoreStore, ScoreStore, ScoreTally};

#[test]
fn test_every_game_is_counted() {
    let report = run_autoplay(12, Some(3), MemoryScoreStore::default());
    assert_eq!(*report.games(), 12);
    assert_eq!(report.session().total(), 12);
    assert_eq!(report.overall(), report.session());
}

#[test]
fn test_seeded_runs_match() {
    let first = run_autoplay(8, Some(42), MemoryScoreStore::default());
    let second = run_autoplay(8, Some(42), MemoryScoreStore::default());
    assert_eq!(first.session(), second.session());
}

#[test]
fn test_results_add_to_stored_tally() {
    let store = MemoryScoreStore::with_tally(ScoreTally { x: 5, o: 5, draws: 5 });
    let observer = store.clone();

    let report = run_autoplay(4, Some(1), store);

    assert_eq!(report.overall().total(), 19);
    assert_eq!(observer.load().expect("load"), *report.overall());
}

#[test]
fn test_report_json_layout() {
    let report = run_autoplay(3, Some(5), MemoryScoreStore::default());
    let value = serde_json::to_value(&report).expect("serialise");

    assert_eq!(value["games"], 3);
    let session = &value["session"];
    let total = ["X", "O", "draw"]
        .iter()
        .map(|key| session[*key].as_u64().expect("counter"))
        .sum::<u64>();
    assert_eq!(total, 3);
    assert_eq!(value["overall"], value["session"]);
}
