//! Record → replay round-trips: a recorded game must reproduce its exact
//! score, terminal flags, and snapshot hash, and any tampering must be
//! reported as a specific divergence.

use warren_core::Direction;
use warren_engine::{Game, GameOutcome, GameResult, ScheduleConfig};
use warren_grid::LayoutCache;
use warren_replay::{replay, replay_observed, verify, GameRecord, ReplayError, ReplaySummary};
use warren_test_utils::layouts::{LONE_PELLET, RING, SHORT_DASH};
use warren_test_utils::{NullDisplay, RandomAdversary, ScriptedAgent};
use warren_world::{Agent, GameDisplay, GameState};

use Direction::{East, North, South};

fn play(layout_text: &str, agents: Vec<Box<dyn Agent>>) -> GameResult {
    let mut cache = LayoutCache::new();
    let layout = cache.get_or_parse(layout_text).unwrap();
    let initial = GameState::new(&layout, agents.len().saturating_sub(1));
    let mut game = Game::new(
        initial,
        agents,
        Box::new(NullDisplay),
        ScheduleConfig::default(),
    )
    .unwrap();
    game.run().unwrap()
}

#[test]
fn a_recorded_win_replays_exactly() {
    let result = play(
        LONE_PELLET,
        vec![Box::new(ScriptedAgent::new([East, East, South]))],
    );
    assert_eq!(result.outcome, GameOutcome::Won);

    let record = GameRecord::from_result(&result);
    let expected = ReplaySummary::from(&result.final_state);

    let mut cache = LayoutCache::new();
    let replayed = replay(&record, &mut cache).unwrap();
    assert_eq!(replayed.score(), -3 + 10 + 500);
    assert!(replayed.is_win());
    assert_eq!(replayed.structural_hash(), expected.snapshot_hash);

    verify(&record, &mut cache, &expected).unwrap();
}

#[test]
fn a_recorded_chase_replays_exactly() {
    let result = play(
        RING,
        vec![
            Box::new(ScriptedAgent::new([])),
            Box::new(RandomAdversary::new(1, 11)),
        ],
    );
    assert_eq!(result.outcome, GameOutcome::Lost);

    let record = GameRecord::from_result(&result);
    let expected = ReplaySummary::from(&result.final_state);
    let mut cache = LayoutCache::new();
    verify(&record, &mut cache, &expected).unwrap();
}

#[test]
fn replay_itself_is_deterministic() {
    let result = play(
        SHORT_DASH,
        vec![
            Box::new(ScriptedAgent::new([East, East])),
            Box::new(ScriptedAgent::new([East, East])),
        ],
    );
    let record = GameRecord::from_result(&result);

    let mut cache = LayoutCache::new();
    let first = replay(&record, &mut cache).unwrap();
    let second = replay(&record, &mut cache).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.structural_hash(), second.structural_hash());
}

#[test]
fn a_truncated_record_diverges_on_score() {
    let result = play(
        LONE_PELLET,
        vec![Box::new(ScriptedAgent::new([East, East, South]))],
    );
    let mut record = GameRecord::from_result(&result);
    let expected = ReplaySummary::from(&result.final_state);

    record.moves.pop();
    let mut cache = LayoutCache::new();
    let err = verify(&record, &mut cache, &expected).unwrap_err();
    assert!(
        matches!(err, ReplayError::ScoreMismatch { .. }),
        "got {err:?}"
    );
}

#[test]
fn a_tampered_move_is_rejected_with_its_index() {
    let result = play(
        LONE_PELLET,
        vec![Box::new(ScriptedAgent::new([East, East, South]))],
    );
    let mut record = GameRecord::from_result(&result);
    // North from the start cell runs into the border wall.
    record.moves[0] = (0, North);

    let mut cache = LayoutCache::new();
    let err = replay(&record, &mut cache).unwrap_err();
    match err {
        ReplayError::Rule { move_index, .. } => assert_eq!(move_index, 0),
        other => panic!("expected a rule rejection, got {other:?}"),
    }
}

/// Counts display callbacks during an observed replay.
#[derive(Default)]
struct CountingDisplay {
    initialized: usize,
    updates: usize,
    finished: usize,
}

impl GameDisplay for CountingDisplay {
    fn initialize(&mut self, _state: &GameState) {
        self.initialized += 1;
    }
    fn update(&mut self, _state: &GameState) {
        self.updates += 1;
    }
    fn finish(&mut self, _state: &GameState) {
        self.finished += 1;
    }
}

#[test]
fn an_observed_replay_narrates_every_transition() {
    let result = play(
        LONE_PELLET,
        vec![Box::new(ScriptedAgent::new([East, East, South]))],
    );
    let record = GameRecord::from_result(&result);

    let mut cache = LayoutCache::new();
    let mut display = CountingDisplay::default();
    replay_observed(&record, &mut cache, &mut display).unwrap();
    assert_eq!(display.initialized, 1);
    assert_eq!(display.updates, record.moves.len());
    assert_eq!(display.finished, 1);
}
