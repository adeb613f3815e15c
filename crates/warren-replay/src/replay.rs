//! Replay execution and determinism verification.

use warren_engine::rules;
use warren_grid::LayoutCache;
use warren_world::{GameDisplay, GameState};

use crate::error::ReplayError;
use crate::record::{GameRecord, ReplaySummary};

/// Re-run a record through the rules engine, returning the final snapshot.
///
/// The initial snapshot is rebuilt from the record's layout text (via the
/// caller's cache) and every recorded move is applied in order. No agents
/// are involved: replay exercises exactly the deterministic core.
pub fn replay(record: &GameRecord, cache: &mut LayoutCache) -> Result<GameState, ReplayError> {
    replay_inner(record, cache, |_| {})
}

/// Like [`replay`], but narrating each applied transition to a display.
///
/// The display sees the same initialize/update/finish sequence a live
/// game produces, so a recorded game can be watched back.
pub fn replay_observed(
    record: &GameRecord,
    cache: &mut LayoutCache,
    display: &mut dyn GameDisplay,
) -> Result<GameState, ReplayError> {
    let mut initialized = false;
    let final_state = replay_inner(record, cache, |state| {
        if initialized {
            display.update(state);
        } else {
            display.initialize(state);
            initialized = true;
        }
    })?;
    display.finish(&final_state);
    Ok(final_state)
}

fn replay_inner(
    record: &GameRecord,
    cache: &mut LayoutCache,
    mut observe: impl FnMut(&GameState),
) -> Result<GameState, ReplayError> {
    let layout = cache.get_or_parse(&record.layout_text)?;
    let mut state = GameState::new(&layout, record.max_adversaries);
    observe(&state);
    for (move_index, &(agent_index, action)) in record.moves.iter().enumerate() {
        state = rules::successor(&state, agent_index, action)
            .map_err(|error| ReplayError::Rule { move_index, error })?;
        observe(&state);
    }
    Ok(state)
}

/// Replay a record and check it reproduces `expected` exactly.
///
/// Comparison order is score, then terminal flags, then the structural
/// hash, so the reported divergence is the most specific one available.
pub fn verify(
    record: &GameRecord,
    cache: &mut LayoutCache,
    expected: &ReplaySummary,
) -> Result<(), ReplayError> {
    let final_state = replay(record, cache)?;
    let replayed = ReplaySummary::from(&final_state);

    if replayed.score != expected.score {
        return Err(ReplayError::ScoreMismatch {
            recorded: expected.score,
            replayed: replayed.score,
        });
    }
    if (replayed.win, replayed.lose) != (expected.win, expected.lose) {
        return Err(ReplayError::OutcomeMismatch {
            recorded: (expected.win, expected.lose),
            replayed: (replayed.win, replayed.lose),
        });
    }
    if replayed.snapshot_hash != expected.snapshot_hash {
        return Err(ReplayError::SnapshotMismatch {
            recorded: expected.snapshot_hash,
            replayed: replayed.snapshot_hash,
        });
    }
    Ok(())
}
