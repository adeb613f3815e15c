//! Game records and summaries.

use warren_core::Direction;
use warren_engine::GameResult;
use warren_world::GameState;

/// Everything needed to re-run a game exactly: the originating layout and
/// the applied move sequence.
///
/// Agent identities are deliberately absent — a record captures *what was
/// played*, not *who played it*, so replay never re-invokes an agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    /// Normalized layout text the game was played on.
    pub layout_text: String,
    /// Adversary cap the initial snapshot was built with.
    pub max_adversaries: usize,
    /// Applied `(agent_index, action)` pairs, in order.
    pub moves: Vec<(usize, Direction)>,
}

impl GameRecord {
    /// Extract the record from a finished game.
    pub fn from_result(result: &GameResult) -> Self {
        let state = &result.final_state;
        Self {
            layout_text: state.data.layout.normalized_text().to_string(),
            max_adversaries: state.num_agents().saturating_sub(1),
            moves: result.moves.clone(),
        }
    }
}

/// The replay-relevant fingerprint of a terminal snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Final cumulative score.
    pub score: i64,
    /// Win flag.
    pub win: bool,
    /// Lose flag.
    pub lose: bool,
    /// Structural hash of the full snapshot.
    pub snapshot_hash: u64,
}

impl From<&GameState> for ReplaySummary {
    fn from(state: &GameState) -> Self {
        Self {
            score: state.score(),
            win: state.is_win(),
            lose: state.is_lose(),
            snapshot_hash: state.structural_hash(),
        }
    }
}
