//! Error types for replay and verification.

use std::error::Error;
use std::fmt;

use warren_core::RuleError;
use warren_grid::LayoutError;

/// Errors from replaying or verifying a recorded game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// The record's layout text no longer parses.
    Layout(LayoutError),
    /// A recorded move was rejected by the rules engine.
    ///
    /// A valid record only contains moves the engine accepted, so this
    /// means the record was tampered with or the rules changed underneath
    /// it.
    Rule {
        /// Index of the offending move within the record.
        move_index: usize,
        /// The rules engine's rejection.
        error: RuleError,
    },
    /// The replayed final score differs from the recorded one.
    ScoreMismatch {
        /// Score from the original run.
        recorded: i64,
        /// Score from the replay.
        replayed: i64,
    },
    /// The replayed terminal flags differ from the recorded ones.
    OutcomeMismatch {
        /// `(win, lose)` from the original run.
        recorded: (bool, bool),
        /// `(win, lose)` from the replay.
        replayed: (bool, bool),
    },
    /// The replayed snapshot hash differs from the recorded one even
    /// though score and flags match — some other part of the state
    /// diverged.
    SnapshotMismatch {
        /// Structural hash from the original run.
        recorded: u64,
        /// Structural hash from the replay.
        replayed: u64,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::Rule { move_index, error } => {
                write!(f, "move {move_index} rejected during replay: {error}")
            }
            Self::ScoreMismatch { recorded, replayed } => {
                write!(f, "score mismatch: recorded {recorded}, replayed {replayed}")
            }
            Self::OutcomeMismatch { recorded, replayed } => {
                write!(
                    f,
                    "outcome mismatch: recorded (win={}, lose={}), replayed (win={}, lose={})",
                    recorded.0, recorded.1, replayed.0, replayed.1
                )
            }
            Self::SnapshotMismatch { recorded, replayed } => {
                write!(
                    f,
                    "snapshot mismatch: recorded {recorded:#018x}, replayed {replayed:#018x}"
                )
            }
        }
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Rule { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<LayoutError> for ReplayError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}
