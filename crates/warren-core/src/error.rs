//! Error taxonomy shared by the rules engine and the scheduler.
//!
//! Rules-engine failures ([`RuleError`]) are contract violations by an
//! agent and are never silently corrected. Scheduler failures
//! ([`GameError`], [`CrashReason`]) attribute a terminated game to a
//! specific agent. Grid and geometry misuse (out-of-range coordinates,
//! malformed pack words) is a programmer error and panics instead.

use std::error::Error;
use std::fmt;

use crate::direction::Direction;

/// Errors from applying an action to a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// The requested action is not in the agent's current legal set.
    ///
    /// The snapshot is left unchanged. The rules engine never substitutes
    /// a different action; any leniency lives at the scheduler boundary.
    IllegalAction {
        /// The agent that requested the action.
        agent_index: usize,
        /// The rejected action.
        action: Direction,
    },
    /// The snapshot already carries a win or lose flag.
    ///
    /// Terminal snapshots have no successors; callers must check
    /// `is_win()`/`is_lose()` before asking for one.
    TerminalState,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalAction {
                agent_index,
                action,
            } => {
                write!(f, "illegal action {action} for agent {agent_index}")
            }
            Self::TerminalState => write!(f, "cannot advance a terminal snapshot"),
        }
    }
}

impl Error for RuleError {}

/// A failure reported by an agent from one of its hooks.
///
/// Agents signal recoverable trouble by returning this instead of
/// panicking; the scheduler converts it into a crash attributed to the
/// agent (or propagates it, depending on the crash policy).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentError {
    /// The agent could not produce a result.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl AgentError {
    /// Convenience constructor for [`AgentError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { reason } => write!(f, "agent failed: {reason}"),
        }
    }
}

impl Error for AgentError {}

/// Why the scheduler declared an agent crashed.
///
/// Carried inside [`GameError::Crash`] and in the `Crashed` game outcome,
/// so a caller can distinguish a timeout from an exception without parsing
/// strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrashReason {
    /// The startup hook did not return within the startup budget.
    StartupTimeout,
    /// Move deadlines were missed more often than the warning threshold
    /// allows.
    MoveTimeout {
        /// Warnings accumulated by the agent, including the fatal one.
        warnings: u32,
    },
    /// The agent's cumulative thinking time exceeded the whole-game budget.
    TotalBudgetExceeded,
    /// The agent returned an error from one of its hooks.
    AgentError {
        /// The agent's own description of the failure.
        reason: String,
    },
    /// The agent panicked inside a hook.
    Panicked,
    /// The agent requested an action outside its legal set.
    IllegalAction {
        /// The rejected action.
        action: Direction,
    },
}

impl fmt::Display for CrashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartupTimeout => write!(f, "ran out of time on startup"),
            Self::MoveTimeout { warnings } => {
                write!(f, "exceeded the move deadline {warnings} times")
            }
            Self::TotalBudgetExceeded => write!(f, "exceeded the total time budget"),
            Self::AgentError { reason } => write!(f, "agent error: {reason}"),
            Self::Panicked => write!(f, "agent panicked"),
            Self::IllegalAction { action } => {
                write!(f, "requested illegal action {action}")
            }
        }
    }
}

/// Errors surfaced from the scheduler's run loop.
///
/// Only produced when the crash policy is `Propagate`; under `Catch` the
/// same conditions become a `Crashed` game outcome instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The rules engine rejected a transition.
    Rule(RuleError),
    /// An agent failed in a way that ends the game.
    Crash {
        /// The agent responsible.
        agent_index: usize,
        /// What went wrong.
        reason: CrashReason,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(e) => write!(f, "rule violation: {e}"),
            Self::Crash {
                agent_index,
                reason,
            } => write!(f, "agent {agent_index} crashed: {reason}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rule(e) => Some(e),
            Self::Crash { .. } => None,
        }
    }
}

impl From<RuleError> for GameError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}
