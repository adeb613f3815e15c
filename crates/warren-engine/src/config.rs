//! Scheduler configuration and validation.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// What the scheduler does when an agent fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrashPolicy {
    /// Agent errors propagate out of the run loop and deadlines are not
    /// enforced; suitable for trusted agents during development, where a
    /// failure should be loud.
    Propagate,
    /// Agent errors, panics, and deadline misses are caught at the turn
    /// boundary and converted into a `Crashed` outcome attributed to the
    /// failing agent. Other agents are not penalized.
    Catch,
}

/// Timing and failure policy for a [`Game`](crate::game::Game).
///
/// All budgets bound a single agent call from the scheduler's side; the
/// per-move budget is shared between the observation step and the action
/// choice, and the total budget bounds an agent's thinking time across
/// the whole game.
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Agent index that takes the first turn.
    pub starting_index: usize,
    /// Deadline for each agent's startup hook.
    pub startup_budget: Duration,
    /// Deadline for one turn (observation + action choice combined).
    pub move_budget: Duration,
    /// Deadline misses tolerated per agent before the game ends. The
    /// default of 0 crashes on the first miss.
    pub max_time_warnings: u32,
    /// Cumulative thinking-time budget per agent for the whole game.
    pub total_budget: Duration,
    /// Failure handling mode.
    pub crash_policy: CrashPolicy,
    /// When an agent's chosen action is not currently legal, substitute
    /// `Stop` instead of failing. This leniency lives only at the
    /// scheduler boundary — the rules engine still rejects `Stop` where
    /// it is itself illegal (adversaries may never stop).
    pub downgrade_illegal_to_stop: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            starting_index: 0,
            startup_budget: Duration::from_secs(30),
            move_budget: Duration::from_secs(30),
            max_time_warnings: 0,
            total_budget: Duration::from_secs(30),
            crash_policy: CrashPolicy::Propagate,
            downgrade_illegal_to_stop: false,
        }
    }
}

impl ScheduleConfig {
    /// Validate structural invariants against the agent roster size.
    pub fn validate(&self, agent_count: usize) -> Result<(), ConfigError> {
        if agent_count == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.starting_index >= agent_count {
            return Err(ConfigError::StartingIndexOutOfRange {
                index: self.starting_index,
                agents: agent_count,
            });
        }
        for (name, budget) in [
            ("startup_budget", self.startup_budget),
            ("move_budget", self.move_budget),
            ("total_budget", self.total_budget),
        ] {
            if budget.is_zero() {
                return Err(ConfigError::ZeroBudget { which: name });
            }
        }
        Ok(())
    }
}

/// Errors detected while validating a [`ScheduleConfig`] or constructing
/// a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The game has no agents at all.
    NoAgents,
    /// The agent roster does not match the entities in the snapshot.
    AgentCountMismatch {
        /// Agents supplied to the game.
        agents: usize,
        /// Entities present in the initial snapshot.
        entities: usize,
    },
    /// `starting_index` does not name an agent.
    StartingIndexOutOfRange {
        /// The configured starting index.
        index: usize,
        /// How many agents the game has.
        agents: usize,
    },
    /// A time budget is zero, which would time out every call.
    ZeroBudget {
        /// Which budget field was zero.
        which: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAgents => write!(f, "game requires at least one agent"),
            Self::AgentCountMismatch { agents, entities } => {
                write!(
                    f,
                    "snapshot has {entities} entities but {agents} agents were supplied"
                )
            }
            Self::StartingIndexOutOfRange { index, agents } => {
                write!(f, "starting index {index} out of range for {agents} agents")
            }
            Self::ZeroBudget { which } => write!(f, "{which} must be non-zero"),
        }
    }
}

impl Error for ConfigError {}
