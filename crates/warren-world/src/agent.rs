//! External contracts: decision-makers and renderers.

use warren_core::{AgentError, Direction};

use crate::state::GameState;

/// An external decision-maker for one entity.
///
/// The scheduler owns agents and calls them in strict rotation; an agent
/// only ever chooses actions — legality, scoring, and termination belong
/// to the rules engine. Every hook may run on a worker thread under a
/// deadline (hence the `Send` bound), and always receives an independent
/// deep copy of the snapshot: nothing an agent does can touch the
/// authoritative state.
///
/// Only [`choose_action`](Agent::choose_action) is required; the
/// lifecycle hooks default to no-ops.
pub trait Agent: Send {
    /// Choose one of the five actions given an observation of the world.
    ///
    /// The returned action must come from the agent's current legal set;
    /// anything else is a contract violation the engine treats as a hard
    /// error (or downgrades to [`Direction::Stop`] when the scheduler is
    /// configured for leniency).
    fn choose_action(&mut self, observation: &GameState) -> Result<Direction, AgentError>;

    /// Inspect the initial snapshot before the first turn.
    fn on_start(&mut self, initial: &GameState) -> Result<(), AgentError> {
        let _ = initial;
        Ok(())
    }

    /// Transform the snapshot into this agent's observation.
    ///
    /// Returning `Ok(None)` (the default) asks the scheduler to pass the
    /// unfiltered snapshot copy to [`choose_action`](Agent::choose_action).
    /// A partially-observable agent returns a filtered copy instead. Time
    /// spent here counts against the agent's per-move budget.
    fn observe(&mut self, state: &GameState) -> Result<Option<GameState>, AgentError> {
        let _ = state;
        Ok(None)
    }

    /// Inspect the terminal snapshot after the game ends.
    ///
    /// Learning agents use this to observe the final reward.
    fn on_final(&mut self, terminal: &GameState) -> Result<(), AgentError> {
        let _ = terminal;
        Ok(())
    }
}

/// A renderer for game progress.
///
/// The engine only calls out through this trait; it never depends on what
/// a display does. Implementations range from a no-op (headless training)
/// to full graphics.
pub trait GameDisplay {
    /// Called once with the initial snapshot before the first turn.
    fn initialize(&mut self, state: &GameState);

    /// Called after every applied transition with the new snapshot.
    fn update(&mut self, state: &GameState);

    /// Called once with the terminal snapshot after the game ends.
    fn finish(&mut self, state: &GameState);
}
