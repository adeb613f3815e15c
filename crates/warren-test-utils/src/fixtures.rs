//! Agent and display fixtures.
//!
//! The standard cast for scheduler testing:
//!
//! - [`ScriptedAgent`] — plays a fixed move list, then stops.
//! - [`RandomAdversary`] — a seeded chase-legal random adversary.
//! - [`BlockingAgent`] — sleeps past any reasonable deadline.
//! - [`FailingAgent`] — returns an error from a chosen hook.
//! - [`PanickingAgent`] — panics when asked to move.
//! - [`ProbeAgent`] — counts hook invocations through shared atomics.
//! - [`NullDisplay`] — renders nothing (headless runs).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use warren_core::{AgentError, Direction};
use warren_grid::legal_moves;
use warren_world::{Agent, GameDisplay, GameState};

/// Plays a fixed script of actions, then [`Direction::Stop`] forever.
pub struct ScriptedAgent {
    script: VecDeque<Direction>,
}

impl ScriptedAgent {
    /// An agent that will play `script` in order.
    pub fn new(script: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl Agent for ScriptedAgent {
    fn choose_action(&mut self, _observation: &GameState) -> Result<Direction, AgentError> {
        Ok(self.script.pop_front().unwrap_or(Direction::Stop))
    }
}

/// A chase-legal random adversary with a deterministic seed.
///
/// Applies the adversary movement constraints itself — never Stop, never
/// the reverse of its facing unless that is the only exit — and picks
/// uniformly among what remains, so the same seed always replays the
/// same game.
pub struct RandomAdversary {
    agent_index: usize,
    rng: ChaCha8Rng,
}

impl RandomAdversary {
    /// A random adversary driving the entity at `agent_index`.
    pub fn new(agent_index: usize, seed: u64) -> Self {
        Self {
            agent_index,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAdversary {
    fn choose_action(&mut self, observation: &GameState) -> Result<Direction, AgentError> {
        let config = observation.adversary_state(self.agent_index).configuration;
        let mut moves = legal_moves(config.position, config.direction, observation.walls());
        moves.retain(|&mut dir| dir != Direction::Stop);
        let reverse = config.direction.reverse();
        if moves.len() > 1 {
            moves.retain(|&mut dir| dir != reverse);
        }
        moves
            .as_slice()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| AgentError::failed("adversary has no legal move"))
    }
}

/// Sleeps for a configured delay before answering every hook.
///
/// Pair with a small move budget to exercise deadline handling; the
/// answer itself is always `Stop`.
pub struct BlockingAgent {
    delay: Duration,
}

impl BlockingAgent {
    /// An agent that stalls for `delay` on every call.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Agent for BlockingAgent {
    fn choose_action(&mut self, _observation: &GameState) -> Result<Direction, AgentError> {
        std::thread::sleep(self.delay);
        Ok(Direction::Stop)
    }

    fn on_start(&mut self, _initial: &GameState) -> Result<(), AgentError> {
        std::thread::sleep(self.delay);
        Ok(())
    }
}

/// Which hook a [`FailingAgent`] fails from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailingHook {
    /// Fail from `on_start`.
    Start,
    /// Fail from `choose_action`.
    Choose,
    /// Fail from `on_final`.
    Final,
}

/// Returns an [`AgentError`] from one chosen hook and behaves normally
/// everywhere else (moving with `Stop`).
pub struct FailingAgent {
    hook: FailingHook,
}

impl FailingAgent {
    /// An agent that fails from `hook`.
    pub fn new(hook: FailingHook) -> Self {
        Self { hook }
    }
}

impl Agent for FailingAgent {
    fn choose_action(&mut self, _observation: &GameState) -> Result<Direction, AgentError> {
        if self.hook == FailingHook::Choose {
            Err(AgentError::failed("scripted failure in choose_action"))
        } else {
            Ok(Direction::Stop)
        }
    }

    fn on_start(&mut self, _initial: &GameState) -> Result<(), AgentError> {
        if self.hook == FailingHook::Start {
            Err(AgentError::failed("scripted failure in on_start"))
        } else {
            Ok(())
        }
    }

    fn on_final(&mut self, _terminal: &GameState) -> Result<(), AgentError> {
        if self.hook == FailingHook::Final {
            Err(AgentError::failed("scripted failure in on_final"))
        } else {
            Ok(())
        }
    }
}

/// Panics when asked to move.
pub struct PanickingAgent;

impl Agent for PanickingAgent {
    fn choose_action(&mut self, _observation: &GameState) -> Result<Direction, AgentError> {
        panic!("scripted panic in choose_action");
    }
}

/// Counts lifecycle hook invocations through shared atomics, moving with
/// a fixed script like [`ScriptedAgent`].
pub struct ProbeAgent {
    script: VecDeque<Direction>,
    starts: Arc<AtomicUsize>,
    finals: Arc<AtomicUsize>,
    observes: Arc<AtomicUsize>,
}

impl ProbeAgent {
    /// A probe playing `script`; returns the agent and the counters for
    /// `(on_start, observe, on_final)` invocations.
    #[allow(clippy::type_complexity)]
    pub fn new(
        script: impl IntoIterator<Item = Direction>,
    ) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let starts = Arc::new(AtomicUsize::new(0));
        let observes = Arc::new(AtomicUsize::new(0));
        let finals = Arc::new(AtomicUsize::new(0));
        let probe = Self {
            script: script.into_iter().collect(),
            starts: Arc::clone(&starts),
            finals: Arc::clone(&finals),
            observes: Arc::clone(&observes),
        };
        (probe, starts, observes, finals)
    }
}

impl Agent for ProbeAgent {
    fn choose_action(&mut self, _observation: &GameState) -> Result<Direction, AgentError> {
        Ok(self.script.pop_front().unwrap_or(Direction::Stop))
    }

    fn on_start(&mut self, _initial: &GameState) -> Result<(), AgentError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn observe(&mut self, _state: &GameState) -> Result<Option<GameState>, AgentError> {
        self.observes.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    fn on_final(&mut self, _terminal: &GameState) -> Result<(), AgentError> {
        self.finals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A display that renders nothing. For headless training and tests.
#[derive(Default)]
pub struct NullDisplay;

impl GameDisplay for NullDisplay {
    fn initialize(&mut self, _state: &GameState) {}
    fn update(&mut self, _state: &GameState) {}
    fn finish(&mut self, _state: &GameState) {}
}
