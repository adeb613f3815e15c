//! The turn scheduler.
//!
//! [`Game`] drives a match to completion: it solicits actions from agents
//! in strict round-robin order, bounds every agent call with a deadline,
//! advances the authoritative snapshot through the rules engine, and
//! records the move history for exact replay.
//!
//! Agents live behind per-agent mutexes and only ever receive independent
//! deep copies of the snapshot, so an abandoned (timed-out) call can
//! neither observe nor corrupt the authoritative state — at worst it
//! keeps its mutex busy, which surfaces as further timeouts for that
//! agent alone.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use warren_core::{AgentError, CrashReason, Direction, GameError, RuleError};
use warren_world::{Agent, GameDisplay, GameState};

use crate::config::{ConfigError, CrashPolicy, ScheduleConfig};
use crate::rules::{self, ClassicRules};
use crate::timebox::{call_with_deadline, CallOutcome};

type SharedAgent = Arc<Mutex<Box<dyn Agent>>>;

/// Lifecycle of a [`Game`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// `run()` has not been called yet.
    NotStarted,
    /// The turn loop is executing.
    Running,
    /// The player cleared the board.
    Won,
    /// The player was caught.
    Lost,
    /// An agent failure ended the game.
    Crashed,
}

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// The player cleared the board.
    Won,
    /// The player was caught.
    Lost,
    /// An agent failure ended the game. Distinct from a normal loss: the
    /// failing agent is named and no win/lose flags are implied.
    Crashed {
        /// The agent responsible.
        agent_index: usize,
        /// What went wrong.
        reason: CrashReason,
    },
}

/// Everything a finished game reports.
#[derive(Clone, Debug)]
pub struct GameResult {
    /// How the game ended.
    pub outcome: GameOutcome,
    /// Final cumulative score.
    pub score: i64,
    /// Every applied `(agent_index, action)` pair, in order. Replaying
    /// this sequence from the same layout reproduces the game exactly.
    pub moves: Vec<(usize, Direction)>,
    /// Per-agent deadline-miss counts.
    pub warnings: Vec<u32>,
    /// Non-fatal agent failures recorded during finalization hooks.
    pub hook_crashes: Vec<(usize, CrashReason)>,
    /// The snapshot the game ended on.
    pub final_state: GameState,
}

/// Outcome of one bounded agent call, from the scheduler's side.
enum CallResult<T> {
    /// The call returned a value within its budget.
    Value(T, Duration),
    /// The deadline elapsed; the call was abandoned.
    Timeout,
    /// The agent failed (error or panic).
    Failed(CrashReason),
}

/// The turn loop: owns the snapshot, the agents, and the display.
///
/// Construct with [`Game::new`], then call [`run()`](Game::run) exactly
/// once. The status moves `NotStarted → Running → {Won, Lost, Crashed}`.
pub struct Game {
    state: GameState,
    agents: Vec<SharedAgent>,
    display: Box<dyn GameDisplay>,
    config: ScheduleConfig,
    rules: ClassicRules,
    status: GameStatus,
    move_history: Vec<(usize, Direction)>,
    total_time: Vec<Duration>,
    warnings: Vec<u32>,
    hook_crashes: Vec<(usize, CrashReason)>,
}

impl Game {
    /// Build a game over an initial snapshot.
    ///
    /// The roster must supply exactly one agent per entity in the
    /// snapshot (the player at index 0, adversaries after it).
    pub fn new(
        initial: GameState,
        agents: Vec<Box<dyn Agent>>,
        display: Box<dyn GameDisplay>,
        config: ScheduleConfig,
    ) -> Result<Self, ConfigError> {
        config.validate(agents.len())?;
        if agents.len() != initial.num_agents() {
            return Err(ConfigError::AgentCountMismatch {
                agents: agents.len(),
                entities: initial.num_agents(),
            });
        }
        let count = agents.len();
        Ok(Self {
            rules: ClassicRules::new(&initial),
            state: initial,
            agents: agents.into_iter().map(|a| Arc::new(Mutex::new(a))).collect(),
            display,
            config,
            status: GameStatus::NotStarted,
            move_history: Vec::new(),
            total_time: vec![Duration::ZERO; count],
            warnings: vec![0; count],
            hook_crashes: Vec::new(),
        })
    }

    /// The current authoritative snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Where the game is in its lifecycle.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Applied moves so far, in order.
    pub fn move_history(&self) -> &[(usize, Direction)] {
        &self.move_history
    }

    /// Fraction of the board cleared, `1.0` once the game is over.
    pub fn progress(&self) -> f64 {
        match self.status {
            GameStatus::NotStarted | GameStatus::Running => self.rules.progress(&self.state),
            _ => 1.0,
        }
    }

    /// Drive the game to completion.
    ///
    /// Under [`CrashPolicy::Catch`] this always returns `Ok`: agent
    /// failures become a [`GameOutcome::Crashed`] result. Under
    /// [`CrashPolicy::Propagate`] agent errors and rule violations return
    /// `Err` instead (and deadlines are not enforced, so hung agents hang
    /// the caller — the mode is for trusted agents).
    ///
    /// # Panics
    ///
    /// Panics if called more than once; a game runs exactly one match.
    pub fn run(&mut self) -> Result<GameResult, GameError> {
        assert_eq!(
            self.status,
            GameStatus::NotStarted,
            "a game can only be run once"
        );
        self.status = GameStatus::Running;
        let result = self.run_loop();
        if result.is_err() {
            self.status = GameStatus::Crashed;
        }
        result
    }

    fn run_loop(&mut self) -> Result<GameResult, GameError> {
        self.display.initialize(&self.state);

        // Startup hooks, each under the startup budget. A failure here is
        // attributed to the agent and is never a normal loss.
        for agent_index in 0..self.agents.len() {
            let snapshot = self.state.deep_clone();
            let outcome = self.invoke(agent_index, self.config.startup_budget, move |agent| {
                agent.on_start(&snapshot)
            })?;
            match outcome {
                CallResult::Value((), elapsed) => self.total_time[agent_index] += elapsed,
                CallResult::Timeout => {
                    return Ok(self.finish_crashed(agent_index, CrashReason::StartupTimeout))
                }
                CallResult::Failed(reason) => {
                    return Ok(self.finish_crashed(agent_index, reason))
                }
            }
        }

        let num_agents = self.agents.len();
        let mut agent_index = self.config.starting_index;

        while !self.state.is_terminal() {
            let mut spent = Duration::ZERO;

            // Observation step: the agent may filter its view of the
            // snapshot. Time spent here counts against the move budget.
            let snapshot = self.state.deep_clone();
            let observed = self.invoke(agent_index, self.config.move_budget, move |agent| {
                agent.observe(&snapshot)
            })?;
            let observation = match observed {
                CallResult::Value(custom, elapsed) => {
                    spent += elapsed;
                    match custom {
                        Some(filtered) => filtered,
                        None => self.state.deep_clone(),
                    }
                }
                CallResult::Timeout => {
                    match self.note_timeout(agent_index) {
                        Some(reason) => return Ok(self.finish_crashed(agent_index, reason)),
                        None => {
                            agent_index = (agent_index + 1) % num_agents;
                            continue;
                        }
                    }
                }
                CallResult::Failed(reason) => {
                    return Ok(self.finish_crashed(agent_index, reason))
                }
            };

            // Action choice, under whatever budget the observation left.
            let remaining = self.config.move_budget.saturating_sub(spent);
            let chosen = if remaining.is_zero() {
                CallResult::Timeout
            } else {
                self.invoke(agent_index, remaining, move |agent| {
                    agent.choose_action(&observation)
                })?
            };
            let action = match chosen {
                CallResult::Value(action, elapsed) => {
                    spent += elapsed;
                    action
                }
                CallResult::Timeout => {
                    match self.note_timeout(agent_index) {
                        Some(reason) => return Ok(self.finish_crashed(agent_index, reason)),
                        None => {
                            agent_index = (agent_index + 1) % num_agents;
                            continue;
                        }
                    }
                }
                CallResult::Failed(reason) => {
                    return Ok(self.finish_crashed(agent_index, reason))
                }
            };

            self.total_time[agent_index] += spent;
            if self.config.crash_policy == CrashPolicy::Catch
                && self.total_time[agent_index] > self.config.total_budget
            {
                return Ok(self.finish_crashed(agent_index, CrashReason::TotalBudgetExceeded));
            }

            // Scheduler-boundary leniency: the one sanctioned substitution
            // is downgrading an illegal choice to Stop. The rules engine
            // itself still rejects Stop where Stop is illegal.
            let legal = rules::legal_actions(&self.state, agent_index);
            let action = if legal.contains(&action) {
                action
            } else if self.config.downgrade_illegal_to_stop {
                Direction::Stop
            } else {
                return match self.config.crash_policy {
                    CrashPolicy::Catch => {
                        Ok(self.finish_crashed(agent_index, CrashReason::IllegalAction { action }))
                    }
                    CrashPolicy::Propagate => {
                        Err(GameError::Rule(RuleError::IllegalAction {
                            agent_index,
                            action,
                        }))
                    }
                };
            };

            match rules::successor(&self.state, agent_index, action) {
                Ok(next) => {
                    self.state = next;
                    self.move_history.push((agent_index, action));
                }
                Err(e) => {
                    return match self.config.crash_policy {
                        CrashPolicy::Propagate => Err(GameError::Rule(e)),
                        CrashPolicy::Catch => {
                            let reason = match e {
                                RuleError::IllegalAction { action, .. } => {
                                    CrashReason::IllegalAction { action }
                                }
                                // The loop never advances a terminal snapshot.
                                RuleError::TerminalState => CrashReason::AgentError {
                                    reason: e.to_string(),
                                },
                            };
                            Ok(self.finish_crashed(agent_index, reason))
                        }
                    };
                }
            }

            self.display.update(&self.state);
            agent_index = (agent_index + 1) % num_agents;
        }

        // Finalization hooks with the terminal snapshot. Failures here are
        // non-fatal under Catch: the game outcome stands and the failure
        // is recorded against the agent.
        for agent_index in 0..num_agents {
            let snapshot = self.state.deep_clone();
            let outcome = self.invoke(agent_index, self.config.move_budget, move |agent| {
                agent.on_final(&snapshot)
            })?;
            match outcome {
                CallResult::Value((), elapsed) => self.total_time[agent_index] += elapsed,
                CallResult::Timeout => {
                    self.warnings[agent_index] += 1;
                    self.hook_crashes.push((
                        agent_index,
                        CrashReason::MoveTimeout {
                            warnings: self.warnings[agent_index],
                        },
                    ));
                }
                CallResult::Failed(reason) => {
                    self.hook_crashes.push((agent_index, reason));
                }
            }
        }

        self.display.finish(&self.state);
        let outcome = if self.state.is_win() {
            self.status = GameStatus::Won;
            GameOutcome::Won
        } else {
            self.status = GameStatus::Lost;
            GameOutcome::Lost
        };
        Ok(self.build_result(outcome))
    }

    /// Invoke one agent hook under the configured policy.
    ///
    /// Under `Catch` the call runs on a worker thread with a deadline;
    /// under `Propagate` it runs inline (no deadline) and an agent error
    /// becomes `Err` immediately.
    fn invoke<T: Send + 'static>(
        &mut self,
        agent_index: usize,
        budget: Duration,
        call: impl FnOnce(&mut dyn Agent) -> Result<T, AgentError> + Send + 'static,
    ) -> Result<CallResult<T>, GameError> {
        match self.config.crash_policy {
            CrashPolicy::Catch => {
                let agent = Arc::clone(&self.agents[agent_index]);
                let outcome = call_with_deadline(budget, move || {
                    let mut guard = agent.lock().expect("agent mutex poisoned");
                    call(&mut **guard)
                });
                Ok(match outcome {
                    CallOutcome::Completed {
                        value: Ok(value),
                        elapsed,
                    } => CallResult::Value(value, elapsed),
                    CallOutcome::Completed {
                        value: Err(AgentError::Failed { reason }),
                        ..
                    } => CallResult::Failed(CrashReason::AgentError { reason }),
                    CallOutcome::TimedOut => CallResult::Timeout,
                    CallOutcome::Panicked => CallResult::Failed(CrashReason::Panicked),
                })
            }
            CrashPolicy::Propagate => {
                let mut guard = self.agents[agent_index]
                    .lock()
                    .expect("agent mutex poisoned");
                let started = Instant::now();
                match call(&mut **guard) {
                    Ok(value) => Ok(CallResult::Value(value, started.elapsed())),
                    Err(AgentError::Failed { reason }) => Err(GameError::Crash {
                        agent_index,
                        reason: CrashReason::AgentError { reason },
                    }),
                }
            }
        }
    }

    /// Record a deadline miss; returns the escalated crash reason once
    /// the warning threshold is exhausted.
    fn note_timeout(&mut self, agent_index: usize) -> Option<CrashReason> {
        self.warnings[agent_index] += 1;
        if self.warnings[agent_index] > self.config.max_time_warnings {
            Some(CrashReason::MoveTimeout {
                warnings: self.warnings[agent_index],
            })
        } else {
            None
        }
    }

    fn finish_crashed(&mut self, agent_index: usize, reason: CrashReason) -> GameResult {
        self.status = GameStatus::Crashed;
        self.build_result(GameOutcome::Crashed {
            agent_index,
            reason,
        })
    }

    fn build_result(&mut self, outcome: GameOutcome) -> GameResult {
        GameResult {
            outcome,
            score: self.state.score(),
            moves: self.move_history.clone(),
            warnings: self.warnings.clone(),
            hook_crashes: std::mem::take(&mut self.hook_crashes),
            final_state: self.state.clone(),
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("status", &self.status)
            .field("agents", &self.agents.len())
            .field("moves", &self.move_history.len())
            .field("score", &self.state.score())
            .finish()
    }
}
