//! The authoritative game rules: legality, action application, eating,
//! collisions, scoring, and termination.
//!
//! Every transition runs the same fixed sequence — legality, movement,
//! consumption, timer bookkeeping, collision resolution — because later
//! steps depend on positions updated by earlier ones. The functions here
//! are pure with respect to the input snapshot: a rejected action leaves
//! it untouched, and an accepted one yields a brand-new snapshot.

use std::sync::Arc;

use warren_core::{Direction, Moves, Point, RuleError, PLAYER_INDEX};
use warren_grid::legal_moves;
use warren_world::{AgentState, GameState};

/// Turns an adversary stays capturable after the player eats a capsule.
pub const SCARED_DURATION: u32 = 40;
/// Manhattan distance at which the player and an adversary collide.
pub const CAPTURE_RADIUS: f64 = 0.7;
/// Points lost per player move, to discourage waiting around.
pub const TIME_PENALTY: i64 = 1;
/// Points for eating one pellet.
pub const FOOD_SCORE: i64 = 10;
/// Bonus for clearing the board.
pub const WIN_BONUS: i64 = 500;
/// Points for capturing a scared adversary.
pub const CAPTURE_SCORE: i64 = 200;
/// Points lost when the player is caught.
pub const LOSE_PENALTY: i64 = 500;
/// Player movement speed in cells per turn.
pub const PLAYER_SPEED: f64 = 1.0;
/// Adversary movement speed in cells per turn; halved while scared.
pub const ADVERSARY_SPEED: f64 = 1.0;
/// Manhattan distance from a cell centre within which the player eats
/// whatever the cell holds.
pub const EAT_RADIUS: f64 = 0.5;

/// Legal actions for `agent_index` in `state`.
///
/// Terminal snapshots have no legal actions for anyone. Computing this is
/// read-only and idempotent: the same snapshot always yields the same
/// ordered list.
pub fn legal_actions(state: &GameState, agent_index: usize) -> Moves {
    if state.is_terminal() {
        return Moves::new();
    }
    if agent_index == PLAYER_INDEX {
        PlayerRules::legal_actions(state)
    } else {
        AdversaryRules::legal_actions(state, agent_index)
    }
}

/// Apply `action` for `agent_index`, producing the successor snapshot.
///
/// The input snapshot is never modified. Fails with
/// [`RuleError::TerminalState`] if a win or lose flag is already set, and
/// with [`RuleError::IllegalAction`] if the action is outside the agent's
/// legal set — the rules engine never substitutes a different action.
pub fn successor(
    state: &GameState,
    agent_index: usize,
    action: Direction,
) -> Result<GameState, RuleError> {
    if state.is_terminal() {
        return Err(RuleError::TerminalState);
    }

    let mut next = state.successor_base();
    if agent_index == PLAYER_INDEX {
        // A fresh player round: last round's capture flags are stale.
        next.data.captured = vec![false; next.num_agents()];
        PlayerRules::apply(&mut next, action)?;
        next.data.score_change -= TIME_PENALTY;
    } else {
        AdversaryRules::apply(&mut next, agent_index, action)?;
        AdversaryRules::decrement_timer(&mut next.data.agents[agent_index]);
    }

    resolve_collisions(&mut next, agent_index);

    next.data.agent_moved = Some(agent_index);
    next.data.score += next.data.score_change;
    Ok(next)
}

// ── Player rules ────────────────────────────────────────────────

/// How the player interacts with the board.
pub struct PlayerRules;

impl PlayerRules {
    /// The player may take any geometric legal move, including Stop.
    pub fn legal_actions(state: &GameState) -> Moves {
        let config = state.player_state().configuration;
        legal_moves(config.position, config.direction, state.walls())
    }

    /// Move the player and eat whatever the destination holds.
    fn apply(next: &mut GameState, action: Direction) -> Result<(), RuleError> {
        let legal = Self::legal_actions(next);
        if !legal.contains(&action) {
            return Err(RuleError::IllegalAction {
                agent_index: PLAYER_INDEX,
                action,
            });
        }

        let (dx, dy) = action.vector(PLAYER_SPEED);
        let config = next.data.agents[PLAYER_INDEX].configuration.successor(dx, dy);
        next.data.agents[PLAYER_INDEX].configuration = config;

        // Eat when close enough to the cell centre.
        let position = config.position;
        let cell = position.nearest_cell();
        if position.manhattan_distance(cell.into()) <= EAT_RADIUS {
            Self::consume(cell, next);
        }
        Ok(())
    }

    /// Remove a pellet or capsule at `cell`, crediting score and setting
    /// flags.
    fn consume(cell: (i32, i32), next: &mut GameState) {
        let (x, y) = cell;
        if next.has_food(x, y) {
            next.data.score_change += FOOD_SCORE;
            Arc::make_mut(&mut next.data.food).set(x, y, false);
            next.data.food_eaten = Some(cell);
            if next.num_food() == 0 && !next.data.lose {
                next.data.score_change += WIN_BONUS;
                next.data.win = true;
            }
        }
        if let Some(pos) = next.data.capsules.iter().position(|&c| c == cell) {
            next.data.capsules.remove(pos);
            next.data.capsule_eaten = Some(cell);
            // Every adversary becomes capturable.
            for adversary in &mut next.data.agents[PLAYER_INDEX + 1..] {
                adversary.scared_timer = SCARED_DURATION;
            }
        }
    }
}

// ── Adversary rules ─────────────────────────────────────────────

/// How adversaries interact with the board.
pub struct AdversaryRules;

impl AdversaryRules {
    /// Adversaries may never stop, and may not reverse unless a dead end
    /// leaves no other option.
    pub fn legal_actions(state: &GameState, agent_index: usize) -> Moves {
        let config = state.adversary_state(agent_index).configuration;
        let mut moves = legal_moves(config.position, config.direction, state.walls());
        moves.retain(|&mut dir| dir != Direction::Stop);
        let reverse = config.direction.reverse();
        if moves.len() > 1 {
            moves.retain(|&mut dir| dir != reverse);
        }
        moves
    }

    /// Move one adversary at its current speed.
    fn apply(next: &mut GameState, agent_index: usize, action: Direction) -> Result<(), RuleError> {
        let legal = Self::legal_actions(next, agent_index);
        if !legal.contains(&action) {
            return Err(RuleError::IllegalAction {
                agent_index,
                action,
            });
        }

        let adversary = &mut next.data.agents[agent_index];
        let speed = if adversary.is_scared() {
            ADVERSARY_SPEED / 2.0
        } else {
            ADVERSARY_SPEED
        };
        let (dx, dy) = action.vector(speed);
        adversary.configuration = adversary.configuration.successor(dx, dy);
        Ok(())
    }

    /// Tick down one adversary's scared timer.
    ///
    /// On the turn the timer expires the adversary snaps to its nearest
    /// cell centre, so half-speed movement cannot leave it stranded
    /// between cells once it returns to full speed.
    fn decrement_timer(adversary: &mut AgentState) {
        if adversary.scared_timer == 1 {
            let (x, y) = adversary.configuration.position.nearest_cell();
            adversary.configuration.position = Point::cell(x, y);
        }
        adversary.scared_timer = adversary.scared_timer.saturating_sub(1);
    }
}

// ── Collision resolution ────────────────────────────────────────

/// Resolve player/adversary contact after `agent_index` moved.
///
/// A player move is checked against every adversary; an adversary move
/// only against itself. Runs after timers decrement, so an adversary
/// whose scared timer expired this very turn is already dangerous again.
fn resolve_collisions(next: &mut GameState, agent_index: usize) {
    let player_position = next.player_position();
    if agent_index == PLAYER_INDEX {
        for idx in PLAYER_INDEX + 1..next.num_agents() {
            if within_capture_radius(player_position, next.data.agents[idx].position()) {
                collide(next, idx);
            }
        }
    } else if within_capture_radius(player_position, next.data.agents[agent_index].position()) {
        collide(next, agent_index);
    }
}

/// Whether two positions count as touching.
fn within_capture_radius(player: Point, adversary: Point) -> bool {
    player.manhattan_distance(adversary) <= CAPTURE_RADIUS
}

/// Settle one player/adversary contact.
///
/// A scared adversary is captured: it scores, teleports home, and its
/// timer clears. Otherwise the player is caught and the game is lost —
/// unless a win was already recorded this turn, which takes precedence.
fn collide(next: &mut GameState, agent_index: usize) {
    let adversary = &mut next.data.agents[agent_index];
    if adversary.is_scared() {
        next.data.score_change += CAPTURE_SCORE;
        adversary.configuration = adversary.start;
        adversary.scared_timer = 0;
        next.data.captured[agent_index] = true;
    } else if !next.data.win {
        next.data.score_change -= LOSE_PENALTY;
        next.data.lose = true;
    }
}

// ── Classic game rules ──────────────────────────────────────────

/// Whole-game bookkeeping: progress reporting against the initial board.
#[derive(Clone, Debug)]
pub struct ClassicRules {
    initial_food: usize,
}

impl ClassicRules {
    /// Capture the initial board for later progress reports.
    pub fn new(initial: &GameState) -> Self {
        Self {
            initial_food: initial.num_food(),
        }
    }

    /// Fraction of the board cleared so far, in `[0, 1]`.
    ///
    /// A board that starts with no food reports `1.0` immediately.
    pub fn progress(&self, state: &GameState) -> f64 {
        if self.initial_food == 0 {
            return 1.0;
        }
        1.0 - state.num_food() as f64 / self.initial_food as f64
    }
}
