//! The authoritative game snapshot.

use std::fmt;
use std::sync::Arc;

use warren_core::{Direction, Point, PLAYER_INDEX};
use warren_grid::{Grid, Layout};

use crate::agent_state::AgentState;
use crate::configuration::Configuration;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

fn fnv_u64(mut hash: u64, v: u64) -> u64 {
    for byte in v.to_le_bytes() {
        hash = (hash ^ byte as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// The raw world data behind a [`GameState`].
///
/// Fields are public because the rules engine (a separate crate) writes
/// them while building a successor. A snapshot under construction is
/// exclusively owned by the rules engine; once it is returned to the
/// scheduler it is published and, by contract, never written again.
#[derive(Clone, Debug)]
pub struct GameStateData {
    /// The immutable maze: walls, start positions, initial food. Shared by
    /// every snapshot of a game.
    pub layout: Arc<Layout>,
    /// Remaining pellets. Shared with the predecessor snapshot until a
    /// pellet is eaten, then cloned copy-on-write.
    pub food: Arc<Grid>,
    /// Remaining capsule positions.
    pub capsules: Vec<(i32, i32)>,
    /// Per-entity states. Index 0 is always the player.
    pub agents: Vec<AgentState>,
    /// Cumulative score.
    pub score: i64,
    /// Score delta accumulated during the current transition; folded into
    /// `score` when the transition completes.
    pub score_change: i64,
    /// The pellet removed this turn, if any.
    pub food_eaten: Option<(i32, i32)>,
    /// The capsule removed this turn, if any.
    pub capsule_eaten: Option<(i32, i32)>,
    /// Which agent moved this turn.
    pub agent_moved: Option<usize>,
    /// Per-adversary flag: captured by the player this round. Reset at the
    /// start of each player turn.
    pub captured: Vec<bool>,
    /// The player cleared the board.
    pub win: bool,
    /// The player was caught.
    pub lose: bool,
}

/// One immutable instant of the full game world.
///
/// Snapshots form a chain: each turn the rules engine derives a new
/// snapshot from the current one, and whoever holds a reference to an
/// older generation (a display diffing animations, a search agent
/// backtracking) keeps it alive independently.
///
/// Equality and [`structural_hash`](GameState::structural_hash) cover the
/// planning-relevant state only — agents, food, capsules, and score — and
/// ignore the transient per-turn annotations.
#[derive(Clone, Debug)]
pub struct GameState {
    /// The world data. Public for the rules engine; read-only once published.
    pub data: GameStateData,
}

impl GameState {
    /// Build the initial snapshot for a layout.
    ///
    /// Takes the player start plus up to `max_adversaries` adversary
    /// starts from the layout. Every entity begins centred on its start
    /// cell, facing [`Direction::Stop`].
    pub fn new(layout: &Arc<Layout>, max_adversaries: usize) -> Self {
        let mut agents = Vec::new();
        let mut adversaries = 0;
        for &(is_player, (x, y)) in layout.starts() {
            if !is_player {
                if adversaries == max_adversaries {
                    continue;
                }
                adversaries += 1;
            }
            let start = Configuration::new(Point::cell(x, y), Direction::Stop);
            agents.push(AgentState::new(start, is_player));
        }
        let captured = vec![false; agents.len()];
        Self {
            data: GameStateData {
                layout: Arc::clone(layout),
                food: Arc::new(layout.food.clone()),
                capsules: layout.capsules.clone(),
                agents,
                score: 0,
                score_change: 0,
                food_eaten: None,
                capsule_eaten: None,
                agent_moved: None,
                captured,
                win: false,
                lose: false,
            },
        }
    }

    /// Start a successor snapshot: shared substructures are aliased, the
    /// per-turn annotations are cleared.
    ///
    /// The food grid stays aliased with this snapshot until the rules
    /// engine actually removes a pellet (`Arc::make_mut` clones it at that
    /// point). Only the rules engine should call this; the result is not a
    /// published snapshot until the transition completes.
    pub fn successor_base(&self) -> Self {
        Self {
            data: GameStateData {
                layout: Arc::clone(&self.data.layout),
                food: Arc::clone(&self.data.food),
                capsules: self.data.capsules.clone(),
                agents: self.data.agents.clone(),
                score: self.data.score,
                score_change: 0,
                food_eaten: None,
                capsule_eaten: None,
                agent_moved: None,
                captured: self.data.captured.clone(),
                win: false,
                lose: false,
            },
        }
    }

    /// A fully independent copy, safe to hand to an agent on another
    /// thread.
    ///
    /// The food grid is deep-cloned out of its shared allocation; the
    /// layout stays shared because it is immutable for the life of the
    /// process.
    pub fn deep_clone(&self) -> Self {
        let mut copy = self.clone();
        copy.data.food = Arc::new((*self.data.food).clone());
        copy
    }

    // ── Accessors ───────────────────────────────────────────────

    /// The wall grid.
    pub fn walls(&self) -> &Grid {
        &self.data.layout.walls
    }

    /// The remaining-pellet grid.
    pub fn food(&self) -> &Grid {
        &self.data.food
    }

    /// Remaining capsule positions.
    pub fn capsules(&self) -> &[(i32, i32)] {
        &self.data.capsules
    }

    /// Total number of agents, player included.
    pub fn num_agents(&self) -> usize {
        self.data.agents.len()
    }

    /// The player's state.
    pub fn player_state(&self) -> &AgentState {
        &self.data.agents[PLAYER_INDEX]
    }

    /// The player's continuous position.
    pub fn player_position(&self) -> Point {
        self.player_state().position()
    }

    /// All adversary states, in agent-index order.
    pub fn adversary_states(&self) -> &[AgentState] {
        &self.data.agents[PLAYER_INDEX + 1..]
    }

    /// The state of the adversary with agent index `agent_index`.
    ///
    /// # Panics
    ///
    /// Panics if `agent_index` is the player or out of range; asking for
    /// an adversary that does not exist is a programmer error.
    pub fn adversary_state(&self, agent_index: usize) -> &AgentState {
        assert!(
            agent_index != PLAYER_INDEX && agent_index < self.num_agents(),
            "agent index {agent_index} is not an adversary"
        );
        &self.data.agents[agent_index]
    }

    /// All adversary positions, in agent-index order.
    pub fn adversary_positions(&self) -> Vec<Point> {
        self.adversary_states()
            .iter()
            .map(AgentState::position)
            .collect()
    }

    /// Number of pellets remaining.
    pub fn num_food(&self) -> usize {
        self.data.food.count(true)
    }

    /// Whether `(x, y)` holds a pellet.
    pub fn has_food(&self, x: i32, y: i32) -> bool {
        self.data.food.get(x, y)
    }

    /// Whether `(x, y)` is a wall.
    pub fn has_wall(&self, x: i32, y: i32) -> bool {
        self.walls().get(x, y)
    }

    /// Cumulative score.
    pub fn score(&self) -> i64 {
        self.data.score
    }

    /// Whether the win flag is set.
    pub fn is_win(&self) -> bool {
        self.data.win
    }

    /// Whether the lose flag is set.
    pub fn is_lose(&self) -> bool {
        self.data.lose
    }

    /// Whether this snapshot is terminal (won or lost). Terminal snapshots
    /// have no successors.
    pub fn is_terminal(&self) -> bool {
        self.data.win || self.data.lose
    }

    // ── Structural identity ─────────────────────────────────────

    /// Deterministic hash over the equality domain.
    ///
    /// An explicit, order-stable FNV-1a combine over agent states, the
    /// food grid, capsules, and score — reproducible across processes,
    /// unlike identity-based hashing. Two snapshots hash equal exactly
    /// when they compare equal.
    pub fn structural_hash(&self) -> u64 {
        let mut hash = FNV_OFFSET;
        for agent in &self.data.agents {
            let (x_bits, y_bits) = agent.configuration.position.to_bits();
            hash = fnv_u64(hash, x_bits);
            hash = fnv_u64(hash, y_bits);
            hash = fnv_u64(hash, agent.configuration.direction.tag() as u64);
            hash = fnv_u64(hash, agent.scared_timer as u64);
        }
        hash = fnv_u64(hash, self.data.food.structural_hash());
        for &(x, y) in &self.data.capsules {
            hash = fnv_u64(hash, x as u64);
            hash = fnv_u64(hash, y as u64);
        }
        fnv_u64(hash, self.data.score as u64)
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.data.agents == other.data.agents
            && *self.data.food == *other.data.food
            && self.data.capsules == other.data.capsules
            && self.data.score == other.data.score
    }
}

impl fmt::Display for GameState {
    /// Renders the board the way layouts are written: walls `%`, pellets
    /// `.`, capsules `o`, the player as an arrow showing its facing,
    /// adversaries `G`, followed by the score.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.walls().width() as i32;
        let height = self.walls().height() as i32;
        let mut board: Vec<Vec<char>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        if self.has_wall(x, height - 1 - y) {
                            '%'
                        } else if self.has_food(x, height - 1 - y) {
                            '.'
                        } else {
                            ' '
                        }
                    })
                    .collect()
            })
            .collect();
        for &(x, y) in &self.data.capsules {
            board[(height - 1 - y) as usize][x as usize] = 'o';
        }
        for agent in &self.data.agents {
            let (x, y) = agent.position().nearest_cell();
            let glyph = if agent.is_player {
                match agent.direction() {
                    Direction::North => '^',
                    Direction::South => 'v',
                    Direction::West => '<',
                    _ => '>',
                }
            } else {
                'G'
            };
            board[(height - 1 - y) as usize][x as usize] = glyph;
        }
        for row in board {
            writeln!(f, "{}", row.into_iter().collect::<String>())?;
        }
        write!(f, "Score: {}", self.data.score)
    }
}
