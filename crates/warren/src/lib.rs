//! Warren: a deterministic maze-chase simulation engine for
//! reinforcement-learning and search agents.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Warren sub-crates. For most users, adding `warren` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use warren::prelude::*;
//!
//! // An agent that always heads east when it can.
//! struct EastBound;
//! impl Agent for EastBound {
//!     fn choose_action(&mut self, obs: &GameState) -> Result<Direction, AgentError> {
//!         let config = obs.player_state().configuration;
//!         let moves = warren::grid::legal_moves(config.position, config.direction, obs.walls());
//!         Ok(if moves.contains(&Direction::East) {
//!             Direction::East
//!         } else {
//!             Direction::Stop
//!         })
//!     }
//! }
//!
//! struct Headless;
//! impl GameDisplay for Headless {
//!     fn initialize(&mut self, _state: &GameState) {}
//!     fn update(&mut self, _state: &GameState) {}
//!     fn finish(&mut self, _state: &GameState) {}
//! }
//!
//! // A one-corridor board the agent clears by walking east.
//! let mut cache = LayoutCache::new();
//! let layout = cache.get_or_parse("%%%%%\n%P..%\n%%%%%").unwrap();
//! let initial = GameState::new(&layout, 0);
//! let mut game = Game::new(
//!     initial,
//!     vec![Box::new(EastBound)],
//!     Box::new(Headless),
//!     ScheduleConfig::default(),
//! )
//! .unwrap();
//! let result = game.run().unwrap();
//! assert_eq!(result.outcome, GameOutcome::Won);
//! assert_eq!(result.score, -2 + 20 + 500);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `warren-core` | Directions, points, the error taxonomy |
//! | [`grid`] | `warren-grid` | Grids, layouts, the layout cache, geometry |
//! | [`world`] | `warren-world` | Snapshots, entity state, agent contracts |
//! | [`engine`] | `warren-engine` | Rules engine and the turn scheduler |
//! | [`replay`] | `warren-replay` | Game records and determinism checks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Directions, points, and the error taxonomy (`warren-core`).
pub use warren_core as types;

/// Grids, layouts, the layout cache, and movement geometry
/// (`warren-grid`).
pub use warren_grid as grid;

/// Snapshots, entity state, and the agent/display contracts
/// (`warren-world`).
pub use warren_world as world;

/// The rules engine and turn scheduler (`warren-engine`).
pub use warren_engine as engine;

/// Game records and determinism verification (`warren-replay`).
pub use warren_replay as replay;

/// Common imports for typical Warren usage.
///
/// ```rust
/// use warren::prelude::*;
/// ```
pub mod prelude {
    // Core vocabulary
    pub use warren_core::{Direction, Moves, Point, PLAYER_INDEX};

    // Errors
    pub use warren_core::{AgentError, CrashReason, GameError, RuleError};

    // Board and layouts
    pub use warren_grid::{Grid, Layout, LayoutCache, LayoutError};

    // World model and contracts
    pub use warren_world::{Agent, AgentState, Configuration, GameDisplay, GameState};

    // Engine
    pub use warren_engine::{
        ClassicRules, ConfigError, CrashPolicy, Game, GameOutcome, GameResult, GameStatus,
        ScheduleConfig,
    };

    // Replay
    pub use warren_replay::{GameRecord, ReplayError, ReplaySummary};
}
