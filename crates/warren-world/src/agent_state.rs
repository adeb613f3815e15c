//! Role-specific movable-entity state.

use std::fmt;

use warren_core::{Direction, Point};

use crate::configuration::Configuration;

/// The full per-entity state: role, configuration, respawn point, scared
/// countdown, and resource-carry counters.
///
/// Equality (and the structural hash) deliberately covers only the
/// configuration and the scared countdown: two agent states that differ
/// only in role or carry counters are interchangeable for planning, and
/// search agents rely on that to deduplicate explored states.
#[derive(Clone, Debug)]
pub struct AgentState {
    /// Whether this entity is the player (index 0) or an adversary.
    pub is_player: bool,
    /// Current position and facing.
    pub configuration: Configuration,
    /// Where the entity started; adversaries respawn here when captured.
    pub start: Configuration,
    /// Turns of vulnerability remaining. Positive means this adversary can
    /// be captured by the player (and moves at half speed).
    pub scared_timer: u32,
    /// Resources picked up but not yet banked.
    pub carrying: u32,
    /// Resources banked.
    pub returned: u32,
}

impl AgentState {
    /// Construct an entity at its start configuration.
    pub fn new(start: Configuration, is_player: bool) -> Self {
        Self {
            is_player,
            configuration: start,
            start,
            scared_timer: 0,
            carrying: 0,
            returned: 0,
        }
    }

    /// Current continuous position.
    pub fn position(&self) -> Point {
        self.configuration.position
    }

    /// Current facing.
    pub fn direction(&self) -> Direction {
        self.configuration.direction
    }

    /// Whether this adversary is currently capturable.
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

impl PartialEq for AgentState {
    fn eq(&self, other: &Self) -> bool {
        self.configuration == other.configuration && self.scared_timer == other.scared_timer
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = if self.is_player { "Player" } else { "Adversary" };
        write!(f, "{role}: {}", self.configuration)
    }
}
