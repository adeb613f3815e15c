//! Shared maze fixtures.

/// One pellet three moves east-then-south of the player, no adversaries.
/// Cleared by `[East, East, South]` for a score of `-3 + 10 + 500`.
pub const LONE_PELLET: &str = "
    %%%%%
    %P  %
    %  .%
    %   %
    %%%%%";

/// The player boxed into a pocket beside an adversary corridor; the
/// adversary at (4, 1) can only shuttle east and west.
pub const CORRIDOR: &str = "
    %%%%%%%
    %P%.G.%
    %%%%%%%";

/// A capsule between the player and one adversary, with a pellet row
/// underneath. Eating east immediately scares the adversary.
pub const CAPSULE_CHASE: &str = "
    %%%%%%
    %Po.G%
    %....%
    %%%%%%";

/// A two-pellet straightaway with the adversary far behind the player;
/// `[East, East]` clears it before the adversary can close in.
pub const SHORT_DASH: &str = "
    %%%%%%%
    %G P..%
    %%%%%%%";

/// A pure ring around a central pillar. Every open cell has exactly two
/// neighbours, so a non-reversing adversary is forced around the loop
/// and must eventually pass the player's corner — any game where the
/// player stands still is guaranteed to terminate.
pub const RING: &str = "
    %%%%%
    %G..%
    %.%.%
    %P..%
    %%%%%";
