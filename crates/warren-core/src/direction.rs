//! The move vocabulary: four compass directions plus [`Stop`](Direction::Stop).

use smallvec::SmallVec;
use std::fmt;

/// A legal-move list.
///
/// Uses `SmallVec<[Direction; 5]>` because an entity never has more than
/// five candidate moves (four compass directions plus Stop), so enumeration
/// never touches the heap.
pub type Moves = SmallVec<[Direction; 5]>;

/// One of the five moves an agent can request each turn.
///
/// The board convention is mathematical: `(0, 0)` is the bottom-left
/// corner, `x` increases to the east and `y` increases to the north.
/// `Stop` maps to the zero vector and never changes an entity's facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards increasing `y`.
    North,
    /// Towards decreasing `y`.
    South,
    /// Towards increasing `x`.
    East,
    /// Towards decreasing `x`.
    West,
    /// Stay in place.
    Stop,
}

impl Direction {
    /// All directions in canonical enumeration order.
    ///
    /// Legality enumeration iterates this array, so its order is part of
    /// the deterministic contract: two runs over the same snapshot produce
    /// identically-ordered legal-move lists.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    /// The unit movement vector for this direction (`Stop` → zero).
    pub fn unit_vector(self) -> (f64, f64) {
        match self {
            Self::North => (0.0, 1.0),
            Self::South => (0.0, -1.0),
            Self::East => (1.0, 0.0),
            Self::West => (-1.0, 0.0),
            Self::Stop => (0.0, 0.0),
        }
    }

    /// The movement vector scaled to `speed` cells per turn.
    pub fn vector(self, speed: f64) -> (f64, f64) {
        let (dx, dy) = self.unit_vector();
        (dx * speed, dy * speed)
    }

    /// The opposite direction (`Stop` reverses to itself).
    pub fn reverse(self) -> Direction {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Stop => Self::Stop,
        }
    }

    /// The direction 90° counter-clockwise from this one.
    pub fn left(self) -> Direction {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
            Self::Stop => Self::Stop,
        }
    }

    /// The direction 90° clockwise from this one.
    pub fn right(self) -> Direction {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
            Self::Stop => Self::Stop,
        }
    }

    /// Classify a movement vector as a direction.
    ///
    /// The vertical component dominates: a diagonal vector classifies as
    /// North/South. The zero vector classifies as `Stop`.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren_core::Direction;
    ///
    /// assert_eq!(Direction::from_vector(0.0, 1.0), Direction::North);
    /// assert_eq!(Direction::from_vector(-0.5, 0.0), Direction::West);
    /// assert_eq!(Direction::from_vector(0.0, 0.0), Direction::Stop);
    /// ```
    pub fn from_vector(dx: f64, dy: f64) -> Direction {
        if dy > 0.0 {
            Self::North
        } else if dy < 0.0 {
            Self::South
        } else if dx < 0.0 {
            Self::West
        } else if dx > 0.0 {
            Self::East
        } else {
            Self::Stop
        }
    }

    /// Stable discriminant for structural hashing.
    pub fn tag(self) -> u8 {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
            Self::Stop => 4,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
            Self::Stop => "Stop",
        };
        write!(f, "{name}")
    }
}
