//! An entity's position and facing.

use std::fmt;
use warren_core::{Direction, Point};

/// An immutable (position, facing) pair.
///
/// Movement produces new configurations via [`successor`](Configuration::successor);
/// nothing ever rotates or moves a configuration in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Configuration {
    /// Continuous board position.
    pub position: Point,
    /// Direction the entity is facing.
    pub direction: Direction,
}

impl Configuration {
    /// Construct a configuration.
    pub fn new(position: Point, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// The configuration reached by translating along `(dx, dy)`.
    ///
    /// The new facing is derived from the vector; a zero vector inherits
    /// the previous facing, so stopping never erases which way an entity
    /// points. This is a low-level translation — legality is the rules
    /// engine's business.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren_core::{Direction, Point};
    /// use warren_world::Configuration;
    ///
    /// let config = Configuration::new(Point::cell(2, 2), Direction::East);
    /// let stopped = config.successor(0.0, 0.0);
    /// assert_eq!(stopped.direction, Direction::East);
    ///
    /// let moved = config.successor(0.0, 1.0);
    /// assert_eq!(moved.direction, Direction::North);
    /// assert_eq!(moved.position, Point::new(2.0, 3.0));
    /// ```
    pub fn successor(self, dx: f64, dy: f64) -> Self {
        let direction = match Direction::from_vector(dx, dy) {
            Direction::Stop => self.direction,
            dir => dir,
        };
        Self {
            position: self.position.translate(dx, dy),
            direction,
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.position, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_translates_and_faces_the_vector() {
        let config = Configuration::new(Point::cell(1, 1), Direction::Stop);
        let next = config.successor(-1.0, 0.0);
        assert_eq!(next.position, Point::cell(0, 1));
        assert_eq!(next.direction, Direction::West);
    }

    #[test]
    fn zero_vector_keeps_facing() {
        let config = Configuration::new(Point::cell(1, 1), Direction::South);
        let next = config.successor(0.0, 0.0);
        assert_eq!(next.position, config.position);
        assert_eq!(next.direction, Direction::South);
    }

    #[test]
    fn fractional_steps_accumulate() {
        let config = Configuration::new(Point::cell(0, 0), Direction::East);
        let next = config.successor(0.5, 0.0).successor(0.5, 0.0);
        assert_eq!(next.position, Point::cell(1, 0));
        assert_eq!(next.direction, Direction::East);
    }
}
