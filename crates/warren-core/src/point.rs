//! Continuous board positions.

use std::fmt;

/// A continuous position on the board.
///
/// Entities move at fractional speeds, so positions are not restricted to
/// integer cells; an adversary travelling at half speed sits on a cell
/// edge every other turn. [`nearest_cell()`](Point::nearest_cell) snaps a
/// position back to the integer lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate. Increases to the east.
    pub x: f64,
    /// Vertical coordinate. Increases to the north.
    pub y: f64,
}

impl Point {
    /// Construct a point from continuous coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Construct a point centred on an integer cell.
    pub fn cell(x: i32, y: i32) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }

    /// The point translated by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan_distance(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The nearest integer cell, rounding halves up on each axis.
    pub fn nearest_cell(self) -> (i32, i32) {
        ((self.x + 0.5).floor() as i32, (self.y + 0.5).floor() as i32)
    }

    /// Manhattan distance from this point to its nearest cell centre.
    ///
    /// Zero exactly when the point sits on the integer lattice; the
    /// geometry layer compares this against its centring tolerance to
    /// decide whether an entity may turn.
    pub fn offset_from_cell(self) -> f64 {
        let (cx, cy) = self.nearest_cell();
        self.manhattan_distance(Point::cell(cx, cy))
    }

    /// Both coordinates as raw bit patterns, for structural hashing.
    ///
    /// `f64::to_bits` distinguishes `0.0` from `-0.0`; transitions only
    /// ever produce coordinates by adding direction vectors to layout
    /// positions, which never yields a negative zero.
    pub fn to_bits(self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::cell(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
