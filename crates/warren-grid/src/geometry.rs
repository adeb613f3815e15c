//! Legal-move enumeration against a wall grid.
//!
//! Movement is continuous: entities travel at fractional speeds and may
//! sit between cell centres. The rule that makes this tractable is that
//! direction changes are only allowed at cell centres — an entity that is
//! off-centre must keep going the way it is facing until it arrives at
//! the next centre.

use smallvec::smallvec;
use warren_core::{Direction, Moves, Point};

use crate::grid::Grid;

/// Maximum Manhattan distance from a cell centre at which an entity
/// still counts as centred (and may therefore turn).
pub const CENTER_TOLERANCE: f64 = 0.001;

/// Enumerate the moves available from `position` while facing `facing`.
///
/// Off-centre entities may only continue straight. Centred entities may
/// take any direction (including [`Stop`](Direction::Stop)) whose
/// destination cell is on the board and not a wall. The result preserves
/// the canonical enumeration order of [`Direction::ALL`], which keeps
/// legality deterministic across runs.
///
/// # Examples
///
/// ```
/// use warren_core::{Direction, Point};
/// use warren_grid::{legal_moves, Grid};
///
/// // A 3x3 open room: the centre cell allows every move.
/// let walls = Grid::new(3, 3, false);
/// let moves = legal_moves(Point::cell(1, 1), Direction::Stop, &walls);
/// assert_eq!(moves.len(), 5);
///
/// // Halfway between cells, the only move is to keep going.
/// let moves = legal_moves(Point::new(1.5, 1.0), Direction::East, &walls);
/// assert_eq!(moves.as_slice(), &[Direction::East]);
/// ```
pub fn legal_moves(position: Point, facing: Direction, walls: &Grid) -> Moves {
    if position.offset_from_cell() > CENTER_TOLERANCE {
        return smallvec![facing];
    }

    let (cx, cy) = position.nearest_cell();
    let mut moves = Moves::new();
    for dir in Direction::ALL {
        let (dx, dy) = dir.unit_vector();
        let (nx, ny) = (cx + dx as i32, cy + dy as i32);
        if walls.in_bounds(nx, ny) && !walls.get(nx, ny) {
            moves.push(dir);
        }
    }
    moves
}

/// All in-bounds non-wall cells reachable in one step from `position`'s
/// nearest cell, including that cell itself.
///
/// Used by path-finding helpers in agents; not part of the legality
/// contract.
pub fn legal_neighbors(position: Point, walls: &Grid) -> Vec<(i32, i32)> {
    let (cx, cy) = position.nearest_cell();
    let mut neighbors = Vec::with_capacity(5);
    for dir in Direction::ALL {
        let (dx, dy) = dir.unit_vector();
        let (nx, ny) = (cx + dx as i32, cy + dy as i32);
        if walls.in_bounds(nx, ny) && !walls.get(nx, ny) {
            neighbors.push((nx, ny));
        }
    }
    neighbors
}

/// The position reached by taking one full-speed step from `position`
/// in `direction`. Does not consult walls.
pub fn cell_successor(position: Point, direction: Direction) -> Point {
    let (dx, dy) = direction.unit_vector();
    position.translate(dx, dy)
}
