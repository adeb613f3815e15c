//! Board grids, maze layouts, and movement geometry for Warren.
//!
//! This crate owns the static side of the simulation: the bit-packable
//! boolean [`Grid`] used for walls and food, the [`Layout`] parser that
//! turns maze text into grids and start positions, and the geometry layer
//! that enumerates legal moves against a wall grid.
//!
//! Coordinate misuse (out-of-range cells, malformed pack words) is a
//! programmer error and panics; malformed layout *text* is input data and
//! is reported as a recoverable [`LayoutError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;

pub use error::LayoutError;
pub use geometry::{cell_successor, legal_moves, legal_neighbors, CENTER_TOLERANCE};
pub use grid::Grid;
pub use layout::{Layout, LayoutCache};
