//! Error type for maze layout parsing.

use std::error::Error;
use std::fmt;

/// Errors from parsing maze layout text.
///
/// Layout text is external input, so malformed text is a recoverable
/// error — unlike grid coordinate misuse, which panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout text contains no rows.
    Empty,
    /// A row's length differs from the first row's.
    RaggedRow {
        /// Zero-based index of the offending row in the input text.
        row: usize,
    },
    /// The layout names no player start (`P`).
    NoPlayerStart,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout text is empty"),
            Self::RaggedRow { row } => {
                write!(f, "row {row} does not match the layout width")
            }
            Self::NoPlayerStart => write!(f, "layout has no player start ('P')"),
        }
    }
}

impl Error for LayoutError {}
