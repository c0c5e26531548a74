use std::fmt;

use crate::Cell;

/// Rejected input. Unreachable goals are not errors, they are reported through
/// [SearchOutcome::found](crate::solver::SearchOutcome::found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The cell lies outside a `rows` x `cols` grid.
    OutOfBounds { cell: Cell, rows: usize, cols: usize },
    /// Start or finish placed on a wall.
    OnWall { cell: Cell },
    /// Start and finish would share one cell.
    SameEndpoints { cell: Cell },
    /// A grid needs at least one row and one column.
    InvalidDimensions { rows: usize, cols: usize },
    /// Malformed ASCII grid.
    Parse { line: usize, message: String },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::OutOfBounds { cell, rows, cols } => {
                write!(f, "{cell} is outside the {rows}x{cols} grid")
            }
            SearchError::OnWall { cell } => write!(f, "{cell} is a wall"),
            SearchError::SameEndpoints { cell } => {
                write!(f, "start and finish both placed on {cell}")
            }
            SearchError::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions {rows}x{cols}")
            }
            SearchError::Parse { line, message } => write!(f, "line {line}: {message}"),
        }
    }
}

impl std::error::Error for SearchError {}
