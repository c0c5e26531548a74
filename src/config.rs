use serde::{Deserialize, Serialize};

use crate::{Cell, PathingGrid, SearchError};

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 50;
pub const DEFAULT_START: Cell = Cell::new(10, 15);
pub const DEFAULT_FINISH: Cell = Cell::new(10, 35);

/// Dimensions and endpoints of a fresh grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: Cell,
    pub finish: Cell,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start: DEFAULT_START,
            finish: DEFAULT_FINISH,
        }
    }
}

impl GridConfig {
    /// Builds an all-Normal grid, rejecting endpoints that are out of bounds or shared.
    pub fn build(&self) -> Result<PathingGrid, SearchError> {
        PathingGrid::with_endpoints(self.rows, self.cols, self.start, self.finish)
    }
}
