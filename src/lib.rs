//! # terrain_pathfinding
//!
//! Interchangeable search strategies over a 2-D grid of weighted terrain. Every strategy
//! reports the exact order in which it examined cells and leaves behind parent links from
//! which a start-to-finish path can be reconstructed:
//!
//! - [BFS](solver::bfs) and [DFS](solver::dfs), which ignore terrain weights,
//! - [Dijkstra](solver::dijkstra) and [A*](solver::astar), which are cost optimal,
//! - [greedy best-first](solver::greedy), guided only by the Manhattan estimate,
//! - [bidirectional](solver::bidirectional) breadth-first search from both ends,
//! - [hierarchical](solver::hierarchical) search refining a down-sampled coarse route.
//!
//! Movement is 4-directional. Costs are accumulated as integers where a Normal cell costs
//! [C] units, so fractional weights such as Sand (1.5) stay exact.
pub mod config;
pub mod error;
pub mod metrics;
pub mod pathing_grid;
pub mod search_state;
pub mod solver;
pub mod terrain;

use core::fmt;
use serde::{Deserialize, Serialize};

pub use config::GridConfig;
pub use error::SearchError;
pub use metrics::{MetricsLog, RunMetrics};
pub use pathing_grid::PathingGrid;
pub use search_state::SearchState;
pub use solver::{Endpoints, GridSolver, SearchOutcome, Strategy, Traversal};
pub use terrain::Terrain;

/// Integer cost of entering a Normal cell, i.e. of one unit-weight step.
pub const C: i32 = 2;
/// Inline capacity of neighbour lists.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Converts the integer cost to the floating point weight scale where a Normal step costs 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}

/// Position of a cell, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the two cells share an edge.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Walks parent links from `end` until a node without parent is met and returns the chain in
/// forward order, ending with `end`.
pub fn reverse_path<N, F>(end: N, mut parent: F) -> Vec<N>
where
    N: Copy,
    F: FnMut(N) -> Option<N>,
{
    let mut path: Vec<N> = std::iter::successors(Some(end), |&n| parent(n)).collect();
    path.reverse();
    path
}

/// Reconstructs the path ending in `finish` from the parent links a traversal left in `state`.
///
/// If `finish` was never reached it has no parent and the result is just `[finish]`; compare the
/// first cell against the true start to tell "no path" apart from a trivial one.
pub fn reconstruct_path(state: &SearchState, finish: Cell) -> Vec<Cell> {
    reverse_path(finish, |cell| state.parent(cell))
}

/// Sum of the integer costs of every cell entered after the first one, or [None] if the path
/// crosses a wall or leaves the grid.
pub fn path_cost(grid: &PathingGrid, path: &[Cell]) -> Option<i32> {
    path.iter()
        .skip(1)
        .map(|&cell| grid.cost(cell))
        .sum::<Option<i32>>()
}

pub fn path_cost_float(grid: &PathingGrid, path: &[Cell]) -> Option<f64> {
    path_cost(grid, path).map(convert_cost_to_unit_cost_float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_path_follows_parents() {
        // 3 -> 2 -> 0
        let parents = [None, None, Some(0), Some(2)];
        let path = reverse_path(3usize, |n| parents[n]);
        assert_eq!(path, vec![0, 2, 3]);
    }

    #[test]
    fn unreached_finish_reconstructs_to_itself() {
        let grid = PathingGrid::new(3, 3).unwrap();
        let state = SearchState::new(&grid);
        let finish = Cell::new(2, 2);
        assert_eq!(reconstruct_path(&state, finish), vec![finish]);
    }

    #[test]
    fn path_cost_skips_first_cell() {
        let grid = PathingGrid::parse(".f~\n...").unwrap();
        let path = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)];
        assert_eq!(path_cost(&grid, &path), Some(5 * C));
        assert_eq!(path_cost_float(&grid, &path), Some(5.0));
        assert_eq!(path_cost(&grid, &path[..1]), Some(0));
    }
}
