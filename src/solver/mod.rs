use core::fmt;
use log::debug;

use crate::{Cell, PathingGrid, SearchError, SearchState, C};

pub mod astar;
pub mod bfs;
pub mod bidirectional;
pub mod dfs;
pub mod dijkstra;
pub mod greedy;
pub mod hierarchical;

use astar::AstarSolver;
use bfs::BfsSolver;
use bidirectional::BidirectionalSolver;
use dfs::DfsSolver;
use dijkstra::DijkstraSolver;
use greedy::GreedySolver;
use hierarchical::HierarchicalSolver;

/// Manhattan distance in integer cost units. Never overestimates since every step costs at
/// least [C].
pub fn manhattan_cost(a: Cell, b: Cell) -> i32 {
    a.manhattan_distance(&b) as i32 * C
}

/// Start and finish that [GridSolver::search] has checked against the grid: both in bounds and
/// off walls. Only this crate builds them, so [GridSolver::traverse] never sees unchecked cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoints {
    start: Cell,
    finish: Cell,
}

impl Endpoints {
    pub fn start(&self) -> Cell {
        self.start
    }
    pub fn finish(&self) -> Cell {
        self.finish
    }
}

/// What every strategy reports back.
pub trait SearchOutcome {
    /// Cells in the order they were examined.
    fn visited(&self) -> &[Cell];
    /// Whether the finish was reached.
    fn found(&self) -> bool;
    /// The reconstructed start-to-finish path.
    fn path(&self) -> Vec<Cell>;
}

/// Outcome of the single-frontier strategies: the visitation order plus the per-run fields the
/// search wrote, from which the path is backtracked.
#[derive(Clone, Debug)]
pub struct Traversal {
    pub start: Cell,
    pub finish: Cell,
    pub visited: Vec<Cell>,
    pub state: SearchState,
    /// Number of parent links written while expanding cells.
    pub relaxations: usize,
}

impl Traversal {
    pub(crate) fn new(grid: &PathingGrid, start: Cell, finish: Cell) -> Traversal {
        Traversal {
            start,
            finish,
            visited: Vec::new(),
            state: SearchState::new(grid),
            relaxations: 0,
        }
    }

    /// Cost of the reached finish, [None] if it was not reached or the strategy does not track
    /// distances.
    pub fn cost(&self) -> Option<i32> {
        if self.found() {
            self.state.distance(self.finish)
        } else {
            None
        }
    }
}

impl SearchOutcome for Traversal {
    fn visited(&self) -> &[Cell] {
        &self.visited
    }
    fn found(&self) -> bool {
        // Every strategy stops right after examining the finish
        self.visited.last() == Some(&self.finish)
    }
    /// If the finish was never reached this is `[finish]`, see
    /// [reconstruct_path](crate::reconstruct_path).
    fn path(&self) -> Vec<Cell> {
        self.state.path_to(self.finish)
    }
}

pub trait GridSolver {
    type Outcome: SearchOutcome;

    fn name(&self) -> &'static str;

    /// Runs the search between endpoints validated by [GridSolver::search].
    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> Self::Outcome;

    /// Validates the endpoints and runs the search. Start and finish may coincide, in which case
    /// the single cell is both the visitation order and the path.
    fn search(
        &self,
        grid: &PathingGrid,
        start: Cell,
        finish: Cell,
    ) -> Result<Self::Outcome, SearchError> {
        let endpoints = validate(grid, start, finish)?;
        debug!("{}: searching from {} to {}", self.name(), start, finish);
        let outcome = self.traverse(grid, endpoints);
        debug!(
            "{}: visited {} cells, found: {}",
            self.name(),
            outcome.visited().len(),
            outcome.found()
        );
        Ok(outcome)
    }

    /// Searches between the endpoints stored on the grid.
    fn search_grid(&self, grid: &PathingGrid) -> Result<Self::Outcome, SearchError> {
        self.search(grid, grid.start(), grid.finish())
    }
}

/// Rejects endpoints that are out of bounds or on a wall.
pub(crate) fn validate(
    grid: &PathingGrid,
    start: Cell,
    finish: Cell,
) -> Result<Endpoints, SearchError> {
    grid.check_endpoint(start)?;
    grid.check_endpoint(finish)?;
    Ok(Endpoints { start, finish })
}

/// The available strategies, in menu order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Dijkstra,
    Astar,
    GreedyBestFirst,
    Bidirectional,
    Hierarchical,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Dijkstra,
        Strategy::Astar,
        Strategy::GreedyBestFirst,
        Strategy::Bidirectional,
        Strategy::Hierarchical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => BfsSolver.name(),
            Strategy::Dfs => DfsSolver.name(),
            Strategy::Dijkstra => DijkstraSolver.name(),
            Strategy::Astar => AstarSolver::new().name(),
            Strategy::GreedyBestFirst => GreedySolver.name(),
            Strategy::Bidirectional => BidirectionalSolver.name(),
            Strategy::Hierarchical => HierarchicalSolver::new().name(),
        }
    }

    /// Whether the reported path is guaranteed to have minimal total cost.
    pub fn cost_optimal(self) -> bool {
        matches!(
            self,
            Strategy::Dijkstra | Strategy::Astar | Strategy::Hierarchical
        )
    }

    /// Runs the strategy with default settings.
    pub fn run(
        self,
        grid: &PathingGrid,
        start: Cell,
        finish: Cell,
    ) -> Result<Box<dyn SearchOutcome>, SearchError> {
        fn boxed<O: SearchOutcome + 'static>(outcome: O) -> Box<dyn SearchOutcome> {
            Box::new(outcome)
        }
        Ok(match self {
            Strategy::Bfs => boxed(BfsSolver.search(grid, start, finish)?),
            Strategy::Dfs => boxed(DfsSolver.search(grid, start, finish)?),
            Strategy::Dijkstra => boxed(DijkstraSolver.search(grid, start, finish)?),
            Strategy::Astar => boxed(AstarSolver::new().search(grid, start, finish)?),
            Strategy::GreedyBestFirst => boxed(GreedySolver.search(grid, start, finish)?),
            Strategy::Bidirectional => boxed(BidirectionalSolver.search(grid, start, finish)?),
            Strategy::Hierarchical => {
                boxed(HierarchicalSolver::new().search(grid, start, finish)?)
            }
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_endpoints() {
        let grid = PathingGrid::parse("S#.\n..F").unwrap();
        let wall = Cell::new(0, 1);
        let outside = Cell::new(2, 0);
        for strategy in Strategy::ALL {
            assert_eq!(
                strategy.run(&grid, wall, grid.finish()).err(),
                Some(SearchError::OnWall { cell: wall })
            );
            assert!(matches!(
                strategy.run(&grid, grid.start(), outside),
                Err(SearchError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn strategy_names_are_distinct() {
        let names = Strategy::ALL.map(Strategy::name);
        assert_eq!(names[3], "A*");
        for (i, a) in names.iter().enumerate() {
            assert!(names[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn manhattan_cost_is_in_cost_units() {
        assert_eq!(manhattan_cost(Cell::new(1, 4), Cell::new(3, 1)), 5 * C);
    }
}
