use crate::solver::dijkstra::relaxed_search;
use crate::solver::{manhattan_cost, Endpoints, GridSolver, Traversal};
use crate::{Cell, PathingGrid, SearchError};

/// A* with the Manhattan heuristic. With the default factor of 1.0 the heuristic is admissible
/// and the path is cost optimal; larger factors trade optimality for fewer visited cells.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    /// Just the Manhattan cost times the heuristic factor.
    pub fn heuristic(&self, p1: Cell, p2: Cell) -> i32 {
        (manhattan_cost(p1, p2) as f32 * self.heuristic_factor) as i32
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

pub fn astar(grid: &PathingGrid, start: Cell, finish: Cell) -> Result<Traversal, SearchError> {
    AstarSolver::new().search(grid, start, finish)
}

impl GridSolver for AstarSolver {
    type Outcome = Traversal;

    fn name(&self) -> &'static str {
        "A*"
    }

    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> Traversal {
        let finish = endpoints.finish();
        let h = |cell: Cell| self.heuristic(cell, finish);
        relaxed_search(grid, endpoints.start(), finish, Some(&h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::dijkstra::dijkstra;
    use crate::solver::SearchOutcome;
    use crate::C;

    /// Asserts that the optimal 5 cell solution is found around the obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S..|
        // |.#.|
        // |..F|
        let grid = PathingGrid::parse("S..\n.#.\n..F").unwrap();
        let t = AstarSolver::new().search_grid(&grid).unwrap();
        assert_eq!(t.path().len(), 5);
        assert_eq!(t.cost(), Some(4 * C));
    }

    #[test]
    fn matches_dijkstra_cost_with_fewer_visits() {
        let grid = PathingGrid::parse(
            "S..f~~....\n\
             .#.f~~.#..\n\
             .#..^^.#..\n\
             .#####.#..\n\
             ....::...F",
        )
        .unwrap();
        let (start, finish) = (grid.start(), grid.finish());
        let d = dijkstra(&grid, start, finish).unwrap();
        let a = astar(&grid, start, finish).unwrap();
        assert!(a.found());
        assert_eq!(a.cost(), d.cost());
        assert!(a.visited.len() <= d.visited.len());
    }

    #[test]
    fn zero_factor_degrades_to_dijkstra() {
        let grid = PathingGrid::parse("S.~.\n.f#.\n^..F").unwrap();
        let solver = AstarSolver {
            heuristic_factor: 0.0,
        };
        let a = solver.search_grid(&grid).unwrap();
        let d = dijkstra(&grid, grid.start(), grid.finish()).unwrap();
        assert_eq!(a.visited, d.visited);
    }

    #[test]
    fn records_priority_and_heuristic() {
        let grid = PathingGrid::parse("S..\n...\n..F").unwrap();
        let t = AstarSolver::new().search_grid(&grid).unwrap();
        let finish = grid.finish();
        assert_eq!(t.state.heuristic(finish), Some(0));
        assert_eq!(t.state.priority(finish), t.state.distance(finish));
        assert_eq!(t.state.heuristic(grid.start()), Some(4 * C));
        assert_eq!(t.visited.last(), Some(&finish));
    }
}
