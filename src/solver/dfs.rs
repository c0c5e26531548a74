use crate::solver::{Endpoints, GridSolver, Traversal};
use crate::{Cell, PathingGrid, SearchError};

/// Depth-first search with an explicit stack. Neighbours are pushed in clockwise order starting
/// upwards, so the last one pushed (left) is explored first.
///
/// A cell can sit on the stack several times; only its first pop is processed, and it keeps the
/// parent it was first discovered from.
pub fn dfs(grid: &PathingGrid, start: Cell, finish: Cell) -> Result<Traversal, SearchError> {
    DfsSolver.search(grid, start, finish)
}

fn depth_first(grid: &PathingGrid, start: Cell, finish: Cell) -> Traversal {
    let mut t = Traversal::new(grid, start, finish);
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        if t.state.is_visited(current) || grid.is_wall(current) {
            continue;
        }
        t.state.mark_visited(current);
        t.visited.push(current);
        if current == finish {
            break;
        }
        for n in grid.neighbours_clockwise(current) {
            if t.state.is_visited(n) || grid.is_wall(n) || t.state.has_parent(n) {
                continue;
            }
            t.state.set_parent(n, current);
            t.relaxations += 1;
            stack.push(n);
        }
    }
    t
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    type Outcome = Traversal;

    fn name(&self) -> &'static str {
        "DFS"
    }

    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> Traversal {
        depth_first(grid, endpoints.start(), endpoints.finish())
    }
}
