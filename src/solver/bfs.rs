use std::collections::VecDeque;

use crate::solver::{Endpoints, GridSolver, Traversal};
use crate::{Cell, PathingGrid, SearchError};

/// Breadth-first search. Ignores terrain weights, so the path has the fewest steps rather than
/// the lowest cost.
pub fn bfs(grid: &PathingGrid, start: Cell, finish: Cell) -> Result<Traversal, SearchError> {
    BfsSolver.search(grid, start, finish)
}

fn breadth_first(grid: &PathingGrid, start: Cell, finish: Cell) -> Traversal {
    let mut t = Traversal::new(grid, start, finish);
    let mut queue = VecDeque::from([start]);
    t.state.mark_visited(start);
    while let Some(current) = queue.pop_front() {
        t.visited.push(current);
        if current == finish {
            break;
        }
        for n in grid.neighbours(current) {
            // Cells are marked on discovery so each one is queued once
            if t.state.is_visited(n) || grid.is_wall(n) {
                continue;
            }
            t.state.mark_visited(n);
            t.state.set_parent(n, current);
            t.relaxations += 1;
            queue.push_back(n);
        }
    }
    t
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    type Outcome = Traversal;

    fn name(&self) -> &'static str {
        "BFS"
    }

    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> Traversal {
        breadth_first(grid, endpoints.start(), endpoints.finish())
    }
}
