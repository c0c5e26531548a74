use std::collections::BinaryHeap;

use crate::search_state::FrontierEntry;
use crate::solver::{manhattan_cost, Endpoints, GridSolver, Traversal};
use crate::{Cell, PathingGrid, SearchError};

/// Greedy best-first search, ordered by the Manhattan estimate alone. Usually examines few cells
/// but neither the step count nor the cost of its path is minimal.
///
/// The frontier starts with only the start cell. A cell may be inserted once per discovering
/// neighbour before it is first extracted; each discovery overwrites its parent, and extractions
/// after the first are skipped.
pub fn greedy_best_first(
    grid: &PathingGrid,
    start: Cell,
    finish: Cell,
) -> Result<Traversal, SearchError> {
    GreedySolver.search(grid, start, finish)
}

fn best_first(grid: &PathingGrid, start: Cell, finish: Cell) -> Traversal {
    let mut t = Traversal::new(grid, start, finish);
    let mut to_see = BinaryHeap::new();
    let h = manhattan_cost(start, finish);
    t.state.set_heuristic(start, h);
    to_see.push(FrontierEntry {
        priority: h,
        cell: start,
    });
    while let Some(FrontierEntry { cell: current, .. }) = to_see.pop() {
        if grid.is_wall(current) || t.state.is_visited(current) {
            continue;
        }
        t.state.mark_visited(current);
        t.visited.push(current);
        if current == finish {
            break;
        }
        for n in grid.neighbours(current) {
            if t.state.is_visited(n) || grid.is_wall(n) {
                continue;
            }
            let h = manhattan_cost(n, finish);
            t.state.set_heuristic(n, h);
            t.state.set_parent(n, current);
            t.relaxations += 1;
            to_see.push(FrontierEntry { priority: h, cell: n });
        }
    }
    t
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver;

impl GridSolver for GreedySolver {
    type Outcome = Traversal;

    fn name(&self) -> &'static str {
        "Greedy Best-First"
    }

    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> Traversal {
        best_first(grid, endpoints.start(), endpoints.finish())
    }
}
