use std::collections::BinaryHeap;

use crate::search_state::FrontierEntry;
use crate::solver::{Endpoints, GridSolver, Traversal};
use crate::{Cell, PathingGrid, SearchError};

/// Dijkstra's algorithm over terrain costs. The first time the finish is extracted its distance
/// is minimal, as all costs are positive.
pub fn dijkstra(grid: &PathingGrid, start: Cell, finish: Cell) -> Result<Traversal, SearchError> {
    DijkstraSolver.search(grid, start, finish)
}

/// Shared core of Dijkstra and A*. Cells are extracted by distance plus `heuristic` (zero when
/// absent), ties broken by row then column. A cell can be in the heap several times; only its
/// cheapest entry is processed, later ones find it visited.
///
/// Endpoints must be in bounds. A start on a wall examines nothing.
pub(crate) fn relaxed_search(
    grid: &PathingGrid,
    start: Cell,
    finish: Cell,
    heuristic: Option<&dyn Fn(Cell) -> i32>,
) -> Traversal {
    let mut t = Traversal::new(grid, start, finish);
    let mut to_see = BinaryHeap::new();
    t.state.set_distance(start, 0);
    let start_priority = match heuristic {
        Some(h) => {
            let h = h(start);
            t.state.set_heuristic(start, h);
            t.state.set_priority(start, h);
            h
        }
        None => 0,
    };
    to_see.push(FrontierEntry {
        priority: start_priority,
        cell: start,
    });
    // Cells never pushed have no distance, so once the heap drains everything left is unreachable
    while let Some(FrontierEntry { cell: current, .. }) = to_see.pop() {
        if t.state.is_visited(current) || grid.is_wall(current) {
            continue;
        }
        let Some(distance) = t.state.distance(current) else {
            break;
        };
        t.state.mark_visited(current);
        t.visited.push(current);
        if current == finish {
            break;
        }
        for n in grid.neighbours(current) {
            if t.state.is_visited(n) {
                continue;
            }
            let Some(cost) = grid.cost(n) else {
                continue;
            };
            let new_distance = distance + cost;
            if t.state.distance(n).is_some_and(|d| new_distance >= d) {
                continue;
            }
            t.state.set_distance(n, new_distance);
            t.state.set_parent(n, current);
            t.relaxations += 1;
            let priority = match heuristic {
                Some(h) => {
                    let h = h(n);
                    t.state.set_heuristic(n, h);
                    t.state.set_priority(n, new_distance + h);
                    new_distance + h
                }
                None => new_distance,
            };
            to_see.push(FrontierEntry { priority, cell: n });
        }
    }
    t
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Outcome = Traversal;

    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> Traversal {
        relaxed_search(grid, endpoints.start(), endpoints.finish(), None)
    }
}
