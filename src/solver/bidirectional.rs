use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::collections::VecDeque;

use crate::solver::{Endpoints, GridSolver, SearchOutcome};
use crate::{reverse_path, Cell, PathingGrid, SearchError};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent links of one frontier, in discovery order. A key is present exactly when the frontier
/// has discovered the cell; its root maps to [None].
pub type ParentMap = FxIndexMap<Cell, Option<Cell>>;

/// Outcome of a bidirectional search.
#[derive(Clone, Debug)]
pub struct BidirectionalTraversal {
    pub start: Cell,
    pub finish: Cell,
    pub visited: Vec<Cell>,
    /// First cell known to both frontiers.
    pub meeting_point: Option<Cell>,
    pub forward_parents: ParentMap,
    pub backward_parents: ParentMap,
}

impl SearchOutcome for BidirectionalTraversal {
    fn visited(&self) -> &[Cell] {
        &self.visited
    }
    fn found(&self) -> bool {
        self.meeting_point.is_some()
    }
    /// Start to meeting point along the forward links, then on to the finish along the backward
    /// links. Empty if the frontiers never met.
    fn path(&self) -> Vec<Cell> {
        let Some(meeting_point) = self.meeting_point else {
            return Vec::new();
        };
        let mut path = reverse_path(meeting_point, |c| {
            self.forward_parents.get(&c).copied().flatten()
        });
        let first = self.backward_parents.get(&meeting_point).copied().flatten();
        path.extend(std::iter::successors(first, |c| {
            self.backward_parents.get(c).copied().flatten()
        }));
        path
    }
}

/// One breadth-first frontier growing from `root`.
struct Frontier {
    queue: VecDeque<Cell>,
    parents: ParentMap,
}

impl Frontier {
    fn new(root: Cell) -> Frontier {
        let mut parents = ParentMap::default();
        parents.insert(root, None);
        Frontier {
            queue: VecDeque::from([root]),
            parents,
        }
    }

    /// Takes one cell off the queue and expands it. Returns the meeting point if this frontier
    /// touches a cell the `other` frontier has already discovered.
    fn step(
        &mut self,
        grid: &PathingGrid,
        other: &ParentMap,
        visited: &mut Vec<Cell>,
    ) -> Option<Cell> {
        let current = self.queue.pop_front()?;
        visited.push(current);
        if other.contains_key(&current) {
            return Some(current);
        }
        for n in grid.neighbours(current) {
            if grid.is_wall(n) || self.parents.contains_key(&n) {
                continue;
            }
            self.parents.insert(n, Some(current));
            self.queue.push_back(n);
            if other.contains_key(&n) {
                visited.push(n);
                return Some(n);
            }
        }
        None
    }
}

/// Breadth-first search from both ends at once. Each round expands one cell of the forward
/// frontier and then one cell of the backward frontier; the search stops as soon as either
/// touches a cell the other has discovered.
pub fn bidirectional(
    grid: &PathingGrid,
    start: Cell,
    finish: Cell,
) -> Result<BidirectionalTraversal, SearchError> {
    BidirectionalSolver.search(grid, start, finish)
}

fn meet_in_the_middle(grid: &PathingGrid, start: Cell, finish: Cell) -> BidirectionalTraversal {
    let mut forward = Frontier::new(start);
    let mut backward = Frontier::new(finish);
    let mut visited = Vec::new();
    let mut meeting_point = None;
    while !forward.queue.is_empty() || !backward.queue.is_empty() {
        meeting_point = forward.step(grid, &backward.parents, &mut visited);
        if meeting_point.is_some() {
            break;
        }
        meeting_point = backward.step(grid, &forward.parents, &mut visited);
        if meeting_point.is_some() {
            break;
        }
    }
    BidirectionalTraversal {
        start,
        finish,
        visited,
        meeting_point,
        forward_parents: forward.parents,
        backward_parents: backward.parents,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BidirectionalSolver;

impl GridSolver for BidirectionalSolver {
    type Outcome = BidirectionalTraversal;

    fn name(&self) -> &'static str {
        "Bidirectional"
    }

    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> BidirectionalTraversal {
        meet_in_the_middle(grid, endpoints.start(), endpoints.finish())
    }
}
