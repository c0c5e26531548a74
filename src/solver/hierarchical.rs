use itertools::Itertools;
use log::info;

use crate::solver::dijkstra::relaxed_search;
use crate::solver::{Endpoints, GridSolver, SearchOutcome, Traversal};
use crate::{Cell, PathingGrid, SearchError};

/// Outcome of a hierarchical search.
#[derive(Clone, Debug)]
pub struct HierarchicalTraversal {
    pub start: Cell,
    pub finish: Cell,
    /// Coarse cells (in fine coordinates) followed by the cells of every refined segment. The
    /// same cell can appear more than once.
    pub visited: Vec<Cell>,
    /// Route through the coarse grid, in fine coordinates. Empty after a fallback or when the
    /// coarse search did not reach the coarse finish.
    pub waypoints: Vec<Cell>,
    /// Whether the coarse mapping failed and a plain Dijkstra run was reported instead.
    pub fell_back: bool,
    /// Dijkstra run between the true endpoints, the source of the reported path.
    pub refined: Traversal,
}

impl SearchOutcome for HierarchicalTraversal {
    fn visited(&self) -> &[Cell] {
        &self.visited
    }
    fn found(&self) -> bool {
        self.refined.found()
    }
    fn path(&self) -> Vec<Cell> {
        self.refined.path()
    }
}

/// Coarse-to-fine search. Dijkstra first runs on a grid keeping every `factor`-th row and column
/// to pick waypoints, then on the full grid between consecutive waypoints. The visitation order
/// is therefore approximate, but the reported path always comes from a full-resolution Dijkstra
/// run between the true endpoints and is cost optimal.
#[derive(Clone, Debug)]
pub struct HierarchicalSolver {
    pub factor: usize,
}

impl HierarchicalSolver {
    pub fn new() -> HierarchicalSolver {
        HierarchicalSolver { factor: 4 }
    }
}

impl Default for HierarchicalSolver {
    fn default() -> HierarchicalSolver {
        HierarchicalSolver::new()
    }
}

pub fn hierarchical(
    grid: &PathingGrid,
    start: Cell,
    finish: Cell,
) -> Result<HierarchicalTraversal, SearchError> {
    HierarchicalSolver::new().search(grid, start, finish)
}

impl GridSolver for HierarchicalSolver {
    type Outcome = HierarchicalTraversal;

    fn name(&self) -> &'static str {
        "Hierarchical"
    }

    fn traverse(&self, grid: &PathingGrid, endpoints: Endpoints) -> HierarchicalTraversal {
        let (start, finish) = (endpoints.start(), endpoints.finish());
        let factor = self.factor;
        let (Some(coarse_start), Some(coarse_finish)) = (
            grid.coarse_cell(start, factor),
            grid.coarse_cell(finish, factor),
        ) else {
            info!("Endpoints do not map onto a coarse grid with factor {factor}: searching the full grid");
            let refined = relaxed_search(grid, start, finish, None);
            return HierarchicalTraversal {
                start,
                finish,
                visited: refined.visited.clone(),
                waypoints: Vec::new(),
                fell_back: true,
                refined,
            };
        };

        let coarse = grid.coarsen(factor);
        let to_fine = |c: &Cell| Cell::new(c.row * factor, c.col * factor);
        // Sampled coarse cells can be walls even where the fine endpoints are not
        let coarse_run = relaxed_search(&coarse, coarse_start, coarse_finish, None);
        let mut visited = coarse_run.visited.iter().map(to_fine).collect::<Vec<_>>();
        let waypoints = if coarse_run.found() {
            coarse_run.path().iter().map(to_fine).collect::<Vec<_>>()
        } else {
            Vec::new()
        };
        for (a, b) in waypoints.iter().tuple_windows() {
            visited.extend(relaxed_search(grid, *a, *b, None).visited);
        }

        HierarchicalTraversal {
            start,
            finish,
            visited,
            waypoints,
            fell_back: false,
            refined: relaxed_search(grid, start, finish, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::dijkstra::dijkstra;

    fn open_grid(rows: usize, cols: usize, start: Cell, finish: Cell) -> PathingGrid {
        PathingGrid::with_endpoints(rows, cols, start, finish).unwrap()
    }

    #[test]
    fn coarse_cells_come_first() {
        let grid = open_grid(9, 9, Cell::new(0, 0), Cell::new(8, 8));
        let t = HierarchicalSolver::new().search_grid(&grid).unwrap();
        assert!(!t.fell_back);
        assert_eq!(t.waypoints.first(), Some(&Cell::new(0, 0)));
        assert_eq!(t.waypoints.last(), Some(&Cell::new(8, 8)));
        // Coarse grid is 3x3; the coarse search reaches its corner after examining all 9 cells
        assert!(t.visited[..9]
            .iter()
            .all(|c| c.row % 4 == 0 && c.col % 4 == 0));
        assert!(t.found());
        assert_eq!(t.path().len(), 17);
    }

    /// The path matches plain Dijkstra even when the coarse grid sees walls that are not there.
    #[test]
    fn path_matches_dijkstra() {
        let mut grid = open_grid(12, 12, Cell::new(1, 1), Cell::new(10, 10));
        for row in 0..11 {
            grid.set_terrain(Cell::new(row, 4), crate::Terrain::Wall).unwrap();
        }
        grid.set_terrain(Cell::new(6, 6), crate::Terrain::Mountain).unwrap();
        grid.generate_components();
        let t = HierarchicalSolver::new().search_grid(&grid).unwrap();
        let d = dijkstra(&grid, grid.start(), grid.finish()).unwrap();
        assert_eq!(t.path(), d.path());
        assert!(t.found());
    }

    #[test]
    fn zero_factor_falls_back() {
        let grid = open_grid(5, 5, Cell::new(0, 0), Cell::new(4, 4));
        let t = HierarchicalSolver { factor: 0 }.search_grid(&grid).unwrap();
        assert!(t.fell_back);
        let d = dijkstra(&grid, grid.start(), grid.finish()).unwrap();
        assert_eq!(t.visited, d.visited);
        assert_eq!(t.path().len(), 9);
    }

    /// A coarse finish sampled from a wall cannot be reached, so there is no route to refine.
    #[test]
    fn unreached_coarse_finish_leaves_no_waypoints() {
        let mut grid = open_grid(8, 8, Cell::new(1, 1), Cell::new(6, 6));
        grid.set_terrain(Cell::new(4, 4), crate::Terrain::Wall).unwrap();
        grid.generate_components();
        let t = HierarchicalSolver::new().search_grid(&grid).unwrap();
        assert!(!t.fell_back);
        assert!(t.waypoints.is_empty());
        assert!(!t.visited.is_empty());
        assert!(t.found());
        assert_eq!(t.path().len(), 11);
    }

    #[test]
    fn enclosed_finish_is_not_found() {
        let grid = PathingGrid::parse("S....\n.....\n...#.\n..#F#\n...#.").unwrap();
        let t = HierarchicalSolver::new().search_grid(&grid).unwrap();
        assert!(!t.found());
        assert!(!t.visited.contains(&grid.finish()));
    }
}
