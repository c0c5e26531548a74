use core::fmt;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::SearchError;
use crate::terrain::Terrain;
use crate::{Cell, N_SMALLVEC_SIZE};

/// [PathingGrid] stores the terrain of every cell in row-major order together with the start and
/// finish cells. It also maintains connected components of passable cells using a [UnionFind]
/// structure, which gives a cheap reachability check independent of any search.
///
/// Per-run search data is not stored here, see [SearchState](crate::SearchState), so a grid can be
/// shared between any number of searches.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    terrain: Vec<Terrain>,
    start: usize,
    finish: usize,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// Creates a grid of Normal terrain with the start in the top-left and the finish in the
    /// bottom-right corner.
    pub fn new(rows: usize, cols: usize) -> Result<PathingGrid, SearchError> {
        if rows == 0 || cols == 0 || rows * cols < 2 {
            return Err(SearchError::InvalidDimensions { rows, cols });
        }
        let mut grid = PathingGrid {
            rows,
            cols,
            terrain: vec![Terrain::Normal; rows * cols],
            start: 0,
            finish: rows * cols - 1,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Creates a grid of Normal terrain with the given endpoints.
    pub fn with_endpoints(
        rows: usize,
        cols: usize,
        start: Cell,
        finish: Cell,
    ) -> Result<PathingGrid, SearchError> {
        let mut grid = PathingGrid::new(rows, cols)?;
        grid.check_bounds(start)?;
        grid.check_bounds(finish)?;
        if start == finish {
            return Err(SearchError::SameEndpoints { cell: start });
        }
        grid.start = grid.ix(start);
        grid.finish = grid.ix(finish);
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.terrain.len()
    }
    pub fn is_empty(&self) -> bool {
        self.terrain.is_empty()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
    /// Row-major index of an in-bounds cell.
    #[inline]
    pub fn ix(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.row * self.cols + cell.col
    }
    #[inline]
    pub fn cell(&self, ix: usize) -> Cell {
        Cell::new(ix / self.cols, ix % self.cols)
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(|ix| self.cell(ix))
    }

    pub fn get(&self, cell: Cell) -> Option<Terrain> {
        if self.in_bounds(cell) {
            Some(self.terrain[self.ix(cell)])
        } else {
            None
        }
    }
    /// Terrain of an in-bounds cell.
    ///
    /// # Panics
    /// If `cell` is out of bounds.
    pub fn terrain(&self, cell: Cell) -> Terrain {
        self.terrain[self.ix(cell)]
    }
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.terrain(cell).is_wall()
    }
    /// Integer cost of entering the cell, [None] for walls and out-of-bounds cells.
    pub fn cost(&self, cell: Cell) -> Option<i32> {
        self.get(cell).and_then(Terrain::cost)
    }
    pub fn weight(&self, cell: Cell) -> f64 {
        self.get(cell).map_or(f64::INFINITY, Terrain::weight)
    }

    pub fn start(&self) -> Cell {
        self.cell(self.start)
    }
    pub fn finish(&self) -> Cell {
        self.cell(self.finish)
    }
    pub fn is_start(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.ix(cell) == self.start
    }
    pub fn is_finish(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.ix(cell) == self.finish
    }

    /// Moves the start. The new start must be an in-bounds, non-wall cell that is not the finish.
    pub fn set_start(&mut self, cell: Cell) -> Result<(), SearchError> {
        self.check_endpoint(cell)?;
        if self.is_finish(cell) {
            return Err(SearchError::SameEndpoints { cell });
        }
        self.start = self.ix(cell);
        Ok(())
    }

    /// Moves the finish. The new finish must be an in-bounds, non-wall cell that is not the start.
    pub fn set_finish(&mut self, cell: Cell) -> Result<(), SearchError> {
        self.check_endpoint(cell)?;
        if self.is_start(cell) {
            return Err(SearchError::SameEndpoints { cell });
        }
        self.finish = self.ix(cell);
        Ok(())
    }

    pub(crate) fn check_bounds(&self, cell: Cell) -> Result<(), SearchError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(SearchError::OutOfBounds {
                cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Checks that a search may start or end at `cell`.
    pub fn check_endpoint(&self, cell: Cell) -> Result<(), SearchError> {
        self.check_bounds(cell)?;
        if self.is_wall(cell) {
            warn!("Rejecting endpoint {cell}: cell is a wall");
            return Err(SearchError::OnWall { cell });
        }
        Ok(())
    }

    /// Paints terrain on a cell. Joins newly connected components and flags the components as
    /// dirty if components are (potentially) broken apart into multiple. Endpoints cannot be
    /// walled over.
    pub fn set_terrain(&mut self, cell: Cell, terrain: Terrain) -> Result<(), SearchError> {
        self.check_bounds(cell)?;
        let ix = self.ix(cell);
        if terrain.is_wall() && (ix == self.start || ix == self.finish) {
            return Err(SearchError::OnWall { cell });
        }
        let was_wall = self.terrain[ix].is_wall();
        self.terrain[ix] = terrain;
        if terrain.is_wall() {
            if !was_wall {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighbours(cell) {
                if !self.is_wall(n) {
                    let n_ix = self.ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    /// Flips a cell between Wall and Normal, the way the editor paints walls.
    pub fn toggle_wall(&mut self, cell: Cell) -> Result<(), SearchError> {
        self.check_bounds(cell)?;
        let next = if self.is_wall(cell) {
            Terrain::Normal
        } else {
            Terrain::Wall
        };
        self.set_terrain(cell, next)
    }

    /// In-bounds 4-neighbourhood in up, down, left, right order.
    pub fn neighbours(&self, cell: Cell) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        let mut n = SmallVec::new();
        if cell.row > 0 {
            n.push(Cell::new(cell.row - 1, cell.col));
        }
        if cell.row + 1 < self.rows {
            n.push(Cell::new(cell.row + 1, cell.col));
        }
        if cell.col > 0 {
            n.push(Cell::new(cell.row, cell.col - 1));
        }
        if cell.col + 1 < self.cols {
            n.push(Cell::new(cell.row, cell.col + 1));
        }
        n
    }

    /// In-bounds 4-neighbourhood in clockwise up, right, down, left order.
    pub fn neighbours_clockwise(&self, cell: Cell) -> SmallVec<[Cell; N_SMALLVEC_SIZE]> {
        let mut n = SmallVec::new();
        if cell.row > 0 {
            n.push(Cell::new(cell.row - 1, cell.col));
        }
        if cell.col + 1 < self.cols {
            n.push(Cell::new(cell.row, cell.col + 1));
        }
        if cell.row + 1 < self.rows {
            n.push(Cell::new(cell.row + 1, cell.col));
        }
        if cell.col > 0 {
            n.push(Cell::new(cell.row, cell.col - 1));
        }
        n
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, cell: Cell) -> usize {
        self.components.find(self.ix(cell))
    }

    /// Checks if start and goal are passable and on the same component.
    pub fn reachable(&self, start: Cell, goal: Cell) -> bool {
        self.in_bounds(start)
            && self.in_bounds(goal)
            && !self.is_wall(start)
            && !self.is_wall(goal)
            && self.components.equiv(self.ix(start), self.ix(goal))
    }

    pub fn unreachable(&self, start: Cell, goal: Cell) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable grid neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for ix in 0..self.len() {
            if self.terrain[ix].is_wall() {
                continue;
            }
            let cell = self.cell(ix);
            // Linking down and right covers every edge once
            let down = Cell::new(cell.row + 1, cell.col);
            let right = Cell::new(cell.row, cell.col + 1);
            for n in [down, right] {
                if self.get(n).is_some_and(|t| !t.is_wall()) {
                    let n_ix = self.ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Maps a cell onto the grid produced by [coarsen](Self::coarsen) with the same factor.
    /// [None] if the mapped cell falls outside the coarse grid or the factor is zero.
    pub fn coarse_cell(&self, cell: Cell, factor: usize) -> Option<Cell> {
        if factor == 0 {
            return None;
        }
        let coarse = Cell::new(cell.row / factor, cell.col / factor);
        let rows = self.rows.div_ceil(factor);
        let cols = self.cols.div_ceil(factor);
        (coarse.row < rows && coarse.col < cols).then_some(coarse)
    }

    /// Down-samples the grid by keeping every `factor`-th row and column. Each coarse cell copies
    /// the terrain of the sampled cell; the endpoints map to the coarse cells containing them, so
    /// on a coarse grid start and finish may coincide.
    pub fn coarsen(&self, factor: usize) -> PathingGrid {
        debug_assert!(factor > 0);
        let rows = self.rows.div_ceil(factor);
        let cols = self.cols.div_ceil(factor);
        let terrain = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| self.terrain(Cell::new(r * factor, c * factor)))
            .collect::<Vec<_>>();
        let to_coarse_ix = |ix: usize| {
            let cell = self.cell(ix);
            (cell.row / factor) * cols + cell.col / factor
        };
        let mut coarse = PathingGrid {
            rows,
            cols,
            terrain,
            start: to_coarse_ix(self.start),
            finish: to_coarse_ix(self.finish),
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        coarse.generate_components();
        coarse
    }

    /// Reads a grid from its ASCII form, one line per row. Terrain symbols are those of
    /// [Terrain::symbol]; `S` and `F` mark Normal start and finish cells. Without an `S` the start
    /// is the top-left cell, without an `F` the finish is the bottom-right cell.
    pub fn parse(text: &str) -> Result<PathingGrid, SearchError> {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = PathingGrid::new(rows, cols)?;
        let mut start = None;
        let mut finish = None;
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(SearchError::Parse {
                    line: row + 1,
                    message: format!("expected {cols} cells"),
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::new(row, col);
                let slot = match symbol {
                    'S' => Some(&mut start),
                    'F' => Some(&mut finish),
                    _ => None,
                };
                let terrain = match slot {
                    Some(slot) => {
                        if slot.replace(cell).is_some() {
                            return Err(SearchError::Parse {
                                line: row + 1,
                                message: format!("duplicate '{symbol}'"),
                            });
                        }
                        Terrain::Normal
                    }
                    None => Terrain::from_symbol(symbol).ok_or_else(|| SearchError::Parse {
                        line: row + 1,
                        message: format!("unknown symbol '{symbol}'"),
                    })?,
                };
                let ix = grid.ix(cell);
                grid.terrain[ix] = terrain;
            }
        }
        let start = start.unwrap_or(Cell::new(0, 0));
        let finish = finish.unwrap_or(Cell::new(rows - 1, cols - 1));
        grid.check_endpoint(start)?;
        grid.check_endpoint(finish)?;
        if start == finish {
            return Err(SearchError::SameEndpoints { cell: start });
        }
        grid.start = grid.ix(start);
        grid.finish = grid.ix(finish);
        grid.generate_components();
        Ok(grid)
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols)
                .map(|col| {
                    let ix = row * self.cols + col;
                    if ix == self.start {
                        'S'
                    } else if ix == self.finish {
                        'F'
                    } else {
                        self.terrain[ix].symbol()
                    }
                })
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
