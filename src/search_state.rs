use std::cmp::Ordering;

use crate::{reconstruct_path, Cell, PathingGrid};

/// Per-run search fields of every cell, indexed row-major like the grid they were created for.
/// Unknown distances and estimates are [None] rather than an infinite sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    cols: usize,
    distance: Vec<Option<i32>>,
    priority: Vec<Option<i32>>,
    heuristic: Vec<Option<i32>>,
    visited: Vec<bool>,
    parent: Vec<Option<usize>>,
}

impl SearchState {
    pub fn new(grid: &PathingGrid) -> SearchState {
        let n = grid.len();
        SearchState {
            cols: grid.cols(),
            distance: vec![None; n],
            priority: vec![None; n],
            heuristic: vec![None; n],
            visited: vec![false; n],
            parent: vec![None; n],
        }
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        self.distance.fill(None);
        self.priority.fill(None);
        self.heuristic.fill(None);
        self.visited.fill(false);
        self.parent.fill(None);
    }

    #[inline]
    fn ix(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }
    #[inline]
    fn cell(&self, ix: usize) -> Cell {
        Cell::new(ix / self.cols, ix % self.cols)
    }

    /// Tentative cost from the start.
    pub fn distance(&self, cell: Cell) -> Option<i32> {
        self.distance[self.ix(cell)]
    }
    /// Tentative cost plus heuristic estimate, only set by A*.
    pub fn priority(&self, cell: Cell) -> Option<i32> {
        self.priority[self.ix(cell)]
    }
    pub fn heuristic(&self, cell: Cell) -> Option<i32> {
        self.heuristic[self.ix(cell)]
    }
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.visited[self.ix(cell)]
    }
    pub fn parent(&self, cell: Cell) -> Option<Cell> {
        self.parent[self.ix(cell)].map(|ix| self.cell(ix))
    }
    pub fn has_parent(&self, cell: Cell) -> bool {
        self.parent[self.ix(cell)].is_some()
    }

    pub(crate) fn set_distance(&mut self, cell: Cell, distance: i32) {
        let ix = self.ix(cell);
        self.distance[ix] = Some(distance);
    }
    pub(crate) fn set_priority(&mut self, cell: Cell, priority: i32) {
        let ix = self.ix(cell);
        self.priority[ix] = Some(priority);
    }
    pub(crate) fn set_heuristic(&mut self, cell: Cell, heuristic: i32) {
        let ix = self.ix(cell);
        self.heuristic[ix] = Some(heuristic);
    }
    pub(crate) fn mark_visited(&mut self, cell: Cell) {
        let ix = self.ix(cell);
        self.visited[ix] = true;
    }
    pub(crate) fn set_parent(&mut self, cell: Cell, parent: Cell) {
        let ix = self.ix(cell);
        self.parent[ix] = Some(self.ix(parent));
    }

    /// Number of cells marked visited.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    /// See [reconstruct_path].
    pub fn path_to(&self, finish: Cell) -> Vec<Cell> {
        reconstruct_path(self, finish)
    }
}

/// Entry of the binary-heap frontier. [std::collections::BinaryHeap] is a max-heap, so the
/// ordering is reversed: the smallest priority pops first and ties go to the smallest row, then
/// the smallest column. Stale entries are skipped on extraction instead of being removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FrontierEntry<K> {
    pub priority: K,
    pub cell: Cell,
}

impl<K: Ord> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.cell.cmp(&self.cell),
            s => s,
        }
    }
}
