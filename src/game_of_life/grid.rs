//! Grid representation and neighbor counting

use crate::config::BoundaryMode;
use crate::error::{EngineError, EngineResult};
use itertools::iproduct;

/// Row and column offsets of the eight Moore neighbors
fn neighbor_offsets() -> impl Iterator<Item = (isize, isize)> {
    iproduct!(-1isize..=1, -1isize..=1).filter(|&offset| offset != (0, 0))
}

/// Fixed-size rectangle of live/dead cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    pub(crate) cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(rows: usize, cols: usize) -> EngineResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> EngineResult<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 || cells.iter().any(|row| row.len() != cols) {
            return Err(EngineError::InvalidDimensions { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get cell value at coordinates; anything outside the grid reads as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.contains(row, col) && self.cells[self.index(row, col)]
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> EngineResult<()> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> EngineResult<bool> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    fn check_bounds(&self, row: usize, col: usize) -> EngineResult<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Count living neighbors, ignoring positions beyond the edges
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        debug_assert!(self.contains(row, col), "({row}, {col}) out of bounds");

        let mut count = 0;
        for (dr, dc) in neighbor_offsets() {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if r < 0 || c < 0 {
                continue;
            }
            if self.get(r as usize, c as usize) {
                count += 1;
            }
        }
        count
    }

    /// Count living neighbors with edges wrapping to the opposite side.
    ///
    /// All eight offsets are always visited. On a grid with a single row or
    /// column several offsets land on the same cell (or the cell itself) and
    /// each one is counted.
    pub fn count_live_neighbors_wrapped(&self, row: usize, col: usize) -> u8 {
        debug_assert!(self.contains(row, col), "({row}, {col}) out of bounds");

        let rows = self.rows as isize;
        let cols = self.cols as isize;
        let mut count = 0;
        for (dr, dc) in neighbor_offsets() {
            let r = (row as isize + dr).rem_euclid(rows) as usize;
            let c = (col as isize + dc).rem_euclid(cols) as usize;
            if self.cells[self.index(r, c)] {
                count += 1;
            }
        }
        count
    }

    /// Count living neighbors under the given edge policy
    pub fn count_neighbors(&self, row: usize, col: usize, mode: BoundaryMode) -> u8 {
        match mode {
            BoundaryMode::Bounded => self.count_live_neighbors(row, col),
            BoundaryMode::Wrapped => self.count_live_neighbors_wrapped(row, col),
        }
    }

    /// Coordinates of every living cell, in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(row, col)| self.cells[self.index(row, col)])
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rows: usize, cols: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(row, col) in live {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(EngineError::InvalidDimensions { rows: 0, cols: 5 })
        ));
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::from_cells(vec![vec![true, false], vec![true]]).is_err());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut grid = grid_with(4, 4, &[(2, 3)]);
        let before = grid.clone();

        assert!(grid.toggle(1, 1).unwrap());
        assert!(!grid.toggle(1, 1).unwrap());
        assert_eq!(grid, before);

        assert!(matches!(
            grid.toggle(4, 0),
            Err(EngineError::OutOfBounds { row: 4, col: 0, .. })
        ));
    }

    #[test]
    fn test_bounded_neighbor_counting() {
        let grid = grid_with(10, 10, &[(1, 1), (1, 2), (2, 1)]);
        assert_eq!(grid.count_live_neighbors(1, 1), 2);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
    }

    #[test]
    fn test_bounded_counts_only_in_range_neighbors() {
        let full = Grid::from_cells(vec![vec![true; 3]; 3]).unwrap();
        assert_eq!(full.count_live_neighbors(1, 1), 8);
        assert_eq!(full.count_live_neighbors(0, 1), 5);
        assert_eq!(full.count_live_neighbors(0, 0), 3);
        assert_eq!(full.count_live_neighbors(2, 2), 3);
    }

    #[test]
    fn test_wrapped_neighbor_counting() {
        let grid = grid_with(10, 10, &[(0, 0), (0, 9), (9, 0)]);
        assert_eq!(grid.count_live_neighbors_wrapped(0, 0), 2);
        assert_eq!(grid.count_live_neighbors_wrapped(9, 9), 3);
    }

    #[test]
    fn test_wrapped_always_visits_eight_offsets() {
        let full = Grid::from_cells(vec![vec![true; 3]; 3]).unwrap();
        for (row, col) in iproduct!(0..3, 0..3) {
            assert_eq!(full.count_live_neighbors_wrapped(row, col), 8);
        }
    }

    #[test]
    fn test_wrapped_single_row_counts_aliases() {
        // (0, 0)'s offsets all wrap onto row 0; (0, 1) is hit six times and
        // the cell itself twice.
        let grid = grid_with(1, 2, &[(0, 0), (0, 1)]);
        assert_eq!(grid.count_live_neighbors_wrapped(0, 0), 8);

        let lonely = grid_with(1, 1, &[(0, 0)]);
        assert_eq!(lonely.count_live_neighbors_wrapped(0, 0), 8);
    }

    #[test]
    fn test_living_cells_row_major() {
        let grid = grid_with(3, 3, &[(2, 0), (0, 2), (1, 1), (0, 0)]);
        assert_eq!(grid.living_cells(), vec![(0, 0), (0, 2), (1, 1), (2, 0)]);
        assert_eq!(grid.living_count(), 4);
    }

    #[test]
    fn test_clear() {
        let mut grid = grid_with(2, 5, &[(0, 0), (1, 4)]);
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!((grid.rows(), grid.cols()), (2, 5));
    }
}
