//! Conway's Game of Life update rule

use super::Grid;
use crate::config::BoundaryMode;
use itertools::iproduct;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation.
    ///
    /// Every cell is judged against `current`; the result is a fresh grid, so
    /// no partially updated state is ever read.
    pub fn evolve(current: &Grid, mode: BoundaryMode) -> Grid {
        let mut next = current.clone();
        next.cells = iproduct!(0..current.rows(), 0..current.cols())
            .map(|(row, col)| {
                let neighbors = current.count_neighbors(row, col, mode);
                Self::should_be_alive(current.get(row, col), neighbors)
            })
            .collect();
        next
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, mode: BoundaryMode, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid, mode);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(cells: Vec<Vec<bool>>) -> Grid {
        Grid::from_cells(cells).unwrap()
    }

    #[test]
    fn test_still_life_block() {
        let grid = bounded(vec![
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ]);
        let evolved = GameOfLifeRules::evolve(&grid, BoundaryMode::Bounded);

        assert_eq!(grid, evolved);
    }

    #[test]
    fn test_oscillator_blinker() {
        let grid = bounded(vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ]);
        let evolved = GameOfLifeRules::evolve(&grid, BoundaryMode::Bounded);

        let expected = bounded(vec![
            vec![false, true, false],
            vec![false, true, false],
            vec![false, true, false],
        ]);
        assert_eq!(evolved, expected);

        let evolved_twice = GameOfLifeRules::evolve_generations(grid.clone(), BoundaryMode::Bounded, 2);
        assert_eq!(evolved_twice, grid);
    }

    #[test]
    fn test_tromino_becomes_block() {
        let mut grid = Grid::new(10, 10).unwrap();
        for (row, col) in [(1, 1), (1, 2), (2, 1)] {
            grid.set(row, col, true).unwrap();
        }

        let evolved = GameOfLifeRules::evolve(&grid, BoundaryMode::Bounded);
        assert_eq!(evolved.living_cells(), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_wrapped_glider_crosses_edge() {
        let mut grid = Grid::new(6, 6).unwrap();
        for (row, col) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            grid.set(row, col, true).unwrap();
        }

        // A glider moves one cell diagonally every four generations and returns
        // to its start after 4 * 6 generations on a 6x6 torus.
        let wrapped = GameOfLifeRules::evolve_generations(grid.clone(), BoundaryMode::Wrapped, 24);
        assert_eq!(wrapped, grid);

        let bounded = GameOfLifeRules::evolve_generations(grid.clone(), BoundaryMode::Bounded, 24);
        assert_ne!(bounded, grid);
    }

    #[test]
    fn test_rule_logic() {
        assert!(GameOfLifeRules::should_be_alive(true, 2));
        assert!(GameOfLifeRules::should_be_alive(true, 3));
        assert!(GameOfLifeRules::should_be_alive(false, 3));
        assert!(!GameOfLifeRules::should_be_alive(true, 1));
        assert!(!GameOfLifeRules::should_be_alive(true, 4));
        assert!(!GameOfLifeRules::should_be_alive(false, 2));
        assert!(!GameOfLifeRules::should_be_alive(false, 4));
    }
}
