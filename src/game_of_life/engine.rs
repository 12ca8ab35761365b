//! Simulation engine: grid state, stepping and saved initial states

use super::history::{HistoryStore, SavedState};
use super::{GameOfLifeRules, Grid};
use crate::config::{BoundaryMode, Settings};
use crate::error::EngineResult;
use tracing::{debug, info, warn};

/// Default location of the saved-state history
pub const DEFAULT_HISTORY_FILE: &str = "saved_states.json";

/// Owns one grid and advances it under a fixed boundary mode
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    boundary_mode: BoundaryMode,
    history: HistoryStore,
}

impl Engine {
    /// Create an engine with an all-dead `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize, boundary_mode: BoundaryMode) -> EngineResult<Self> {
        Ok(Self {
            grid: Grid::new(rows, cols)?,
            boundary_mode,
            history: HistoryStore::new(DEFAULT_HISTORY_FILE),
        })
    }

    /// Create an engine sized and stored as configured
    pub fn from_settings(settings: &Settings) -> EngineResult<Self> {
        let (rows, cols) = settings.grid_dimensions();
        Ok(Self::new(rows, cols, settings.grid.boundary_mode)?
            .with_history(HistoryStore::new(&settings.storage.history_file)))
    }

    /// Use a different saved-state history
    pub fn with_history(mut self, history: HistoryStore) -> Self {
        self.history = history;
        self
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary_mode
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Read-only view of the current generation
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.grid.get(row, col)
    }

    /// Flip one cell between alive and dead
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> EngineResult<()> {
        let alive = self.grid.toggle(row, col)?;
        debug!(row, col, alive, "toggled cell");
        Ok(())
    }

    /// Kill every cell
    pub fn reset(&mut self) {
        self.grid.clear();
        debug!("grid reset");
    }

    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        self.grid.count_live_neighbors(row, col)
    }

    pub fn count_live_neighbors_wrapped(&self, row: usize, col: usize) -> u8 {
        self.grid.count_live_neighbors_wrapped(row, col)
    }

    /// Advance one generation
    pub fn step(&mut self) {
        self.grid = GameOfLifeRules::evolve(&self.grid, self.boundary_mode);
    }

    /// Append the current live cells to the history under `name`.
    /// Returns the index the state was stored at.
    pub fn save_initial_state(&self, name: &str) -> EngineResult<usize> {
        let record = SavedState::capture(name, &self.grid);
        let live = record.live_cells.len();
        let index = self.history.append(record)?;
        info!(name, index, live, "saved initial state");
        Ok(index)
    }

    /// Replace the grid with the saved state at `index`.
    ///
    /// The grid keeps its current dimensions; stored cells that fall outside
    /// them are dropped. On any error the grid is left untouched.
    pub fn load_initial_state(&mut self, index: usize) -> EngineResult<()> {
        let record = self.history.get(index)?;

        let mut grid = Grid::new(self.rows(), self.cols())?;
        let mut skipped = 0;
        for &(row, col) in &record.live_cells {
            if grid.set(row, col, true).is_err() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(
                name = %record.name,
                skipped,
                saved_rows = record.rows,
                saved_cols = record.cols,
                "saved cells outside the current grid were dropped"
            );
        }

        self.grid = grid;
        info!(name = %record.name, index, "loaded initial state");
        Ok(())
    }

    /// Names of all saved states, oldest first. An unreadable history reads as empty.
    pub fn get_saved_state_names(&self) -> Vec<String> {
        self.history.names().unwrap_or_else(|e| {
            warn!(error = %e, "could not list saved states");
            Vec::new()
        })
    }
}
