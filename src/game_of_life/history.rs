//! Persisted history of named initial states
//!
//! The history is a single compact JSON array. Every append reads the whole
//! file and rewrites it; a missing file is an empty history.

use super::Grid;
use crate::error::{EngineError, EngineResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Snapshot of the live cells of a grid under a user-supplied name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub timestamp: String,
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub live_cells: Vec<(usize, usize)>,
}

impl SavedState {
    /// Capture the live cells of `grid`, stamped with the current time
    pub fn capture(name: &str, grid: &Grid) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            name: name.to_string(),
            rows: grid.rows(),
            cols: grid.cols(),
            live_cells: grid.living_cells(),
        }
    }
}

/// JSON file holding every saved state, oldest first
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file yields an empty history.
    pub fn read_all(&self) -> EngineResult<Vec<SavedState>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.read_error(e))?;

        let records: Vec<SavedState> =
            serde_json::from_str(&content).map_err(|e| self.read_error(e))?;
        debug!(path = %self.path.display(), records = records.len(), "read saved states");
        Ok(records)
    }

    /// Append a record and rewrite the file. Returns the new record's index.
    pub fn append(&self, record: SavedState) -> EngineResult<usize> {
        let mut records = self.read_all()?;
        records.push(record);
        self.write_all(&records)?;
        Ok(records.len() - 1)
    }

    /// Fetch one record by position
    pub fn get(&self, index: usize) -> EngineResult<SavedState> {
        let mut records = self.read_all()?;
        let available = records.len();
        if index >= available {
            return Err(EngineError::NoSavedState { index, available });
        }
        Ok(records.swap_remove(index))
    }

    /// Names of every record, in stored order
    pub fn names(&self) -> EngineResult<Vec<String>> {
        Ok(self.read_all()?.into_iter().map(|record| record.name).collect())
    }

    fn write_all(&self, records: &[SavedState]) -> EngineResult<()> {
        let content = serde_json::to_string(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| EngineError::StorageWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| EngineError::StorageWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), records = records.len(), "wrote saved states");
        Ok(())
    }

    fn read_error(&self, reason: impl ToString) -> EngineError {
        EngineError::StorageRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
