//! Error types for the simulation engine

use std::path::PathBuf;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("failed to write saved states to {}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read saved states from {}: {reason}", .path.display())]
    StorageRead { path: PathBuf, reason: String },

    #[error("failed to encode saved states")]
    Serialize(#[from] serde_json::Error),

    #[error("no saved state at index {index} ({available} saved)")]
    NoSavedState { index: usize, available: usize },
}

impl EngineError {
    /// Whether the caller can carry on with the current grid untouched
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::NoSavedState { .. })
    }
}
