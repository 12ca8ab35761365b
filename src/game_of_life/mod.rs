//! Game of Life core functionality

pub mod engine;
pub mod grid;
pub mod history;
pub mod rules;

pub use engine::Engine;
pub use grid::Grid;
pub use history::{HistoryStore, SavedState};
pub use rules::GameOfLifeRules;
