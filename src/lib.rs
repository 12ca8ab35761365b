//! Conway's Game of Life simulator
//!
//! A fixed-size grid with bounded or wrapped edges, interactive editing and
//! a JSON history of named initial states.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod session;
pub mod utils;

pub use config::{BoundaryMode, Settings};
pub use error::{EngineError, EngineResult};
pub use game_of_life::Engine;
pub use session::Session;
