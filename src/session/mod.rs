//! Interactive session layer between a user and the engine

pub mod controller;
pub mod intent;

pub use controller::{Outcome, Session};
pub use intent::{Intent, HELP};
