//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    BoundaryMode, CliOverrides, ColorPalette, DisplayConfig, GridConfig, Rgb, Settings,
    SimulationConfig, StorageConfig,
};
