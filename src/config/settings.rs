//! Configuration settings for the Life simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub boundary_mode: BoundaryMode,
}

/// How neighbors are found at the grid edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Cells beyond the edges do not exist
    #[default]
    Bounded,
    /// Edges wrap around to the opposite side (torus)
    Wrapped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub cell_size: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub colors: ColorPalette,
}

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub alive: Rgb,
    pub dead: Rgb,
    pub grid_line: Rgb,
    pub text: Rgb,
    pub highlight: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Generations per second when unpaused
    pub initial_speed: u32,
    pub max_speed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub history_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                boundary_mode: BoundaryMode::Bounded,
            },
            display: DisplayConfig {
                cell_size: 10,
                window_width: 100,
                window_height: 100,
                colors: ColorPalette {
                    alive: [255, 255, 255],
                    dead: [0, 0, 0],
                    grid_line: [128, 128, 128],
                    text: [211, 211, 211],
                    highlight: [255, 0, 0],
                },
            },
            simulation: SimulationConfig {
                initial_speed: 10,
                max_speed: 60,
            },
            storage: StorageConfig {
                history_file: PathBuf::from("saved_states.json"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.display.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        let (rows, cols) = self.grid_dimensions();
        if rows == 0 || cols == 0 {
            anyhow::bail!(
                "Window {}x{} is smaller than one {}px cell",
                self.display.window_width,
                self.display.window_height,
                self.display.cell_size
            );
        }

        if self.simulation.initial_speed == 0 {
            anyhow::bail!("Initial speed must be positive");
        }

        if self.simulation.initial_speed > self.simulation.max_speed {
            anyhow::bail!(
                "Initial speed {} exceeds maximum speed {}",
                self.simulation.initial_speed,
                self.simulation.max_speed
            );
        }

        Ok(())
    }

    /// Grid size as `(rows, cols)`, derived from the window and cell sizes
    pub fn grid_dimensions(&self) -> (usize, usize) {
        if self.display.cell_size == 0 {
            return (0, 0);
        }
        let rows = self.display.window_height / self.display.cell_size;
        let cols = self.display.window_width / self.display.cell_size;
        (rows as usize, cols as usize)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref history_file) = cli_overrides.history_file {
            self.storage.history_file = history_file.clone();
        }
        if let Some(speed) = cli_overrides.speed {
            self.simulation.initial_speed = speed;
        }
        if cli_overrides.wrapped {
            self.grid.boundary_mode = BoundaryMode::Wrapped;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub history_file: Option<PathBuf>,
    pub speed: Option<u32>,
    pub wrapped: bool,
}
