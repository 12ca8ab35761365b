//! Display and output formatting utilities

use crate::config::{ColorPalette, Rgb};
use crate::game_of_life::Grid;

/// Text renderings of a grid for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() + 1));
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                output.push(if grid.get(row, col) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.rows() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.cols() {
                output.push_str(if grid.get(row, col) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format a grid with coordinates, painted with the configured palette
    pub fn format_grid_colored(grid: &Grid, palette: &ColorPalette) -> String {
        let mut output = String::new();

        let mut header = String::from("   ");
        for col in 0..grid.cols() {
            header.push_str(&format!("{:2}", col % 10));
        }
        output.push_str(&ColorOutput::rgb(&header, palette.grid_line));
        output.push('\n');

        for row in 0..grid.rows() {
            output.push_str(&ColorOutput::rgb(&format!("{:2} ", row), palette.grid_line));
            for col in 0..grid.cols() {
                let color = if grid.get(row, col) { palette.alive } else { palette.dead };
                output.push_str(&ColorOutput::rgb("██", color));
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary under the grid
    pub fn format_status(generation: u64, living: usize, speed: u32, paused: bool) -> String {
        format!(
            "Generation {} | Living: {} | Speed: {}/s | {}",
            generation,
            living,
            speed,
            if paused { "Paused" } else { "Running" }
        )
    }

    /// Numbered list of saved state names
    pub fn format_saved_states(names: &[String]) -> String {
        if names.is_empty() {
            return "No saved states".to_string();
        }

        let mut output = String::from("Saved states:\n");
        for (i, name) in names.iter().enumerate() {
            output.push_str(&format!("{:3}: {}\n", i, name));
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Format text with a 24-bit foreground color
    pub fn rgb(text: &str, [r, g, b]: Rgb) -> String {
        if Self::supports_color() {
            format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
