//! Drives one engine from user intents and a wall clock

use super::Intent;
use crate::config::{ColorPalette, Settings};
use crate::game_of_life::Engine;
use crate::utils::GridFormatter;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info};

/// What the caller should do after an intent was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw the grid
    Redraw,
    /// Show a message to the user
    Message(String),
    Quit,
}

/// Interactive session over a single engine.
///
/// Starts paused. While running, `advance` steps the engine at `speed`
/// generations per second of elapsed time.
pub struct Session {
    engine: Engine,
    cell_size: u32,
    colors: ColorPalette,
    paused: bool,
    speed: u32,
    max_speed: u32,
    generation: u64,
    pending: Duration,
}

impl Session {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let engine = Engine::from_settings(settings).context("Failed to create engine")?;
        Ok(Self {
            engine,
            cell_size: settings.display.cell_size,
            colors: settings.display.colors.clone(),
            paused: true,
            speed: settings.simulation.initial_speed,
            max_speed: settings.simulation.max_speed,
            generation: 0,
            pending: Duration::ZERO,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Map a pixel position to the cell under it
    pub fn cell_at_pixel(&self, x: u32, y: u32) -> Option<(usize, usize)> {
        let row = (y / self.cell_size) as usize;
        let col = (x / self.cell_size) as usize;
        self.engine.grid().contains(row, col).then_some((row, col))
    }

    pub fn handle(&mut self, intent: Intent) -> Result<Outcome> {
        debug!(?intent, "handling intent");
        match intent {
            Intent::Toggle { row, col } => self.toggle(row, col),
            Intent::ClickAt { x, y } => match self.cell_at_pixel(x, y) {
                Some((row, col)) => self.toggle(row, col),
                None => Ok(Outcome::Message(format!("({}, {}) is outside the grid", x, y))),
            },
            Intent::Step => {
                self.step();
                Ok(Outcome::Redraw)
            }
            Intent::Run(generations) => {
                for _ in 0..generations {
                    self.step();
                }
                Ok(Outcome::Redraw)
            }
            Intent::TogglePause => {
                self.paused = !self.paused;
                self.pending = Duration::ZERO;
                Ok(Outcome::Message(
                    if self.paused { "Paused" } else { "Running" }.to_string(),
                ))
            }
            Intent::SpeedUp => Ok(self.set_speed(self.speed.saturating_add(1))),
            Intent::SpeedDown => Ok(self.set_speed(self.speed.saturating_sub(1))),
            Intent::Reset => {
                self.engine.reset();
                self.generation = 0;
                Ok(Outcome::Redraw)
            }
            Intent::Save(name) => {
                let index = self
                    .engine
                    .save_initial_state(&name)
                    .with_context(|| format!("Failed to save '{}'", name))?;
                Ok(Outcome::Message(format!("Saved '{}' as #{}", name, index)))
            }
            Intent::Load(index) => match self.engine.load_initial_state(index) {
                Ok(()) => {
                    self.generation = 0;
                    Ok(Outcome::Redraw)
                }
                Err(e) if e.is_recoverable() => Ok(Outcome::Message(e.to_string())),
                Err(e) => Err(e).context("Failed to load saved state"),
            },
            Intent::List => Ok(Outcome::Message(GridFormatter::format_saved_states(
                &self.engine.get_saved_state_names(),
            ))),
            Intent::Help => Ok(Outcome::Message(super::HELP.to_string())),
            Intent::Quit => Ok(Outcome::Quit),
        }
    }

    /// Feed elapsed wall time; returns how many generations were stepped
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.pending += elapsed;
        let interval = Duration::from_secs(1) / self.speed;
        let mut steps = 0;
        while self.pending >= interval {
            self.pending -= interval;
            self.step();
            steps += 1;
        }
        steps
    }

    /// Grid followed by a status line
    pub fn render(&self) -> String {
        let grid = self.engine.grid();
        let mut frame = GridFormatter::format_grid_colored(grid, &self.colors);
        frame.push_str(&GridFormatter::format_status(
            self.generation,
            grid.living_count(),
            self.speed,
            self.paused,
        ));
        frame.push('\n');
        frame
    }

    fn toggle(&mut self, row: usize, col: usize) -> Result<Outcome> {
        if !self.engine.grid().contains(row, col) {
            return Ok(Outcome::Message(format!(
                "({}, {}) is outside the {}x{} grid",
                row,
                col,
                self.engine.rows(),
                self.engine.cols()
            )));
        }
        self.engine.toggle_cell(row, col)?;
        Ok(Outcome::Redraw)
    }

    fn step(&mut self) {
        self.engine.step();
        self.generation += 1;
    }

    fn set_speed(&mut self, speed: u32) -> Outcome {
        self.speed = speed.clamp(1, self.max_speed);
        self.pending = Duration::ZERO;
        info!(speed = self.speed, "speed changed");
        Outcome::Message(format!("Speed: {}/s", self.speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn session() -> (Session, TempDir) {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.storage.history_file = temp_dir.path().join("saved_states.json");
        settings.simulation.initial_speed = 4;
        settings.simulation.max_speed = 5;
        (Session::from_settings(&settings).unwrap(), temp_dir)
    }

    #[test]
    fn test_starts_paused_and_idle() {
        let (mut session, _dir) = session();
        assert!(session.is_paused());
        assert_eq!(session.advance(Duration::from_secs(10)), 0);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_click_maps_pixels_to_cells() {
        let (mut session, _dir) = session();
        assert_eq!(session.cell_at_pixel(35, 12), Some((1, 3)));
        assert_eq!(session.cell_at_pixel(100, 0), None);

        assert_eq!(session.handle(Intent::ClickAt { x: 35, y: 12 }).unwrap(), Outcome::Redraw);
        assert!(session.engine().is_alive(1, 3));

        assert!(matches!(
            session.handle(Intent::ClickAt { x: 0, y: 250 }).unwrap(),
            Outcome::Message(_)
        ));
    }

    #[test]
    fn test_out_of_range_toggle_is_a_message() {
        let (mut session, _dir) = session();
        assert!(matches!(
            session.handle(Intent::Toggle { row: 10, col: 0 }).unwrap(),
            Outcome::Message(_)
        ));
        assert!(session.engine().grid().is_empty());
    }

    #[test]
    fn test_advance_follows_speed() {
        let (mut session, _dir) = session();
        for (row, col) in [(4, 3), (4, 4), (4, 5)] {
            session.handle(Intent::Toggle { row, col }).unwrap();
        }
        session.handle(Intent::TogglePause).unwrap();

        // 4 generations per second
        assert_eq!(session.advance(Duration::from_millis(100)), 0);
        assert_eq!(session.advance(Duration::from_millis(200)), 1);
        assert_eq!(session.advance(Duration::from_millis(500)), 2);
        assert_eq!(session.generation(), 3);
        // Blinker after an odd number of generations is vertical
        assert_eq!(session.engine().grid().living_cells(), vec![(3, 4), (4, 4), (5, 4)]);
    }

    #[test]
    fn test_speed_is_clamped() {
        let (mut session, _dir) = session();
        for _ in 0..5 {
            session.handle(Intent::SpeedUp).unwrap();
        }
        assert_eq!(session.speed(), 5);
        for _ in 0..10 {
            session.handle(Intent::SpeedDown).unwrap();
        }
        assert_eq!(session.speed(), 1);
    }

    #[test]
    fn test_save_load_and_list() {
        let (mut session, _dir) = session();
        session.handle(Intent::Toggle { row: 2, col: 2 }).unwrap();
        session.handle(Intent::Save("dot".to_string())).unwrap();
        session.handle(Intent::Run(3)).unwrap();
        assert!(session.engine().grid().is_empty());

        assert_eq!(session.handle(Intent::Load(0)).unwrap(), Outcome::Redraw);
        assert_eq!(session.generation(), 0);
        assert!(session.engine().is_alive(2, 2));

        match session.handle(Intent::List).unwrap() {
            Outcome::Message(listing) => assert!(listing.contains("0: dot")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_missing_saved_state_is_a_message() {
        let (mut session, _dir) = session();
        session.handle(Intent::Toggle { row: 1, col: 1 }).unwrap();

        match session.handle(Intent::Load(7)).unwrap() {
            Outcome::Message(message) => assert!(message.contains("index 7")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(session.engine().is_alive(1, 1));
    }

    #[test]
    fn test_reset_and_quit() {
        let (mut session, _dir) = session();
        session.handle(Intent::Toggle { row: 1, col: 1 }).unwrap();
        session.handle(Intent::Step).unwrap();
        session.handle(Intent::Reset).unwrap();
        assert!(session.engine().grid().is_empty());
        assert_eq!(session.generation(), 0);
        assert_eq!(session.handle(Intent::Quit).unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_render_has_status_line() {
        let (session, _dir) = session();
        let frame = session.render();
        assert!(frame.ends_with("Generation 0 | Living: 0 | Speed: 4/s | Paused\n"));
    }
}
