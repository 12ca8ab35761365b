//! User intents and their text command syntax

use anyhow::{Context, Result};
use std::str::FromStr;

/// One discrete request from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Toggle { row: usize, col: usize },
    /// Pointer click in window pixels
    ClickAt { x: u32, y: u32 },
    Step,
    Run(usize),
    TogglePause,
    SpeedUp,
    SpeedDown,
    Reset,
    Save(String),
    Load(usize),
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  toggle <row> <col>   flip a cell (alias: t)
  click <x> <y>        flip the cell under a pixel position
  step                 advance one generation (alias: s)
  run <n>              advance n generations
  pause                start or stop the clock (alias: p)
  faster | slower      change speed (aliases: + -)
  reset                kill every cell
  save <name>          store the current cells
  load <index>         restore a stored state
  list                 show stored states
  quit                 leave (alias: q)";

impl FromStr for Intent {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words.next().context("Empty command")?;

        let intent = match command.to_ascii_lowercase().as_str() {
            "toggle" | "t" => Intent::Toggle {
                row: parse_arg(words.next(), "row")?,
                col: parse_arg(words.next(), "col")?,
            },
            "click" => Intent::ClickAt {
                x: parse_arg(words.next(), "x")?,
                y: parse_arg(words.next(), "y")?,
            },
            "step" | "s" => Intent::Step,
            "run" => Intent::Run(parse_arg(words.next(), "generations")?),
            "pause" | "p" => Intent::TogglePause,
            "faster" | "+" => Intent::SpeedUp,
            "slower" | "-" => Intent::SpeedDown,
            "reset" => Intent::Reset,
            "save" => {
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    anyhow::bail!("Missing name for save");
                }
                return Ok(Intent::Save(name));
            }
            "load" => Intent::Load(parse_arg(words.next(), "index")?),
            "list" | "ls" => Intent::List,
            "help" | "?" => Intent::Help,
            "quit" | "q" | "exit" => Intent::Quit,
            other => anyhow::bail!("Unknown command '{}'", other),
        };

        if let Some(extra) = words.next() {
            anyhow::bail!("Unexpected argument '{}' for {}", extra, command);
        }
        Ok(intent)
    }
}

fn parse_arg<T: FromStr>(word: Option<&str>, what: &str) -> Result<T> {
    let word = word.with_context(|| format!("Missing {}", what))?;
    word.parse()
        .map_err(|_| anyhow::anyhow!("Invalid {} '{}'", what, word))
}
