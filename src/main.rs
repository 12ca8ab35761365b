//! Command line front end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_sim::{
    config::{CliOverrides, Settings},
    game_of_life::Engine,
    session::{Intent, Outcome, Session, HELP},
    utils::{ColorOutput, GridFormatter},
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "life_sim")]
#[command(about = "Conway's Game of Life with saved patterns")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/settings.yaml")]
    config: PathBuf,

    /// Saved-state history file (overrides config)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Wrap edges around (overrides config)
    #[arg(long, global = true)]
    wrapped: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit and run a grid interactively
    Play {
        /// Generations per second (overrides config)
        #[arg(short, long)]
        speed: Option<u32>,
    },

    /// Load a saved state and print its evolution
    Run {
        /// Index of the saved state
        #[arg(short, long)]
        load: usize,

        /// Number of generations to print
        #[arg(short, long, default_value_t = 10)]
        generations: usize,

        /// Show row and column numbers
        #[arg(long)]
        coords: bool,
    },

    /// List saved states
    List,

    /// Write a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { speed } => {
            let settings = load_settings(&cli.config, cli.history, cli.wrapped, speed)?;
            play_command(settings)
        }
        Commands::Run { load, generations, coords } => {
            let settings = load_settings(&cli.config, cli.history, cli.wrapped, None)?;
            run_command(settings, load, generations, coords)
        }
        Commands::List => {
            let settings = load_settings(&cli.config, cli.history, cli.wrapped, None)?;
            list_command(settings)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(
    config_path: &PathBuf,
    history_file: Option<PathBuf>,
    wrapped: bool,
    speed: Option<u32>,
) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        warn!(path = %config_path.display(), "config file not found, using defaults");
        Settings::default()
    };

    settings.merge_with_cli(&CliOverrides {
        history_file,
        speed,
        wrapped,
    });
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn play_command(settings: Settings) -> Result<()> {
    let mut session = Session::from_settings(&settings)?;
    info!(
        rows = session.engine().rows(),
        cols = session.engine().cols(),
        mode = ?session.engine().boundary_mode(),
        "starting session"
    );

    println!("{}", ColorOutput::info("Game of Life. Type 'help' for commands."));
    print!("{}", session.render());

    let stdin = std::io::stdin();
    let mut last_tick = Instant::now();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = lines.next() else { break };
        let line = line.context("Failed to read command")?;

        // Time spent at the prompt counts as running time
        let stepped = session.advance(last_tick.elapsed());
        last_tick = Instant::now();

        if line.trim().is_empty() {
            if stepped > 0 {
                print!("{}", session.render());
            }
            continue;
        }

        let intent = match line.parse::<Intent>() {
            Ok(intent) => intent,
            Err(e) => {
                println!("{}", ColorOutput::warning(&e.to_string()));
                continue;
            }
        };

        match session.handle(intent) {
            Ok(Outcome::Redraw) => print!("{}", session.render()),
            Ok(Outcome::Message(message)) => {
                if stepped > 0 {
                    print!("{}", session.render());
                }
                println!("{}", message);
            }
            Ok(Outcome::Quit) => break,
            Err(e) => println!("{}", ColorOutput::error(&format!("{:#}", e))),
        }
    }

    Ok(())
}

fn run_command(settings: Settings, index: usize, generations: usize, coords: bool) -> Result<()> {
    let mut engine = Engine::from_settings(&settings)?;
    engine
        .load_initial_state(index)
        .with_context(|| format!("Failed to load saved state {}", index))?;

    let format = |engine: &Engine| {
        if coords {
            GridFormatter::format_grid_with_coords(engine.grid())
        } else {
            GridFormatter::format_grid_compact(engine.grid())
        }
    };

    for generation in 0..=generations {
        if generation > 0 {
            engine.step();
        }
        println!("Generation {} (Living: {}):", generation, engine.grid().living_count());
        println!("{}", format(&engine));
    }

    Ok(())
}

fn list_command(settings: Settings) -> Result<()> {
    let engine = Engine::from_settings(&settings)?;
    println!("{}", GridFormatter::format_saved_states(&engine.get_saved_state_names()));
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config/settings.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("{}", ColorOutput::success(&format!("Created: {}", config_path.display())));
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", HELP);
    Ok(())
}
