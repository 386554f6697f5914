#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake Arcade experience.

mod scene;
mod session;

use std::{
    fs::File,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{
    ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use snake_arcade_adapter_persistence::{MemoryStore, ProfileStore, TomlFileStore};
use snake_arcade_core::{Difficulty, GridSize, GAME_TITLE};
use snake_arcade_rendering::{palette, Presentation, RenderingBackend};
use snake_arcade_rendering_macroquad::MacroquadBackend;
use snake_arcade_world::{Config, DEFAULT_RNG_SEED};

use crate::session::Session;

/// Command-line arguments accepted by the Snake Arcade binary.
#[derive(Debug, Parser)]
#[command(
    name = "snake-arcade",
    version,
    about = "Classic snake with power-ups and achievements"
)]
struct CliArgs {
    /// Difficulty preselected on the menu.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,
    /// Seed of the food stream. Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of grid columns.
    #[arg(long, default_value_t = GridSize::DEFAULT.width())]
    grid_width: u32,
    /// Number of grid rows.
    #[arg(long, default_value_t = GridSize::DEFAULT.height())]
    grid_height: u32,
    /// Directory holding the player profile.
    #[arg(long, default_value = ".snake-arcade")]
    data_dir: PathBuf,
    /// Keep the profile in memory instead of writing it to disk.
    #[arg(long)]
    no_save: bool,
    /// Render as fast as possible instead of waiting for the display refresh.
    #[arg(long)]
    no_vsync: bool,
    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Most verbose log level that is emitted.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    /// Write logs to this file instead of the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Normal => Self::Normal,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Entry point for the Snake Arcade command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_level.into(), args.log_file.as_ref())?;

    let grid = GridSize::new(args.grid_width, args.grid_height)
        .context("invalid grid dimensions")?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("starting {GAME_TITLE} on a {grid} grid with seed {seed}");

    let store: Box<dyn ProfileStore> = if args.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(TomlFileStore::new(&args.data_dir))
    };
    let mut session = Session::new(Config::new(grid, seed), args.difficulty.into(), store);

    let scene = scene::empty_scene(grid).context("failed to lay out the play field")?;
    let presentation = Presentation::new(GAME_TITLE, palette::BACKGROUND, scene);

    MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .run(presentation, move |dt, input, scene| {
            session.frame(dt, input, scene)
        })
}

fn init_logging(level: LevelFilter, log_file: Option<&PathBuf>) -> Result<()> {
    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(level, LogConfig::default(), file)
        }
        None => TermLogger::init(
            level,
            LogConfig::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
    };
    installed.context("failed to install logger")
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(DEFAULT_RNG_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_classic_layout() {
        let args = CliArgs::try_parse_from(["snake-arcade"]).expect("defaults parse");
        assert_eq!(args.difficulty, DifficultyArg::Normal);
        assert_eq!(args.grid_width, 40);
        assert_eq!(args.grid_height, 30);
        assert_eq!(args.seed, None);
        assert!(!args.no_save);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Info);
    }

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "snake-arcade",
            "--difficulty",
            "hard",
            "--seed",
            "99",
            "--grid-width",
            "20",
            "--log-level",
            "debug",
            "--no-save",
        ])
        .expect("flags parse");
        assert_eq!(Difficulty::from(args.difficulty), Difficulty::Hard);
        assert_eq!(args.seed, Some(99));
        assert_eq!(args.grid_width, 20);
        assert!(args.no_save);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(CliArgs::try_parse_from(["snake-arcade", "--difficulty", "insane"]).is_err());
    }
}
