mod clock;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod palette;
mod screen;
mod snake;
mod term;

use std::fs::File;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use simplelog::WriteLogger;

use crate::config::{GameConfig, GRID_SIZE, INITIAL_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::SnakeGame;
use crate::term::TermScreen;

pub type TermInt = u16;
pub type PixelInt = i32;
pub type Cell = (PixelInt, PixelInt);

const INTRO: &[&str] = &[
    "WASD or arrow keys to move",
    "Q to speed up, E to slow down",
    "Esc or CTRL+C to quit",
    "",
    "Press any key to begin",
];

#[derive(Parser)]
#[command(name = "wrapsnake")]
#[command(version, about = "Snake on a wraparound grid, in the terminal")]
struct Cli {
    /// Board width in pixels
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    width: PixelInt,

    /// Board height in pixels
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    height: PixelInt,

    /// Size of one grid cell in pixels
    #[arg(long, default_value_t = GRID_SIZE)]
    cell_size: PixelInt,

    /// Initial ticks per second
    #[arg(long, default_value_t = INITIAL_SPEED)]
    speed: u32,

    /// Seed for apple placement, random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// File the log is written to
    #[arg(long, default_value = "snake.log")]
    log_file: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Skip the instructions screen
    #[arg(long)]
    no_intro: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file))?;
    WriteLogger::init(cli.log_level, simplelog::Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = GameConfig::new(cli.width, cli.height, cli.cell_size, cli.speed)
        .context("Invalid board configuration")?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("starting with {:?}, seed {}", config, seed);

    let mut screen = TermScreen::new(config.grid)?;
    screen.setup()?;

    if !cli.no_intro && !screen.show_intro(INTRO)? {
        info!("quit from the intro screen");
        return screen.restore();
    }

    // The game loop takes care of quitting on Esc or CTRL+C
    let mut game = SnakeGame::new(config, screen, StdRng::seed_from_u64(seed));
    game.play()
}
