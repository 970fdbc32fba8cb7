mod game;
mod term;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use snake::{log, logger, EngineConfig, GameEngine, SpeedProfile};

use crate::game::{BoardView, SnakeGame};
use crate::term::{TermInt, TermManager};

#[derive(Parser, Debug)]
#[command(name = "snake", about = "Grid snake in the terminal")]
struct Args {
    /// Cells per side of the square board
    #[arg(long, default_value_t = snake::config::DEFAULT_BOARD_SIZE)]
    board_size: i32,

    /// Starting speed: easy, medium, hard or insane
    #[arg(long, default_value_t = SpeedProfile::Medium)]
    speed: SpeedProfile,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum drag, in cells, for a mouse gesture to count as a swipe
    #[arg(long, default_value_t = 3.0)]
    swipe_threshold: f32,

    /// Append a log of the session to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logger::init_logger(path, Some("snake".to_string()))
            .with_context(|| format!("failed to open log file {}", path.display()))?;
    }

    let config = EngineConfig::new(args.board_size).context("invalid board size")?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine = GameEngine::new(config, rng);
    engine.set_speed(args.speed);

    let term = TermManager::new().context("failed to read terminal size")?;
    let term_size = term.get_terminal_size();
    let view = match BoardView::fit(config.board_size() as TermInt, term_size) {
        Some(view) => view,
        None => {
            let (w, h) = BoardView::outer_size(config.board_size() as TermInt);
            bail!(
                "terminal is {}x{}, a board of {} needs at least {}x{}",
                term_size.0, term_size.1, config.board_size(), w, h + 2
            );
        }
    };

    log!("session: board={} speed={} seed={:?}", config.board_size(), args.speed, args.seed);

    let mut game = SnakeGame::new(term, engine, view, args.swipe_threshold);
    game.term_mut().setup().context("failed to set up terminal")?;

    // Put the terminal back even when the game loop fails
    let res = game.show_intro().and_then(|_| game.run());
    game.term_mut().restore().context("failed to restore terminal")?;
    res.context("game loop failed")?;

    log!("session ended");
    Ok(())
}
