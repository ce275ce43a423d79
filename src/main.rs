//! Maze Chase entry point
//!
//! Headless driver: paces ticks, feeds a scripted input source into the
//! session and reports score, lives and outcomes through the log.
//!
//! Usage: `maze-chase [config.json] [--seed N] [--sessions N] [--max-ticks N]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use maze_chase::sim::{GameEvent, TickOutcome};
use maze_chase::{Session, SimConfig};

/// Input names the scripted adapter sends, one of them deliberately unknown
const INPUT_KEYS: [&str; 5] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "Space"];

/// Ticks between scripted key presses
const INPUT_INTERVAL: u64 = 24;

#[derive(Parser, Debug)]
#[command(
    name = "maze-chase",
    version,
    about = "Run headless maze-chase rounds with a scripted player"
)]
struct Args {
    /// JSON config file (defaults are used when omitted)
    config: Option<PathBuf>,

    /// Seed for the pursuer and the scripted input
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Number of rounds to play, restarting between them
    #[arg(long, default_value_t = 3)]
    sessions: u32,

    /// Tick limit per round
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,
}

fn report(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::ScoreChanged { score } => log::debug!("Score: {}", score),
            GameEvent::LivesChanged { lives } => log::info!("Lives: {}", lives),
            GameEvent::PlayerCaught => log::info!("Caught by the pursuer!"),
            GameEvent::CollectibleEaten { .. }
            | GameEvent::Won { .. }
            | GameEvent::GameOver { .. } => {}
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path),
        None => Ok(SimConfig::default()),
    };
    let mut session = match config.and_then(|c| Session::new(c, args.seed)) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut input_rng = Pcg32::seed_from_u64(args.seed.wrapping_add(1));
    for round in 1..=args.sessions {
        let mut outcome = TickOutcome::Continue;
        let mut ticks = 0;
        while ticks < args.max_ticks && !outcome.is_terminal() {
            if ticks % INPUT_INTERVAL == 0 {
                let key = INPUT_KEYS[input_rng.random_range(0..INPUT_KEYS.len())];
                session.request_turn_named(key);
            }
            outcome = session.advance();
            report(session.drain_events());
            ticks += 1;
        }

        let state = session.state();
        match outcome {
            TickOutcome::Win(score) => log::info!("Round {}: You win! Score {}", round, score),
            TickOutcome::GameOver(score) => {
                log::info!("Round {}: Game over. Score {}", round, score)
            }
            TickOutcome::Continue => log::info!(
                "Round {}: stopped after {} ticks, score {}, lives {}, {} collectibles left",
                round,
                ticks,
                state.score,
                state.lives,
                state.remaining_collectibles()
            ),
        }
        session.restart();
    }

    ExitCode::SUCCESS
}
