//! Session driver boundary
//!
//! Owns the game state together with its seeded random source. Input adapters
//! call [`Session::request_turn`]; the frame-pacing loop calls
//! [`Session::advance`] and [`Session::restart`] on a terminal outcome.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::{ConfigError, SimConfig};
use crate::sim::{Direction, GameEvent, GameState, Maze, Snapshot, TickOutcome, tick};

/// RNG seed and stream; each restart moves to the next stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// A running game plus everything needed to restart it
pub struct Session {
    state: GameState,
    rng_state: RngState,
    rng: Pcg32,
    /// Maze as generated at session start, reused on restart
    initial_maze: Maze,
}

impl Session {
    /// Build a session from config, generating the maze
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        let state = GameState::new(config)?;
        Ok(Self::from_state(state, seed))
    }

    /// Build a session on a prebuilt maze
    pub fn with_maze(config: SimConfig, maze: Maze, seed: u64) -> Result<Self, ConfigError> {
        let state = GameState::with_maze(config, maze)?;
        Ok(Self::from_state(state, seed))
    }

    fn from_state(state: GameState, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        log::info!(
            "Session started: seed {}, layout {}, pursuer {}",
            seed,
            state.config.maze_layout.as_str(),
            state.config.pursuer_strategy.as_str()
        );
        Self {
            initial_maze: state.maze.clone(),
            rng: rng_state.to_rng(),
            rng_state,
            state,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rng_state(&self) -> RngState {
        self.rng_state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    /// Queue a turn; replaces any request not yet applied
    pub fn request_turn(&mut self, direction: Direction) {
        self.state.player.controller.request_turn(direction);
    }

    /// Queue a turn by input name; unknown names are ignored
    pub fn request_turn_named(&mut self, name: &str) -> bool {
        match Direction::from_name(name) {
            Some(direction) => {
                self.request_turn(direction);
                true
            }
            None => {
                log::debug!("Ignoring unknown direction {:?}", name);
                false
            }
        }
    }

    /// Run one simulation tick
    pub fn advance(&mut self) -> TickOutcome {
        tick(&mut self.state, &mut self.rng)
    }

    /// Events emitted since the last drain (score/lives display feed)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Fresh maze and agents, score 0, lives restored, next RNG stream
    pub fn restart(&mut self) {
        self.rng_state.stream += 1;
        self.rng = self.rng_state.to_rng();
        self.state.reset(self.initial_maze.clone());
        log::info!("Session restarted (stream {})", self.rng_state.stream);
    }
}
