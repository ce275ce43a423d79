//! Maze Chase - A grid maze pursuit simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, movement, pursuer, tick)
//! - `session`: Session driver boundary (input, seeded RNG, restart)
//! - `settings`: Tunable parameters loaded from JSON

pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{ConfigError, MazeLayout, PursuerStrategy, SimConfig};

use glam::{IVec2, Vec2};

/// Default tuning constants
pub mod consts {
    /// Side length of one grid cell in pixels
    pub const CELL_SIZE: u32 = 20;

    /// Canvas dimensions (grid size derives from these)
    pub const CANVAS_WIDTH: u32 = 600;
    pub const CANVAS_HEIGHT: u32 = 600;

    /// Agent speeds (pixels per tick)
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PURSUER_SPEED: f32 = 2.0;

    /// Chance per tick that the random-walk pursuer picks a new heading
    pub const PURSUER_TURN_PROBABILITY: f32 = 0.05;

    /// Scoring and lives
    pub const POINTS_PER_COLLECTIBLE: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;

    /// Spawn cells (grid coordinates)
    pub const PLAYER_SPAWN: (i32, i32) = (14, 23);
    pub const PURSUER_SPAWN: (i32, i32) = (14, 11);

    /// Mouth animation advance per moving tick (wraps at 1.0)
    pub const MOUTH_RATE: f32 = 0.1;
}

/// Unit vector for a heading in screen space (y down, 0 rad = +x)
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Map a pixel position to its grid cell by floor division
#[inline]
pub fn grid_cell(pos: Vec2, cell_size: f32) -> IVec2 {
    (pos / cell_size).floor().as_ivec2()
}
