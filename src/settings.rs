//! Simulation configuration
//!
//! Every tunable constant lives here. Values default to [`crate::consts`] and
//! can be overridden from a JSON file; missing fields keep their defaults.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Maze generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MazeLayout {
    /// Wall on every interior cell with both coordinates even
    #[default]
    Checkerboard,
    /// Fixed table of rectangular wall blocks
    HandAuthored,
}

impl MazeLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            MazeLayout::Checkerboard => "checkerboard",
            MazeLayout::HandAuthored => "hand_authored",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checkerboard" | "checker" => Some(MazeLayout::Checkerboard),
            "hand_authored" | "hand-authored" | "classic" => Some(MazeLayout::HandAuthored),
            _ => None,
        }
    }
}

/// Pursuer movement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PursuerStrategy {
    /// Keep heading, occasionally pick a random cardinal direction
    #[default]
    RandomWalk,
    /// Step along the dominant axis toward the player
    GreedyChase,
}

impl PursuerStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PursuerStrategy::RandomWalk => "random_walk",
            PursuerStrategy::GreedyChase => "greedy_chase",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random_walk" | "random-walk" | "random" => Some(PursuerStrategy::RandomWalk),
            "greedy_chase" | "greedy-chase" | "chase" => Some(PursuerStrategy::GreedyChase),
            _ => None,
        }
    }
}

/// Configuration failures, reported at session construction
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("grid is {width}x{height}, needs at least 3x3 cells")]
    GridTooSmall { width: usize, height: usize },
    #[error("pursuer turn probability must be within [0, 1], got {0}")]
    Probability(f32),
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("{agent} spawn ({x}, {y}) is outside the maze interior")]
    SpawnOutOfBounds { agent: &'static str, x: i32, y: i32 },
    #[error("{agent} spawn ({x}, {y}) is a wall")]
    SpawnInWall { agent: &'static str, x: i32, y: i32 },
    #[error("maze layout: {0}")]
    Layout(#[from] crate::sim::maze::LayoutError),
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of one grid cell (pixels)
    pub cell_size: u32,
    /// Canvas size; the grid is `canvas / cell_size`, remainder pixels unused
    pub canvas_width: u32,
    pub canvas_height: u32,

    // === Agents ===
    /// Player speed (pixels per tick)
    pub player_speed: f32,
    /// Pursuer speed (pixels per tick)
    pub pursuer_speed: f32,
    pub pursuer_strategy: PursuerStrategy,
    /// Per-tick re-roll chance for the random walk
    pub pursuer_turn_probability: f32,
    /// Spawn cells (grid coordinates)
    pub player_spawn: (i32, i32),
    pub pursuer_spawn: (i32, i32),

    // === Rules ===
    /// Center distance below which the pursuer catches the player
    pub collision_distance: f32,
    pub points_per_collectible: u64,
    pub starting_lives: u8,

    // === Maze ===
    pub maze_layout: MazeLayout,
    /// Text maze (`#` wall, `.` collectible, space empty); overrides `maze_layout`
    pub layout_rows: Option<Vec<String>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_speed: PLAYER_SPEED,
            pursuer_speed: PURSUER_SPEED,
            pursuer_strategy: PursuerStrategy::RandomWalk,
            pursuer_turn_probability: PURSUER_TURN_PROBABILITY,
            player_spawn: PLAYER_SPAWN,
            pursuer_spawn: PURSUER_SPAWN,

            collision_distance: CELL_SIZE as f32,
            points_per_collectible: POINTS_PER_COLLECTIBLE,
            starting_lives: STARTING_LIVES,

            maze_layout: MazeLayout::Checkerboard,
            layout_rows: None,
        }
    }
}

impl SimConfig {
    /// Grid columns (floor of canvas width / cell size)
    pub fn grid_width(&self) -> usize {
        self.canvas_width.checked_div(self.cell_size).unwrap_or(0) as usize
    }

    /// Grid rows (floor of canvas height / cell size)
    pub fn grid_height(&self) -> usize {
        self.canvas_height.checked_div(self.cell_size).unwrap_or(0) as usize
    }

    #[inline]
    pub fn cell_size_px(&self) -> f32 {
        self.cell_size as f32
    }

    pub fn player_spawn_cell(&self) -> IVec2 {
        IVec2::new(self.player_spawn.0, self.player_spawn.1)
    }

    pub fn pursuer_spawn_cell(&self) -> IVec2 {
        IVec2::new(self.pursuer_spawn.0, self.pursuer_spawn.1)
    }

    /// Check parameter ranges and spawn placement against the grid size
    ///
    /// With a text layout the grid comes from the rows, so spawn placement is
    /// checked when the maze is built instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.layout_rows.is_some() {
            return self.validate_rules();
        }
        let (width, height) = (self.grid_width(), self.grid_height());
        if width < 3 || height < 3 {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        self.validate_rules()?;
        for (agent, (x, y)) in [("player", self.player_spawn), ("pursuer", self.pursuer_spawn)] {
            let interior = x > 0 && y > 0 && (x as usize) + 1 < width && (y as usize) + 1 < height;
            if !interior {
                return Err(ConfigError::SpawnOutOfBounds { agent, x, y });
            }
        }
        Ok(())
    }

    /// Check the grid-independent parameters (speeds, probability, lives)
    pub fn validate_rules(&self) -> Result<(), ConfigError> {
        // Turns are probed one speed step ahead; a still player would accept any turn
        if !self.player_speed.is_finite() || self.player_speed <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "player_speed",
                value: self.player_speed,
            });
        }
        if !self.pursuer_speed.is_finite() || self.pursuer_speed < 0.0 {
            return Err(ConfigError::Negative {
                name: "pursuer_speed",
                value: self.pursuer_speed,
            });
        }
        if !self.collision_distance.is_finite() || self.collision_distance <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "collision_distance",
                value: self.collision_distance,
            });
        }
        if !(0.0..=1.0).contains(&self.pursuer_turn_probability) {
            return Err(ConfigError::Probability(self.pursuer_turn_probability));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.grid_width(), 30);
        assert_eq!(config.grid_height(), 30);
        assert_eq!(config.collision_distance, config.cell_size_px());
    }

    #[test]
    fn test_grid_floors_remainder() {
        let config = SimConfig {
            canvas_width: 610,
            canvas_height: 599,
            ..Default::default()
        };
        assert_eq!(config.grid_width(), 30);
        assert_eq!(config.grid_height(), 29);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(
            r#"{ "pursuer_strategy": "greedy_chase", "maze_layout": "hand_authored", "starting_lives": 5 }"#,
        )
        .unwrap();
        assert_eq!(config.pursuer_strategy, PursuerStrategy::GreedyChase);
        assert_eq!(config.maze_layout, MazeLayout::HandAuthored);
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.cell_size, CELL_SIZE);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let zero_cell = SimConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero_cell.validate(), Err(ConfigError::ZeroCellSize)));

        let tiny = SimConfig {
            canvas_width: 40,
            ..Default::default()
        };
        assert!(matches!(tiny.validate(), Err(ConfigError::GridTooSmall { width: 2, .. })));

        let bad_prob = SimConfig {
            pursuer_turn_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(bad_prob.validate(), Err(ConfigError::Probability(_))));

        let border_spawn = SimConfig {
            player_spawn: (0, 5),
            ..Default::default()
        };
        assert!(matches!(
            border_spawn.validate(),
            Err(ConfigError::SpawnOutOfBounds { agent: "player", .. })
        ));

        let no_lives = SimConfig {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(matches!(no_lives.validate(), Err(ConfigError::NoLives)));

        let slow = SimConfig {
            pursuer_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            slow.validate_rules(),
            Err(ConfigError::Negative { name: "pursuer_speed", .. })
        ));

        let still_player = SimConfig {
            player_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            still_player.validate_rules(),
            Err(ConfigError::NotPositive { name: "player_speed", .. })
        ));

        let no_reach = SimConfig {
            collision_distance: 0.0,
            ..Default::default()
        };
        assert!(matches!(no_reach.validate(), Err(ConfigError::NotPositive { .. })));

        assert!(matches!(SimConfig::from_json("{ nope"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("maze-chase-{}.json", std::process::id()));
        let config = SimConfig {
            pursuer_strategy: PursuerStrategy::GreedyChase,
            starting_lives: 5,
            ..Default::default()
        };
        std::fs::write(&path, config.to_json().unwrap()).unwrap();
        let loaded = SimConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        let loaded = loaded.unwrap();
        assert_eq!(loaded.pursuer_strategy, PursuerStrategy::GreedyChase);
        assert_eq!(loaded.starting_lives, 5);
        assert_eq!(loaded.grid_width(), 30);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("maze-chase-missing/none.json");
        let err = SimConfig::load(&path).unwrap_err();
        match err {
            ConfigError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_names_round_trip() {
        for layout in [MazeLayout::Checkerboard, MazeLayout::HandAuthored] {
            assert_eq!(MazeLayout::from_name(layout.as_str()), Some(layout));
        }
        for strategy in [PursuerStrategy::RandomWalk, PursuerStrategy::GreedyChase] {
            assert_eq!(PursuerStrategy::from_name(strategy.as_str()), Some(strategy));
        }
        assert_eq!(PursuerStrategy::from_name("teleport"), None);
    }
}
