//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in [`GameState`]; nothing is
//! global. The random source is passed to the tick separately.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::maze::{Cell, Maze};
use super::player::PlayerController;
use crate::consts::MOUTH_RATE;
use crate::settings::{ConfigError, SimConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every collectible consumed
    Won,
    /// Lives ran out
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Notifications for the score/lives display and the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    LivesChanged { lives: u8 },
    CollectibleEaten { x: i32, y: i32 },
    /// Pursuer reached the player (emitted before any reset)
    PlayerCaught,
    Won { score: u64 },
    GameOver { score: u64 },
}

/// A moving agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub pos: Vec2,
    /// Radians, screen space (y down, 0 = +x)
    pub heading: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Reset position after a catch
    pub spawn_pos: Vec2,
    /// Reset heading after a catch
    pub spawn_heading: f32,
}

impl Agent {
    pub fn new(pos: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            pos,
            heading,
            speed,
            spawn_pos: pos,
            spawn_heading: heading,
        }
    }

    /// Move back to spawn with the initial heading
    pub fn reset(&mut self) {
        self.pos = self.spawn_pos;
        self.heading = self.spawn_heading;
    }
}

/// The player-controlled agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub agent: Agent,
    /// Visual radius (half a cell)
    pub radius: f32,
    /// Mouth animation phase in [0, 1), advances while moving
    pub mouth_phase: f32,
    pub controller: PlayerController,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            agent: Agent::new(pos, 0.0, speed),
            radius,
            mouth_phase: 0.0,
            controller: PlayerController::default(),
        }
    }

    pub fn advance_mouth(&mut self) {
        self.mouth_phase = (self.mouth_phase + MOUTH_RATE).fract();
    }

    pub fn reset(&mut self) {
        self.agent.reset();
        self.mouth_phase = 0.0;
        self.controller.clear();
    }
}

/// Read-only agent view for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentView {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            x: agent.pos.x,
            y: agent.pos.y,
            heading: agent.heading,
        }
    }
}

/// Everything the renderer needs after a tick
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub player: AgentView,
    pub player_radius: f32,
    pub mouth_phase: f32,
    pub pursuer: AgentView,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: SimConfig,
    pub maze: Maze,
    pub player: Player,
    pub pursuer: Agent,
    pub score: u64,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Pending notifications, drained by the driver
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Validate the config and build its maze
    ///
    /// A text layout in `layout_rows` is used as-is; otherwise the maze is
    /// generated from `maze_layout` on the canvas-derived grid.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let maze = match &config.layout_rows {
            Some(rows) => {
                let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                Maze::from_rows(&rows, config.cell_size_px())?
            }
            None => Maze::generate(
                config.maze_layout,
                config.grid_width(),
                config.grid_height(),
                config.cell_size_px(),
                config.player_spawn_cell(),
                config.pursuer_spawn_cell(),
            ),
        };
        Self::with_maze(config, maze)
    }

    /// Start a session on a prebuilt maze (grid size comes from the maze)
    pub fn with_maze(config: SimConfig, maze: Maze) -> Result<Self, ConfigError> {
        config.validate_rules()?;
        for (agent, cell) in [
            ("player", config.player_spawn_cell()),
            ("pursuer", config.pursuer_spawn_cell()),
        ] {
            if maze.cell_at(cell.x, cell.y) == Cell::Wall {
                return Err(ConfigError::SpawnInWall {
                    agent,
                    x: cell.x,
                    y: cell.y,
                });
            }
        }

        let player = Player::new(
            maze.cell_center(config.player_spawn_cell()),
            config.player_speed,
            maze.cell_size() / 2.0,
        );
        let pursuer = Agent::new(
            maze.cell_center(config.pursuer_spawn_cell()),
            0.0,
            config.pursuer_speed,
        );
        let lives = config.starting_lives;

        log::debug!(
            "Session maze {}x{}, {} collectibles",
            maze.width(),
            maze.height(),
            maze.remaining_collectibles()
        );

        Ok(Self {
            config,
            maze,
            player,
            pursuer,
            score: 0,
            lives,
            time_ticks: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
        })
    }

    /// Full reset onto a fresh maze: agents at spawn, score 0, lives restored
    ///
    /// Stale events are dropped; the score and lives displays are notified if
    /// the reset changed them.
    pub fn reset(&mut self, maze: Maze) {
        self.events.clear();
        self.maze = maze;
        self.player.reset();
        self.pursuer.reset();
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;

        if self.score != 0 {
            self.score = 0;
            self.emit(GameEvent::ScoreChanged { score: 0 });
        }
        let lives = self.config.starting_lives;
        if self.lives != lives {
            self.lives = lives;
            self.emit(GameEvent::LivesChanged { lives });
        }
    }

    /// Put both agents back on their spawn cells
    pub fn reset_positions(&mut self) {
        self.player.reset();
        self.pursuer.reset();
    }

    /// Player's current grid cell
    pub fn player_cell(&self) -> IVec2 {
        self.maze.grid_of(self.player.agent.pos)
    }

    pub fn pursuer_cell(&self) -> IVec2 {
        self.maze.grid_of(self.pursuer.pos)
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.maze.remaining_collectibles()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.maze,
            player: AgentView::from(&self.player.agent),
            player_radius: self.player.radius,
            mouth_phase: self.player.mouth_phase,
            pursuer: AgentView::from(&self.pursuer),
            score: self.score,
            lives: self.lives,
            phase: self.phase,
        }
    }
}
