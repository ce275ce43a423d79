//! Player input resolution
//!
//! A turn request is held until the corridor in that direction opens, then
//! committed. Only the most recent request is kept.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::maze::Maze;
use super::mover::try_move;

/// Cardinal direction requested by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Heading in radians (screen space, y down)
    pub fn heading(self) -> f32 {
        match self {
            Direction::Up => 1.5 * PI,
            Direction::Down => FRAC_PI_2,
            Direction::Left => PI,
            Direction::Right => 0.0,
        }
    }

    /// Parse an input name (arrow key names, WASD or plain words)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "arrowup" | "w" => Some(Direction::Up),
            "down" | "arrowdown" | "s" => Some(Direction::Down),
            "left" | "arrowleft" | "a" => Some(Direction::Left),
            "right" | "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Pending-turn buffer for the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerController {
    pending: Option<Direction>,
}

impl PlayerController {
    /// Store a turn request, replacing any unconsumed one
    pub fn request_turn(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Heading to use this tick
    ///
    /// The pending request is probed one `speed` step away; if open it becomes
    /// the heading and is cleared, otherwise it stays queued for the next tick.
    pub fn resolve_heading(
        &mut self,
        position: Vec2,
        heading: f32,
        speed: f32,
        maze: &Maze,
    ) -> f32 {
        let Some(direction) = self.pending else {
            return heading;
        };
        let probe = try_move(position, direction.heading(), speed, maze);
        if probe.moved {
            self.pending = None;
            direction.heading()
        } else {
            heading
        }
    }
}
