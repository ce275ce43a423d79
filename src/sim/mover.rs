//! Shared motion primitive for both agents

use glam::Vec2;

use super::maze::Maze;
use crate::heading_vector;

/// Result of a single move attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Position after the attempt (unchanged when blocked)
    pub position: Vec2,
    /// Whether the agent actually moved
    pub moved: bool,
}

impl MoveResult {
    pub fn blocked(position: Vec2) -> Self {
        Self {
            position,
            moved: false,
        }
    }
}

/// Step `speed` pixels along `heading`, rejecting steps that land in a wall
///
/// Only the landing point is tested; agents are points for collision purposes.
pub fn try_move(position: Vec2, heading: f32, speed: f32, maze: &Maze) -> MoveResult {
    let candidate = position + heading_vector(heading) * speed;
    if maze.is_blocked(candidate) {
        MoveResult::blocked(position)
    } else {
        MoveResult {
            position: candidate,
            moved: true,
        }
    }
}
