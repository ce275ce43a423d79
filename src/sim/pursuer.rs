//! Pursuer movement policies
//!
//! Two difficulty behaviours selected by [`PursuerStrategy`]:
//! - Random walk: wanders, never biased toward the player
//! - Greedy chase: steps along the dominant axis toward the player

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;

use super::maze::Maze;
use super::mover::try_move;
use super::state::Agent;
use crate::settings::PursuerStrategy;

/// Advance the pursuer by one tick. Returns whether it moved.
pub fn step_pursuer<R: Rng + ?Sized>(
    strategy: PursuerStrategy,
    turn_probability: f32,
    pursuer: &mut Agent,
    target: Vec2,
    maze: &Maze,
    rng: &mut R,
) -> bool {
    match strategy {
        PursuerStrategy::RandomWalk => random_walk(turn_probability, pursuer, maze, rng),
        PursuerStrategy::GreedyChase => greedy_chase(pursuer, target, maze),
    }
}

/// Occasionally re-roll the heading to one of the four cardinals, then move
pub fn random_walk<R: Rng + ?Sized>(
    turn_probability: f32,
    pursuer: &mut Agent,
    maze: &Maze,
    rng: &mut R,
) -> bool {
    if rng.random::<f32>() < turn_probability {
        pursuer.heading = f32::from(rng.random_range(0..4u8)) * FRAC_PI_2;
    }
    let result = try_move(pursuer.pos, pursuer.heading, pursuer.speed, maze);
    pursuer.pos = result.position;
    result.moved
}

/// Try the dominant axis toward `target`, then the other; idle if both blocked
///
/// The heading always faces the target, whichever axis moved.
pub fn greedy_chase(pursuer: &mut Agent, target: Vec2, maze: &Maze) -> bool {
    let delta = target - pursuer.pos;
    if delta != Vec2::ZERO {
        pursuer.heading = delta.y.atan2(delta.x);
    }

    let x_axis = axis_heading(delta.x, 0.0, std::f32::consts::PI);
    let y_axis = axis_heading(delta.y, FRAC_PI_2, -FRAC_PI_2);
    let order = if delta.x.abs() >= delta.y.abs() {
        [x_axis, y_axis]
    } else {
        [y_axis, x_axis]
    };

    for heading in order.into_iter().flatten() {
        let result = try_move(pursuer.pos, heading, pursuer.speed, maze);
        if result.moved {
            pursuer.pos = result.position;
            return true;
        }
    }
    false
}

/// Heading along one axis toward the target, or `None` when already aligned
fn axis_heading(delta: f32, positive: f32, negative: f32) -> Option<f32> {
    if delta > 0.0 {
        Some(positive)
    } else if delta < 0.0 {
        Some(negative)
    } else {
        None
    }
}
