//! Fixed-step simulation tick
//!
//! Advances the session by one discrete step. Deterministic given the state
//! and the random source.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mover::try_move;
use super::pursuer::step_pursuer;
use super::state::{GameEvent, GamePhase, GameState};

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continue,
    /// All collectibles consumed (final score)
    Win(u64),
    /// Lives exhausted (final score)
    GameOver(u64),
}

impl TickOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TickOutcome::Continue)
    }
}

/// Advance the game state by one tick
///
/// Order: player turn and move, collection, pursuer move, catch check, win
/// scan. A catch that ends the game is reported before the win scan runs, so
/// at most one terminal outcome comes out of a tick. Once terminal, further
/// ticks change nothing and repeat the outcome.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TickOutcome {
    match state.phase {
        GamePhase::Won => return TickOutcome::Win(state.score),
        GamePhase::GameOver => return TickOutcome::GameOver(state.score),
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Player: commit a pending turn if its corridor is open, then move
    let player = &mut state.player;
    player.agent.heading = player.controller.resolve_heading(
        player.agent.pos,
        player.agent.heading,
        player.agent.speed,
        &state.maze,
    );
    let result = try_move(player.agent.pos, player.agent.heading, player.agent.speed, &state.maze);
    if result.moved {
        player.agent.pos = result.position;
        player.advance_mouth();
    }

    // Collection
    let cell = state.player_cell();
    if state.maze.consume_if_collectible(cell.x, cell.y) {
        state.score += state.config.points_per_collectible;
        log::trace!("Collected ({}, {}), score {}", cell.x, cell.y, state.score);
        state.emit(GameEvent::CollectibleEaten { x: cell.x, y: cell.y });
        state.emit(GameEvent::ScoreChanged { score: state.score });
    }

    // Pursuer
    let target = state.player.agent.pos;
    step_pursuer(
        state.config.pursuer_strategy,
        state.config.pursuer_turn_probability,
        &mut state.pursuer,
        target,
        &state.maze,
        rng,
    );

    // Catch
    let distance = state.player.agent.pos.distance(state.pursuer.pos);
    if distance < state.config.collision_distance {
        state.lives = state.lives.saturating_sub(1);
        state.emit(GameEvent::PlayerCaught);
        state.emit(GameEvent::LivesChanged { lives: state.lives });

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.emit(GameEvent::GameOver { score: state.score });
            log::info!("Game over at tick {}, score {}", state.time_ticks, state.score);
            return TickOutcome::GameOver(state.score);
        }

        log::debug!("Player caught, {} lives left", state.lives);
        state.reset_positions();
    }

    // Win scan
    if !state.maze.has_collectibles() {
        state.phase = GamePhase::Won;
        state.emit(GameEvent::Won { score: state.score });
        log::info!("Maze cleared at tick {}, score {}", state.time_ticks, state.score);
        return TickOutcome::Win(state.score);
    }

    TickOutcome::Continue
}
