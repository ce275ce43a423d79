//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick
//! - Randomness only through the caller's RNG
//! - No rendering or platform dependencies

pub mod maze;
pub mod mover;
pub mod player;
pub mod pursuer;
pub mod state;
pub mod tick;

pub use maze::{Cell, LayoutError, Maze};
pub use mover::{MoveResult, try_move};
pub use player::{Direction, PlayerController};
pub use pursuer::{greedy_chase, random_walk, step_pursuer};
pub use state::{Agent, AgentView, GameEvent, GamePhase, GameState, Player, Snapshot};
pub use tick::{TickOutcome, tick};
