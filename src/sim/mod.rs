//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Randomness only through the injected `Rng`
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Bounds, avatar_bounds, cleared, ground_hit, obstacle_hit};
pub use spawn::{effective_speed, place_gap, scatter_decorations, spawn_interval, spawn_obstacle};
pub use state::{
    Avatar, DeathCause, Decoration, GameEvent, GameState, Obstacle, SessionStatus,
};
pub use tick::{StepInput, StepOutcome, step};
