//! Skyhop - A side-scrolling gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, scoring)
//! - `game`: Host driver that feeds commands into the simulation once per frame
//! - `platform`: Input mapping and the voice command channel
//! - `persistence`: Key-value storage for settings and the best score
//! - `tuning`: Physics table handed to every simulation step

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Units are pixels and ticks; screen y grows downward.
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Height of the ground band at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by an impulse (negative is up)
    pub const IMPULSE_VELOCITY: f32 = -8.0;

    /// Avatar collision radius
    pub const AVATAR_RADIUS: f32 = 20.0;
    /// Avatar never moves horizontally
    pub const AVATAR_X: f32 = 80.0;
    /// Vertical position after a reset
    pub const AVATAR_REST_Y: f32 = 300.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_SIZE: f32 = 160.0;
    /// Keeps the gap away from the ceiling and the ground
    pub const GAP_MARGIN: f32 = 100.0;
    /// New obstacles appear at the right edge
    pub const SPAWN_X: f32 = FIELD_WIDTH;

    /// Horizontal speed at score 0 (px/tick)
    pub const BASE_SPEED: f32 = 2.5;
    /// Extra speed per point scored
    pub const SPEED_PER_POINT: f32 = 0.1;
    pub const SPEED_CAP: f32 = 6.5;
    /// Desired pixel distance between consecutive obstacles
    pub const SPAWN_SPACING: f32 = 250.0;
    /// Spawn interval never drops below this many ticks
    pub const MIN_SPAWN_INTERVAL: f32 = 45.0;

    /// Background decoration pool
    pub const DECORATION_COUNT: usize = 5;

    /// Wing oscillation rates (radians/tick)
    pub const WING_ACTIVE_RATE: f32 = 0.3;
    pub const WING_VELOCITY_FACTOR: f32 = 0.1;
    pub const WING_IDLE_RATE: f32 = 0.1;
}
