//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawn::scatter_decorations;
use crate::tuning::Tuning;

/// Session status, the sole gate for which phases run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No session yet
    #[default]
    Idle,
    /// Session started, avatar suspended until the first impulse
    Ready,
    /// Simulation running
    Active,
    /// Run ended
    Ended,
}

impl SessionStatus {
    /// Start command is accepted
    pub fn can_start(self) -> bool {
        matches!(self, SessionStatus::Idle | SessionStatus::Ended)
    }

    /// Impulse command is accepted
    pub fn can_impulse(self) -> bool {
        matches!(self, SessionStatus::Ready | SessionStatus::Active)
    }
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Vertical centre (px, downward)
    pub y: f32,
    /// Vertical velocity (px/tick, negative is up)
    pub velocity: f32,
    /// Cosmetic wing oscillation phase (radians), never read by physics
    pub wing_phase: f32,
}

impl Avatar {
    pub fn at_rest(tuning: &Tuning) -> Self {
        Self {
            y: tuning.avatar_rest_y,
            velocity: 0.0,
            wing_phase: 0.0,
        }
    }

    /// Set velocity to the fixed upward value, whatever it was
    pub fn impulse(&mut self, tuning: &Tuning) {
        self.velocity = tuning.impulse_velocity;
    }

    /// Clamp against the ceiling. Returns true if a clamp happened.
    pub fn clamp_ceiling(&mut self, tuning: &Tuning) -> bool {
        if self.y - tuning.avatar_radius < 0.0 {
            self.y = tuning.avatar_radius;
            self.velocity = 0.0;
            true
        } else {
            false
        }
    }
}

/// A pair of segments with a gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the top segment (top edge of the gap)
    pub top_height: f32,
    /// Where the bottom segment starts (bottom edge of the gap)
    pub bottom_y: f32,
    /// Scored already; never cleared once set
    pub passed: bool,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn trailing_edge(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.obstacle_width
    }

    #[inline]
    pub fn gap_size(&self) -> f32 {
        self.bottom_y - self.top_height
    }

    /// Fully off the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self, tuning: &Tuning) -> bool {
        self.trailing_edge(tuning) <= 0.0
    }
}

/// A background filler element; recycled instead of destroyed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub pos: Vec2,
    pub size: f32,
    /// Leftward drift (px/tick)
    pub speed: f32,
}

impl Decoration {
    /// Drift left, wrapping to the right edge once well past the left edge
    pub fn drift(&mut self, field_width: f32) {
        let next = self.pos.x - self.speed;
        if next < -self.size * 2.0 {
            self.pos.x = field_width + self.size;
        } else {
            self.pos.x = next;
        }
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Ground,
    /// Index into the obstacle list of the first obstacle hit
    Obstacle { index: usize },
}

/// Notifications emitted by a step, consumed by audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Scored { score: u32 },
    Died {
        score: u32,
        best: u32,
        new_best: bool,
        cause: DeathCause,
    },
}

/// Complete game state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub avatar: Avatar,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Fixed-size pool, filled once at construction
    pub decorations: Vec<Decoration>,
    pub score: u32,
    /// Best score across sessions
    pub best: u32,
    pub status: SessionStatus,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
}

impl GameState {
    /// Create an idle state with a freshly scattered decoration pool
    pub fn new<R: Rng + ?Sized>(best: u32, tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            avatar: Avatar::at_rest(tuning),
            obstacles: Vec::new(),
            decorations: scatter_decorations(tuning, rng),
            score: 0,
            best,
            status: SessionStatus::Idle,
            spawn_timer: 0,
        }
    }

    /// Put the session into `Ready`: avatar at rest, no obstacles, score zeroed
    pub fn reset_session(&mut self, tuning: &Tuning) {
        self.avatar = Avatar::at_rest(tuning);
        self.obstacles.clear();
        self.score = 0;
        self.spawn_timer = 0;
        self.status = SessionStatus::Ready;
    }

    /// Move to `Ended`, folding the score into the best. Returns true on a new best.
    pub fn end_session(&mut self) -> bool {
        let new_best = self.score > self.best;
        self.best = self.best.max(self.score);
        self.status = SessionStatus::Ended;
        new_best
    }
}
