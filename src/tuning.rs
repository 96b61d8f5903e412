//! Physics table
//!
//! Built once by the host and passed by reference into every step.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Fixed simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,
    pub gravity: f32,
    pub impulse_velocity: f32,
    pub avatar_radius: f32,
    pub avatar_x: f32,
    pub avatar_rest_y: f32,
    pub obstacle_width: f32,
    pub gap_size: f32,
    pub gap_margin: f32,
    pub spawn_x: f32,
    pub base_speed: f32,
    pub speed_per_point: f32,
    pub speed_cap: f32,
    pub spawn_spacing: f32,
    pub min_spawn_interval: f32,
    pub decoration_count: usize,
    pub wing_active_rate: f32,
    pub wing_velocity_factor: f32,
    pub wing_idle_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,
            avatar_radius: AVATAR_RADIUS,
            avatar_x: AVATAR_X,
            avatar_rest_y: AVATAR_REST_Y,
            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            gap_margin: GAP_MARGIN,
            spawn_x: SPAWN_X,
            base_speed: BASE_SPEED,
            speed_per_point: SPEED_PER_POINT,
            speed_cap: SPEED_CAP,
            spawn_spacing: SPAWN_SPACING,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            decoration_count: DECORATION_COUNT,
            wing_active_rate: WING_ACTIVE_RATE,
            wing_velocity_factor: WING_VELOCITY_FACTOR,
            wing_idle_rate: WING_IDLE_RATE,
        }
    }
}

impl Tuning {
    /// Y coordinate of the top of the ground band
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Lowest allowed top-segment height
    #[inline]
    pub fn min_gap_y(&self) -> f32 {
        self.gap_margin
    }

    /// Highest allowed top-segment height (gap stays above the ground)
    #[inline]
    pub fn max_gap_y(&self) -> f32 {
        self.ground_line() - self.gap_size - self.gap_margin
    }
}
