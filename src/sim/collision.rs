//! Collision detection between the avatar and the world
//!
//! The avatar is tested as an axis-aligned box of half-size `avatar_radius`
//! around its centre. Obstacles are two boxes sharing a column: everything
//! above `top_height` and everything below `bottom_y`.

use super::state::{Avatar, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Avatar extents at its fixed X
pub fn avatar_bounds(avatar: &Avatar, tuning: &Tuning) -> Bounds {
    let r = tuning.avatar_radius;
    Bounds {
        left: tuning.avatar_x - r,
        right: tuning.avatar_x + r,
        top: avatar.y - r,
        bottom: avatar.y + r,
    }
}

/// Check the avatar against one obstacle
///
/// Requires strict horizontal overlap, then a hit on either segment.
pub fn obstacle_hit(bounds: &Bounds, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let overlaps_column =
        bounds.right > obstacle.x && bounds.left < obstacle.trailing_edge(tuning);
    if !overlaps_column {
        return false;
    }
    bounds.top < obstacle.top_height || bounds.bottom > obstacle.bottom_y
}

/// Avatar has touched the ground band
pub fn ground_hit(bounds: &Bounds, tuning: &Tuning) -> bool {
    bounds.bottom > tuning.ground_line()
}

/// Trailing edge of the obstacle is behind the avatar's fixed X
pub fn cleared(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    obstacle.trailing_edge(tuning) < tuning.avatar_x
}
