//! Difficulty scaling and procedural placement
//!
//! Speed grows with score; the spawn interval shrinks with it so the
//! spatial distance between obstacles stays close to `spawn_spacing`.

use glam::Vec2;
use rand::Rng;

use super::state::{Decoration, Obstacle};
use crate::tuning::Tuning;

/// Horizontal speed for the current score, capped
pub fn effective_speed(score: u32, tuning: &Tuning) -> f32 {
    (tuning.base_speed + score as f32 * tuning.speed_per_point).min(tuning.speed_cap)
}

/// Ticks between spawns for the current score, floored
pub fn spawn_interval(score: u32, tuning: &Tuning) -> f32 {
    (tuning.spawn_spacing / effective_speed(score, tuning)).max(tuning.min_spawn_interval)
}

/// Build an obstacle at the spawn X from a uniform sample in `[0, 1)`
pub fn place_gap(unit: f32, tuning: &Tuning) -> Obstacle {
    let min_y = tuning.min_gap_y();
    let max_y = tuning.max_gap_y();
    let top_height = min_y + unit.clamp(0.0, 1.0) * (max_y - min_y);
    Obstacle {
        x: tuning.spawn_x,
        top_height,
        bottom_y: top_height + tuning.gap_size,
        passed: false,
    }
}

/// Spawn an obstacle with a uniformly random gap
pub fn spawn_obstacle<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Obstacle {
    place_gap(rng.random::<f32>(), tuning)
}

/// Fill the decoration pool across the upper sky
pub fn scatter_decorations<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Vec<Decoration> {
    (0..tuning.decoration_count)
        .map(|_| Decoration {
            pos: Vec2::new(
                rng.random::<f32>() * tuning.field_width,
                rng.random::<f32>() * 300.0 + 50.0,
            ),
            size: rng.random::<f32>() * 40.0 + 20.0,
            speed: rng.random::<f32>() * 0.3 + 0.2,
        })
        .collect()
}
