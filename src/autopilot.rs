//! Demo mode - a simple policy that plays the game
//!
//! Aims just below the centre of the next gap that is still ahead of the avatar's
//! trailing side, and flaps whenever the avatar has sunk below that target
//! while falling.

use crate::sim::state::{GameState, SessionStatus};
use crate::tuning::Tuning;

/// How far below the target the avatar may drift before flapping
const SLACK: f32 = 12.0;

/// Vertical position the autopilot is steering toward
pub fn target_y(state: &GameState, tuning: &Tuning) -> f32 {
    let avatar_left = tuning.avatar_x - tuning.avatar_radius;
    state
        .obstacles
        .iter()
        .filter(|o| o.trailing_edge(tuning) >= avatar_left)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        // Aim slightly below centre; an impulse overshoots upward
        .map(|o| o.top_height + o.gap_size() * 0.6)
        .unwrap_or(tuning.avatar_rest_y)
}

/// Decide whether to apply an impulse this tick
pub fn wants_impulse(state: &GameState, tuning: &Tuning) -> bool {
    match state.status {
        SessionStatus::Ready => true,
        SessionStatus::Active => {
            let predicted = state.avatar.y + state.avatar.velocity + tuning.gravity;
            state.avatar.velocity >= 0.0 && predicted > target_y(state, tuning) + SLACK
        }
        SessionStatus::Idle | SessionStatus::Ended => false,
    }
}
