//! Per-frame simulation step
//!
//! Commands are applied first, then the phases run in a fixed order:
//!   1. Environment (decorations drift and wrap, wing phase)
//!   2. Avatar kinematics (gravity, ceiling clamp, ground contact)
//!   3. Obstacle lifecycle (spawn, advance)
//!   4. Collision and scoring, then pruning
//!
//! A collision anywhere in phases 2-4 discards the tentative frame: the
//! outcome is the post-command snapshot moved to `Ended`.

use std::f32::consts::TAU;

use rand::Rng;

use super::collision::{avatar_bounds, cleared, ground_hit, obstacle_hit};
use super::spawn::{effective_speed, spawn_interval, spawn_obstacle};
use super::state::{DeathCause, GameEvent, GameState, SessionStatus};
use crate::autopilot;
use crate::tuning::Tuning;

/// Commands observed since the previous step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    /// Start (or restart) a session
    pub start: bool,
    /// Apply an upward impulse
    pub impulse: bool,
    /// Demo mode - the autopilot decides impulses
    pub autopilot: bool,
}

/// Result of a single step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Advance the game by one frame
///
/// The previous state is left untouched.
pub fn step<R: Rng + ?Sized>(
    prev: &GameState,
    input: &StepInput,
    tuning: &Tuning,
    rng: &mut R,
) -> StepOutcome {
    let mut events = Vec::new();
    let mut state = prev.clone();

    apply_commands(&mut state, input, tuning, &mut events);

    // Anything past this point is discarded if the avatar dies
    let committed = state.clone();

    update_environment(&mut state, tuning);

    if state.status == SessionStatus::Active {
        if let Some(cause) = advance_active(&mut state, tuning, rng, &mut events) {
            let mut ended = committed;
            events.retain(|e| !matches!(e, GameEvent::Scored { .. }));
            let score = ended.score;
            let new_best = ended.end_session();
            events.push(GameEvent::Died {
                score,
                best: ended.best,
                new_best,
                cause,
            });
            return StepOutcome {
                state: ended,
                events,
            };
        }
    }

    StepOutcome { state, events }
}

fn apply_commands(
    state: &mut GameState,
    input: &StepInput,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    if input.start && state.status.can_start() {
        state.reset_session(tuning);
        events.push(GameEvent::Started);
    }

    let impulse = input.impulse
        || (input.autopilot
            && state.status.can_impulse()
            && autopilot::wants_impulse(state, tuning));

    if impulse && state.status.can_impulse() {
        state.avatar.impulse(tuning);
        state.status = SessionStatus::Active;
        events.push(GameEvent::Jumped);
    }
}

/// Phase 1: background and cosmetics
fn update_environment(state: &mut GameState, tuning: &Tuning) {
    if matches!(state.status, SessionStatus::Ready | SessionStatus::Active) {
        for deco in &mut state.decorations {
            deco.drift(tuning.field_width);
        }
    }

    let rate = if state.status == SessionStatus::Active {
        tuning.wing_active_rate + state.avatar.velocity.abs() * tuning.wing_velocity_factor
    } else {
        tuning.wing_idle_rate
    };
    state.avatar.wing_phase = (state.avatar.wing_phase + rate).rem_euclid(TAU);
}

/// Phases 2-4. Returns the cause if the avatar died this tick.
fn advance_active<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<DeathCause> {
    // Difficulty is fixed by the score at the start of the tick
    let speed = effective_speed(state.score, tuning);
    let interval = spawn_interval(state.score, tuning);

    // Avatar kinematics
    state.avatar.velocity += tuning.gravity;
    state.avatar.y += state.avatar.velocity;
    state.avatar.clamp_ceiling(tuning);
    let bounds = avatar_bounds(&state.avatar, tuning);
    if ground_hit(&bounds, tuning) {
        return Some(DeathCause::Ground);
    }

    // Obstacle lifecycle
    state.spawn_timer += 1;
    if state.spawn_timer as f32 >= interval {
        state.obstacles.push(spawn_obstacle(tuning, rng));
        state.spawn_timer = 0;
    }
    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }

    // Collision and scoring, in list order
    for (index, obstacle) in state.obstacles.iter_mut().enumerate() {
        if obstacle_hit(&bounds, obstacle, tuning) {
            return Some(DeathCause::Obstacle { index });
        }
        if !obstacle.passed && cleared(obstacle, tuning) {
            obstacle.passed = true;
            state.score += 1;
            events.push(GameEvent::Scored { score: state.score });
        }
    }

    state.obstacles.retain(|o| !o.is_offscreen(tuning));
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn fresh(best: u32) -> (GameState, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(12345);
        let state = GameState::new(best, &tuning, &mut rng);
        (state, tuning, rng)
    }

    const START: StepInput = StepInput {
        start: true,
        impulse: false,
        autopilot: false,
    };
    const IMPULSE: StepInput = StepInput {
        start: false,
        impulse: true,
        autopilot: false,
    };
    const NONE: StepInput = StepInput {
        start: false,
        impulse: false,
        autopilot: false,
    };

    fn run(state: &GameState, input: &StepInput, tuning: &Tuning, rng: &mut Pcg32) -> GameState {
        step(state, input, tuning, rng).state
    }

    #[test]
    fn test_idle_to_ready_to_active() {
        let (state, tuning, mut rng) = fresh(0);
        assert_eq!(state.status, SessionStatus::Idle);

        // Impulse is ignored while idle
        let state = run(&state, &IMPULSE, &tuning, &mut rng);
        assert_eq!(state.status, SessionStatus::Idle);

        let outcome = step(&state, &START, &tuning, &mut rng);
        assert_eq!(outcome.state.status, SessionStatus::Ready);
        assert_eq!(outcome.events, vec![GameEvent::Started]);

        // Ready holds the avatar still
        let ready = run(&outcome.state, &NONE, &tuning, &mut rng);
        assert_eq!(ready.avatar.y, tuning.avatar_rest_y);
        assert_eq!(ready.avatar.velocity, 0.0);

        let outcome = step(&ready, &IMPULSE, &tuning, &mut rng);
        assert_eq!(outcome.state.status, SessionStatus::Active);
        assert_eq!(outcome.events, vec![GameEvent::Jumped]);
        // Impulse then one tick of gravity
        assert!((outcome.state.avatar.velocity - (-8.0 + 0.4)).abs() < 1e-5);
        assert!((outcome.state.avatar.y - (300.0 - 7.6)).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_accumulates() {
        let (state, tuning, mut rng) = fresh(0);
        let state = run(&state, &START, &tuning, &mut rng);
        let mut state = run(&state, &IMPULSE, &tuning, &mut rng);
        for _ in 0..10 {
            let next = run(&state, &NONE, &tuning, &mut rng);
            assert!((next.avatar.velocity - state.avatar.velocity - tuning.gravity).abs() < 1e-5);
            assert!((next.avatar.y - (state.avatar.y + next.avatar.velocity)).abs() < 1e-4);
            state = next;
        }
    }

    #[test]
    fn test_ceiling_is_soft() {
        let (state, tuning, mut rng) = fresh(0);
        let mut state = run(&state, &START, &tuning, &mut rng);
        state.avatar.y = 25.0;
        let state = run(&state, &IMPULSE, &tuning, &mut rng);
        assert_eq!(state.status, SessionStatus::Active);
        assert_eq!(state.avatar.y, tuning.avatar_radius);
        assert_eq!(state.avatar.velocity, 0.0);
    }

    #[test]
    fn test_ground_contact_ends_same_tick() {
        let (state, tuning, mut rng) = fresh(5);
        let mut state = run(&state, &START, &tuning, &mut rng);
        state.status = SessionStatus::Active;
        state.avatar.y = 499.0;
        state.avatar.velocity = 1.0;
        state.score = 3;

        let outcome = step(&state, &NONE, &tuning, &mut rng);
        assert_eq!(outcome.state.status, SessionStatus::Ended);
        assert_eq!(outcome.state.best, 5);
        // Frame discarded: avatar stays where it was
        assert_eq!(outcome.state.avatar.y, 499.0);
        assert_eq!(
            outcome.events,
            vec![GameEvent::Died {
                score: 3,
                best: 5,
                new_best: false,
                cause: DeathCause::Ground,
            }]
        );
    }

    #[test]
    fn test_new_best_on_death() {
        let (state, tuning, mut rng) = fresh(5);
        let mut state = run(&state, &START, &tuning, &mut rng);
        state.status = SessionStatus::Active;
        state.avatar.y = 510.0;
        state.score = 8;
        let outcome = step(&state, &NONE, &tuning, &mut rng);
        assert_eq!(outcome.state.best, 8);
        assert!(matches!(
            outcome.events.last(),
            Some(GameEvent::Died { new_best: true, best: 8, .. })
        ));
    }

    #[test]
    fn test_ended_ignores_impulse() {
        let (state, tuning, mut rng) = fresh(0);
        let mut state = run(&state, &START, &tuning, &mut rng);
        state.status = SessionStatus::Ended;
        let after = step(&state, &IMPULSE, &tuning, &mut rng);
        assert_eq!(after.state.status, SessionStatus::Ended);
        assert!(after.events.is_empty());

        let restarted = run(&after.state, &START, &tuning, &mut rng);
        assert_eq!(restarted.status, SessionStatus::Ready);
        assert_eq!(restarted.score, 0);
        assert!(restarted.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_after_interval() {
        let (state, tuning, mut rng) = fresh(0);
        let state = run(&state, &START, &tuning, &mut rng);
        let mut state = run(&state, &IMPULSE, &tuning, &mut rng);
        assert_eq!(state.spawn_timer, 1);

        // Keep the avatar aloft so it never touches the ground
        while state.spawn_timer < 99 {
            state.avatar.y = 300.0;
            state.avatar.velocity = 0.0;
            state = run(&state, &NONE, &tuning, &mut rng);
            assert!(state.obstacles.is_empty());
        }
        state.avatar.y = 300.0;
        state.avatar.velocity = 0.0;
        let state = run(&state, &NONE, &tuning, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0);
        // Spawned then advanced in the same tick
        assert_eq!(state.obstacles[0].x, tuning.spawn_x - tuning.base_speed);
    }

    #[test]
    fn test_scores_once_per_obstacle() {
        let (state, tuning, mut rng) = fresh(0);
        let mut state = run(&state, &START, &tuning, &mut rng);
        state.status = SessionStatus::Active;
        // Already behind the avatar X, scores on the first tick
        state.obstacles.push(Obstacle {
            x: -39.0,
            top_height: 100.0,
            bottom_y: 260.0,
            passed: false,
        });

        state.avatar.y = 180.0;
        state.avatar.velocity = -0.4;
        let outcome = step(&state, &NONE, &tuning, &mut rng);
        assert_eq!(outcome.state.score, 1);
        assert!(outcome.state.obstacles[0].passed);
        assert_eq!(outcome.events, vec![GameEvent::Scored { score: 1 }]);

        let mut state = outcome.state;
        state.avatar.velocity = -0.4;
        let outcome = step(&state, &NONE, &tuning, &mut rng);
        assert_eq!(outcome.state.score, 1);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_collision_discards_score() {
        let (state, tuning, mut rng) = fresh(0);
        let mut state = run(&state, &START, &tuning, &mut rng);
        state.status = SessionStatus::Active;
        state.avatar.y = 180.0;
        state.avatar.velocity = -0.4;
        // First scores this tick, second is a wall at the avatar
        state.obstacles.push(Obstacle {
            x: -39.0,
            top_height: 100.0,
            bottom_y: 260.0,
            passed: false,
        });
        state.obstacles.push(Obstacle {
            x: 70.0,
            top_height: 400.0,
            bottom_y: 560.0,
            passed: false,
        });

        let outcome = step(&state, &NONE, &tuning, &mut rng);
        assert_eq!(outcome.state.status, SessionStatus::Ended);
        assert_eq!(outcome.state.score, 0);
        assert_eq!(outcome.state.obstacles, state.obstacles);
        assert_eq!(
            outcome.events,
            vec![GameEvent::Died {
                score: 0,
                best: 0,
                new_best: false,
                cause: DeathCause::Obstacle { index: 1 },
            }]
        );
    }

    #[test]
    fn test_prune_at_boundary() {
        let (state, tuning, mut rng) = fresh(0);
        let mut state = run(&state, &START, &tuning, &mut rng);
        state.status = SessionStatus::Active;
        state.avatar.y = 300.0;
        state.avatar.velocity = -0.4;
        // Lands exactly on x + width == 0 after this tick
        state.obstacles.push(Obstacle {
            x: -57.5,
            top_height: 100.0,
            bottom_y: 260.0,
            passed: true,
        });
        state.obstacles.push(Obstacle {
            x: 200.0,
            top_height: 100.0,
            bottom_y: 260.0,
            passed: false,
        });

        let state = run(&state, &NONE, &tuning, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 197.5);
    }

    #[test]
    fn test_wing_phase_never_touches_physics() {
        let (state, tuning, mut rng) = fresh(0);
        let idle = run(&state, &NONE, &tuning, &mut rng);
        assert!((idle.avatar.wing_phase - tuning.wing_idle_rate).abs() < 1e-6);
        assert_eq!(idle.avatar.y, state.avatar.y);
        // Decorations hold still while idle
        assert_eq!(idle.decorations, state.decorations);
    }

    #[test]
    fn test_previous_state_untouched() {
        let (state, tuning, mut rng) = fresh(0);
        let state = run(&state, &START, &tuning, &mut rng);
        let snapshot = state.clone();
        let _ = step(&state, &IMPULSE, &tuning, &mut rng);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut s1 = GameState::new(0, &tuning, &mut rng1);
        let mut s2 = GameState::new(0, &tuning, &mut rng2);

        let demo = StepInput {
            start: true,
            impulse: false,
            autopilot: true,
        };
        for _ in 0..600 {
            s1 = step(&s1, &demo, &tuning, &mut rng1).state;
            s2 = step(&s2, &demo, &tuning, &mut rng2).state;
        }
        assert_eq!(s1, s2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn decode(code: u8) -> StepInput {
            match code {
                0 => START,
                1..=3 => IMPULSE,
                _ => NONE,
            }
        }

        proptest! {
            #[test]
            fn velocity_grows_by_gravity(
                seed in 0u64..500,
                codes in proptest::collection::vec(0u8..12, 50..300)
            ) {
                let tuning = Tuning::default();
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut state = GameState::new(0, &tuning, &mut rng);

                for code in codes {
                    let out = step(&state, &decode(code), &tuning, &mut rng);
                    let steady = state.status == SessionStatus::Active
                        && out.state.status == SessionStatus::Active
                        && !out.events.contains(&GameEvent::Jumped);
                    if steady {
                        let v = out.state.avatar.velocity;
                        let clamped = v == 0.0 && out.state.avatar.y == tuning.avatar_radius;
                        prop_assert!(
                            clamped || v == state.avatar.velocity + tuning.gravity,
                            "velocity {} after {}",
                            v,
                            state.avatar.velocity
                        );
                    }
                    state = out.state;
                }
            }

            #[test]
            fn score_and_best_only_grow(
                seed in 0u64..500,
                codes in proptest::collection::vec(0u8..12, 50..400)
            ) {
                let tuning = Tuning::default();
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut state = GameState::new(3, &tuning, &mut rng);

                for code in codes {
                    let out = step(&state, &decode(code), &tuning, &mut rng);
                    let restarted = out.events.contains(&GameEvent::Started);
                    if !restarted {
                        prop_assert!(out.state.score >= state.score);
                    }
                    prop_assert!(out.state.best >= state.best);
                    if out.state.status == SessionStatus::Ended {
                        prop_assert_eq!(out.state.best, state.best.max(out.state.score));
                    }
                    for event in &out.events {
                        if let GameEvent::Died { score, best, new_best, .. } = *event {
                            prop_assert_eq!(best, state.best.max(score));
                            prop_assert_eq!(new_best, score > state.best);
                        }
                    }
                    state = out.state;
                }
            }

            #[test]
            fn ended_ignores_impulse(
                seed in 0u64..500,
                flaps in 1usize..4
            ) {
                let tuning = Tuning::default();
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut state = GameState::new(0, &tuning, &mut rng);
                state = run(&state, &START, &tuning, &mut rng);
                for _ in 0..flaps {
                    state = run(&state, &IMPULSE, &tuning, &mut rng);
                }
                while state.status != SessionStatus::Ended {
                    state = run(&state, &NONE, &tuning, &mut rng);
                }

                let mut rng_a = rng.clone();
                let mut rng_b = rng;
                let flapped = step(&state, &IMPULSE, &tuning, &mut rng_a);
                let idle = step(&state, &NONE, &tuning, &mut rng_b);
                prop_assert!(flapped.events.is_empty());
                prop_assert_eq!(flapped.state, idle.state);
            }

            #[test]
            fn world_stays_in_bounds(
                seed in 0u64..500,
                codes in proptest::collection::vec(0u8..12, 100..600)
            ) {
                let tuning = Tuning::default();
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut state = GameState::new(0, &tuning, &mut rng);

                for code in codes {
                    let input = StepInput { autopilot: code % 2 == 0, ..decode(code) };
                    state = step(&state, &input, &tuning, &mut rng).state;

                    prop_assert_eq!(state.decorations.len(), tuning.decoration_count);
                    for deco in &state.decorations {
                        prop_assert!(deco.pos.x >= -2.0 * deco.size);
                        prop_assert!(deco.pos.x <= tuning.field_width + deco.size);
                    }
                    for obstacle in &state.obstacles {
                        prop_assert!(obstacle.top_height >= tuning.min_gap_y());
                        prop_assert!(obstacle.top_height <= tuning.max_gap_y());
                        prop_assert!((obstacle.gap_size() - tuning.gap_size).abs() < 1e-3);
                        prop_assert!(obstacle.trailing_edge(&tuning) > 0.0);
                    }
                }
            }
        }
    }
}
