//! Per-tick simulation step
//!
//! Advances the session in a strict order: speed and score, backdrop,
//! obstacle and rocket advance (with their collision checks), lane
//! intents, player kinematics, camera. A collision ends the tick before
//! the player and camera updates run.

use super::player::MovementIntent;
use super::state::{GamePhase, GameSession};
use crate::consts::*;

/// Input intents for a single tick, already debounced upstream
///
/// `left`/`right` are one-shot triggers; `lift` is a continuous hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Step one lane left
    pub left: bool,
    /// Step one lane right
    pub right: bool,
    /// Jetpack thrust held
    pub lift: bool,
    /// Start a run from the menu
    pub start: bool,
}

/// Advance the session by one simulation step of `dt` seconds.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    // A stalled or suspended clock must not feed the integrators
    let dt = sanitize_dt(dt);

    match session.phase {
        GamePhase::Menu => {
            session.camera = super::state::Camera::menu();
            if input.start {
                session.start_run(session.difficulty);
            }
        }

        GamePhase::Transition => {
            session.transition_timer += dt;
            session.update_transition_camera();
            if session.transition_timer >= TRANSITION_DURATION {
                session.run_time = 0.0;
                session.phase = GamePhase::Running;
            }
        }

        GamePhase::Running => {
            session.run_time += dt;

            // Speed ramps toward a time-based target, capped above the base
            let tuning = session.difficulty;
            let target = tuning.base_speed() + session.run_time * tuning.acceleration() * 10.0;
            session.game_speed = target.min(tuning.base_speed() + MAX_SPEED_OFFSET);

            session.score += session.game_speed * 0.5 * tuning.score_multiplier() * dt;

            session.backdrop.advance(dt, session.game_speed);

            let hit = session.spawner.advance(
                dt,
                &session.player,
                session.game_speed,
                session.score,
            );
            if hit {
                session.enter_post_collision_pause();
                return;
            }

            if input.left {
                session.player.move_left();
            }
            if input.right {
                session.player.move_right();
            }
            session.player.update(
                dt,
                MovementIntent {
                    lift_held: input.lift,
                },
                session.game_speed,
            );

            session.update_game_camera();
        }

        GamePhase::PostCollisionPause => {
            session.pause_timer += dt;
            if session.pause_timer >= POST_COLLISION_PAUSE_DURATION {
                session.enter_game_end();
            }
        }

        GamePhase::GameEnd => {
            session.player.y -= MENU_FALL_SPEED * dt;
            if session.player.y <= PLAYER_REST_Y {
                session.player.y = PLAYER_REST_Y;
                session.enter_menu();
            }
        }
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_TICK_DT)
}
