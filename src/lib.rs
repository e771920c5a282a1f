//! Jetlane - a lane-based jetpack runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `settings`: Difficulty presets and visual-mode configuration
//! - `highscores`: In-memory session score board
//! - `input`: Debounced intent filter over raw key state
//! - `scene`: Contracts for the rendering/asset collaborators

pub mod highscores;
pub mod input;
pub mod scene;
pub mod settings;
pub mod sim;

pub use highscores::ScoreBoard;
pub use settings::{Difficulty, Settings, VisualMode};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Lateral lane coordinates, left to right
    pub const LANES: [f32; 3] = [-2.0, 0.0, 2.0];
    pub const LANE_COUNT: usize = LANES.len();

    /// Vertical bounds of the corridor
    pub const GROUND_Y: f32 = 1.0;
    pub const CEILING_Y: f32 = 10.0;
    pub const ROOM_HEIGHT: f32 = CEILING_Y - GROUND_Y;

    /// Player physics
    pub const GRAVITY: f32 = -35.0;
    pub const JETPACK_FORCE: f32 = 55.0;
    /// Duration of a lane switch in seconds
    pub const LANE_SWITCH_TIME: f32 = 0.2;

    /// Player collision box (full extents 1 x 2 x 1)
    pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 1.0, 0.5);
    /// Where the player rests between runs
    pub const PLAYER_REST_Y: f32 = 2.0;

    /// Obstacle field
    pub const SPAWN_Z: f32 = -60.0;
    /// Obstacles past this z are behind the player and get culled
    pub const DESPAWN_Z: f32 = 10.0;
    pub const OBSTACLE_DEPTH: f32 = 1.0;
    pub const THREE_LANE_WIDTH: f32 = 6.0;
    pub const CYLINDER_RADIUS: f32 = 0.5;
    /// Spawn interval before the speed-based shrink is applied
    pub const BASE_SPAWN_INTERVAL: f32 = 1.5;
    /// Score required before rocket attacks join the draw pool
    pub const ROCKET_SCORE_THRESHOLD: f32 = 750.0;

    /// Speed ramp cap above the difficulty base speed
    pub const MAX_SPEED_OFFSET: f32 = 80.0;

    /// State machine timing
    pub const TRANSITION_DURATION: f32 = 1.0;
    pub const POST_COLLISION_PAUSE_DURATION: f32 = 1.5;
    /// Descent rate of the game-end fall-back animation
    pub const MENU_FALL_SPEED: f32 = 5.0;

    /// Largest dt a single tick will integrate (tab-suspension guard)
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Camera framing
    pub const CAMERA_LANE_OFFSET: f32 = 1.2;
    pub const CAMERA_Y_OFFSET: f32 = 3.0;
    pub const CAMERA_LERP: f32 = 0.08;
    pub const GAME_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 4.0, 8.0);
    pub const GAME_CAMERA_LOOK: Vec3 = Vec3::new(0.0, 0.8, -10.0);
    pub const MENU_CAMERA_POSITION: Vec3 = Vec3::new(-3.5, 2.0, 0.0);
    pub const MENU_CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.5, 0.0);
}

/// The cubic ease `t * t * (3 - 2t)` for perceptually smooth interpolation
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        // Out-of-range inputs clamp
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(2.0), 1.0);
    }

    #[test]
    fn test_smoothstep_eases() {
        // Slower than linear near the ends, symmetric about the middle
        assert!(smoothstep(0.1) < 0.1);
        assert!(smoothstep(0.9) > 0.9);
        assert!((smoothstep(0.25) + smoothstep(0.75) - 1.0).abs() < 1e-6);
    }
}
