//! Player kinematics: jetpack vertical physics and lane sliding

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obb::{CollisionShape, Transform};
use crate::consts::*;
use crate::smoothstep;

/// Per-tick movement intent derived from input
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementIntent {
    /// Jetpack thrust held this tick
    pub lift_held: bool,
}

/// The player avatar's simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Current lane index, always within `[0, LANE_COUNT)`
    pub lane: usize,
    pub current_x: f32,
    pub target_x: f32,
    start_x: f32,
    /// Vertical position of the box center
    pub y: f32,
    pub velocity_y: f32,
    /// A new switch cannot start while one is active
    pub switching: bool,
    lane_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            lane: 1,
            current_x: LANES[1],
            target_x: LANES[1],
            start_x: LANES[1],
            y: PLAYER_REST_Y,
            velocity_y: 0.0,
            switching: false,
            lane_timer: 0.0,
        }
    }

    /// Integrate one tick of vertical physics and lane sliding.
    ///
    /// Gravity and thrust scale with a weight factor derived from the
    /// world speed, so the character handles heavier at high speed.
    /// Thrust doubles while still falling, which shortens recoveries.
    pub fn update(&mut self, dt: f32, intent: MovementIntent, game_speed: f32) {
        let weight = 1.0 + (game_speed - 10.0) * 0.05;

        if intent.lift_held {
            if self.velocity_y < 0.0 {
                self.velocity_y += JETPACK_FORCE * dt * 2.0 * weight;
            }
            self.velocity_y += JETPACK_FORCE * dt * weight;
        }

        self.velocity_y += GRAVITY * dt * weight;
        self.y += self.velocity_y * dt;

        // Inelastic contact with floor and ceiling
        if self.y < GROUND_Y {
            self.y = GROUND_Y;
            self.velocity_y = 0.0;
        }
        if self.y > CEILING_Y {
            self.y = CEILING_Y;
            self.velocity_y = 0.0;
        }

        if self.switching {
            self.lane_timer += dt;
            let t = (self.lane_timer / LANE_SWITCH_TIME).min(1.0);
            self.current_x = self.start_x + (self.target_x - self.start_x) * smoothstep(t);

            if t >= 1.0 {
                self.switching = false;
                self.current_x = self.target_x;
            }
        }
    }

    /// Step one lane left. No-op while a switch is active or at the edge.
    pub fn move_left(&mut self) {
        if self.switching || self.lane == 0 {
            return;
        }
        self.lane -= 1;
        self.start_switch();
    }

    /// Step one lane right. No-op while a switch is active or at the edge.
    pub fn move_right(&mut self) {
        if self.switching || self.lane == LANE_COUNT - 1 {
            return;
        }
        self.lane += 1;
        self.start_switch();
    }

    fn start_switch(&mut self) {
        self.switching = true;
        self.lane_timer = 0.0;
        self.start_x = self.current_x;
        self.target_x = LANES[self.lane];
    }

    /// World position of the player's center
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.current_x, self.y, 0.0)
    }

    /// Authoritative collision shape (a 1 x 2 x 1 box)
    pub fn collision_shape(&self) -> CollisionShape {
        CollisionShape::Box {
            half_extents: PLAYER_HALF_EXTENTS,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position())
    }

    /// Put the player back in the center lane at the given height
    pub fn reset(&mut self, y: f32) {
        *self = Self::new();
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 120.0;

    #[test]
    fn test_move_at_boundary_is_noop() {
        let mut player = Player::new();
        player.move_left();
        finish_switch(&mut player);
        assert_eq!(player.lane, 0);

        player.move_left();
        assert_eq!(player.lane, 0);
        assert!(!player.switching);
    }

    #[test]
    fn test_no_switch_while_switching() {
        let mut player = Player::new();
        player.move_left();
        assert!(player.switching);

        // A second command mid-switch must not retarget
        player.move_right();
        assert_eq!(player.lane, 0);
        assert_eq!(player.target_x, LANES[0]);
    }

    #[test]
    fn test_switch_monotone_and_exact() {
        let mut player = Player::new();
        player.move_right();

        let mut previous = player.current_x;
        for _ in 0..30 {
            player.update(DT, MovementIntent::default(), 15.0);
            assert!(player.current_x >= previous);
            previous = player.current_x;
        }
        assert!(!player.switching);
        assert_eq!(player.current_x, LANES[2]);
    }

    #[test]
    fn test_vertical_clamp_zeroes_velocity() {
        let mut player = Player::new();
        // Fall to the floor
        for _ in 0..240 {
            player.update(DT, MovementIntent::default(), 15.0);
        }
        assert_eq!(player.y, GROUND_Y);
        assert_eq!(player.velocity_y, 0.0);

        // Thrust to the ceiling
        for _ in 0..600 {
            player.update(DT, MovementIntent { lift_held: true }, 15.0);
        }
        assert_eq!(player.y, CEILING_Y);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn test_falling_thrust_doubles() {
        let game_speed = 15.0;
        let mut falling = Player::new();
        falling.velocity_y = -5.0;
        falling.update(DT, MovementIntent { lift_held: true }, game_speed);

        let mut rising = Player::new();
        rising.velocity_y = 5.0;
        rising.update(DT, MovementIntent { lift_held: true }, game_speed);

        // Same thrust input gains more velocity while falling
        assert!(falling.velocity_y - (-5.0) > rising.velocity_y - 5.0);
    }

    fn finish_switch(player: &mut Player) {
        for _ in 0..30 {
            player.update(DT, MovementIntent::default(), 15.0);
        }
    }

    proptest! {
        #[test]
        fn prop_lane_index_stays_in_bounds(moves in prop::collection::vec(any::<bool>(), 0..200)) {
            let mut player = Player::new();
            for go_left in moves {
                if go_left {
                    player.move_left();
                } else {
                    player.move_right();
                }
                finish_switch(&mut player);
                prop_assert!(player.lane < LANE_COUNT);
                prop_assert_eq!(player.current_x, LANES[player.lane]);
            }
        }

        #[test]
        fn prop_vertical_position_stays_clamped(lifts in prop::collection::vec(any::<bool>(), 1..400)) {
            let mut player = Player::new();
            for lift_held in lifts {
                player.update(DT, MovementIntent { lift_held }, 40.0);
                prop_assert!(player.y >= GROUND_Y);
                prop_assert!(player.y <= CEILING_Y);
            }
        }
    }
}
