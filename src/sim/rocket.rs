//! Multi-phase homing rocket attacks
//!
//! Each attack telegraphs with a targeting marker that tracks the player,
//! snapshots that position exactly once, then fires a projectile from the
//! spawn depth toward the snapshot. Batch members run the same state
//! machine on staggered clocks so their phase transitions land
//! sequentially.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obb::{self, CollisionShape, Transform};
use super::player::Player;
use crate::consts::SPAWN_Z;

/// Targeting telegraph duration in seconds
const TARGETING_DURATION: f32 = 2.0;
/// Marker fade time between target lock and launch
const LAUNCH_DELAY: f32 = 0.5;
/// Clock offset between consecutive batch members
const STAGGER_INTERVAL: f32 = 1.0;
/// Projectile speed per unit of world speed
const ROCKET_BASE_SPEED: f32 = 10.0;
const ROCKET_RADIUS: f32 = 0.3;
const ROCKET_LENGTH: f32 = 5.0;
/// Projectiles outside this z range expire
const ROCKET_MIN_Z: f32 = -80.0;
const ROCKET_MAX_Z: f32 = 10.0;
/// Marker opacity while targeting
const MARKER_OPACITY: f32 = 0.8;

/// Phase of a single rocket attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RocketPhase {
    /// Marker tracks the player
    Targeting,
    /// Aim is locked, marker fading out
    Launching,
    /// Projectile traveling along its fixed direction
    InFlight,
}

/// The projectile once materialized
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    /// Unit travel direction, fixed at launch
    pub direction: Vec3,
    /// World orientation facing the travel direction
    pub orientation: Quat,
}

impl Projectile {
    /// Collision cylinder, distinct from any decorative wrapper
    pub fn collision_shape(&self) -> CollisionShape {
        CollisionShape::Cylinder {
            radius: ROCKET_RADIUS,
            half_height: ROCKET_LENGTH / 2.0,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.orientation, Vec3::ONE)
    }
}

/// A single telegraphed homing attack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketAttack {
    pub phase: RocketPhase,
    /// Phase clock; batch members start negative to stagger
    pub timer: f32,
    /// Lateral stagger distinguishing simultaneous markers
    marker_offset: f32,
    pub marker_pos: Vec3,
    /// Cosmetic marker opacity; collision never reads it
    pub marker_fade: f32,
    /// Snapshot of the marker at target lock; never retargeted
    pub target: Vec3,
    /// Target position projected back to the spawn depth
    pub launch_origin: Vec3,
    pub projectile: Option<Projectile>,
}

enum StepOutcome {
    Alive,
    Expired,
    Hit,
}

impl RocketAttack {
    fn new(index: usize) -> Self {
        let marker_offset = (index as f32 - 1.0) * 0.6;
        Self {
            phase: RocketPhase::Targeting,
            timer: -(index as f32) * STAGGER_INTERVAL,
            marker_offset,
            marker_pos: Vec3::new(0.0, 0.0, -10.0 + marker_offset),
            marker_fade: MARKER_OPACITY,
            target: Vec3::ZERO,
            launch_origin: Vec3::ZERO,
            projectile: None,
        }
    }

    fn step(&mut self, dt: f32, player: &Player, flight_speed: f32) -> StepOutcome {
        self.timer += dt;

        if self.phase == RocketPhase::Targeting {
            let p = player.position();
            self.marker_pos = Vec3::new(p.x, p.y, p.z + self.marker_offset * 4.0 - 6.0);

            if self.timer >= TARGETING_DURATION {
                // Both ends of the flight path are snapshots from here on
                self.target = self.marker_pos;
                self.launch_origin = Vec3::new(self.marker_pos.x, self.marker_pos.y, SPAWN_Z);
                self.phase = RocketPhase::Launching;
                self.timer = 0.0;
            }
        }

        if self.phase == RocketPhase::Launching {
            self.marker_pos = self.target;
            let t = (self.timer / LAUNCH_DELAY).min(1.0);
            self.marker_fade = MARKER_OPACITY * (1.0 - t);

            if self.timer >= LAUNCH_DELAY {
                self.launch();
                self.phase = RocketPhase::InFlight;
            }
        }

        if let Some(projectile) = &mut self.projectile {
            projectile.position += projectile.direction * (flight_speed * dt);

            if projectile.position.z > ROCKET_MAX_Z || projectile.position.z < ROCKET_MIN_Z {
                return StepOutcome::Expired;
            }

            let shape = projectile.collision_shape();
            let transform = projectile.transform();
            if obb::intersects(
                &player.collision_shape(),
                &player.transform(),
                &shape,
                &transform,
            ) {
                return StepOutcome::Hit;
            }
        }

        StepOutcome::Alive
    }

    fn launch(&mut self) {
        let direction = (self.target - self.launch_origin).normalize_or(Vec3::Z);
        // The cylinder axis is local Y; rotate it onto the travel direction
        let orientation = Quat::from_rotation_arc(Vec3::Z, direction) * Quat::from_rotation_x(FRAC_PI_2);
        self.projectile = Some(Projectile {
            position: self.launch_origin,
            direction,
            orientation,
        });
    }
}

/// All telegraphing and in-flight attacks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RocketSwarm {
    pub attacks: Vec<RocketAttack>,
}

impl RocketSwarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a staggered batch of 1-3 attacks
    pub fn spawn_batch(&mut self, rng: &mut Pcg32) {
        let count = rng.random_range(1..=3usize);
        for i in 0..count {
            self.attacks.push(RocketAttack::new(i));
        }
    }

    /// Advance every attack one tick. Returns true if a projectile hit
    /// the player. Terminated attacks are removed together with their
    /// markers in the same pass.
    pub fn advance(&mut self, dt: f32, player: &Player, game_speed: f32) -> bool {
        let mut collided = false;
        let flight_speed = ROCKET_BASE_SPEED * game_speed;

        let mut i = 0;
        while i < self.attacks.len() {
            match self.attacks[i].step(dt, player, flight_speed) {
                StepOutcome::Alive => i += 1,
                StepOutcome::Expired => {
                    self.attacks.remove(i);
                }
                StepOutcome::Hit => {
                    collided = true;
                    self.attacks.remove(i);
                }
            }
        }
        collided
    }

    /// Discard every attack unconditionally
    pub fn reset(&mut self) {
        self.attacks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CEILING_Y, LANES};
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn swarm_of(seed: u64) -> RocketSwarm {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut swarm = RocketSwarm::new();
        swarm.spawn_batch(&mut rng);
        swarm
    }

    #[test]
    fn test_staggered_batch_transitions_sequentially() {
        let mut swarm = RocketSwarm::new();
        for i in 0..3 {
            swarm.attacks.push(RocketAttack::new(i));
        }
        let player = Player::new();

        // After 2.1s the lead attack has locked while the rest still target
        let steps = (2.1 / DT) as usize;
        for _ in 0..steps {
            swarm.advance(DT, &player, 1.0);
        }
        assert_eq!(swarm.attacks[0].phase, RocketPhase::Launching);
        assert_eq!(swarm.attacks[1].phase, RocketPhase::Targeting);
        assert_eq!(swarm.attacks[2].phase, RocketPhase::Targeting);
    }

    #[test]
    fn test_target_snapshot_is_immutable() {
        let mut swarm = RocketSwarm::new();
        swarm.attacks.push(RocketAttack::new(0));
        let mut player = Player::new();
        player.y = 6.0;

        // Track through targeting into the launch window
        let steps = (2.2 / DT) as usize;
        for _ in 0..steps {
            swarm.advance(DT, &player, 1.0);
        }
        assert_eq!(swarm.attacks[0].phase, RocketPhase::Launching);
        let locked_target = swarm.attacks[0].target;
        let locked_origin = swarm.attacks[0].launch_origin;
        assert_eq!(locked_target.y, 6.0);
        assert_eq!(locked_origin.z, SPAWN_Z);

        // Player moves after the lock; the snapshot must not follow
        player.y = 2.0;
        player.move_left();
        for _ in 0..10 {
            swarm.advance(DT, &player, 1.0);
        }
        assert_eq!(swarm.attacks[0].target, locked_target);
        assert_eq!(swarm.attacks[0].launch_origin, locked_origin);
    }

    #[test]
    fn test_projectile_flies_and_hits_stationary_player() {
        let mut swarm = RocketSwarm::new();
        swarm.attacks.push(RocketAttack::new(0));
        let player = Player::new();

        let mut hit = false;
        for _ in 0..2000 {
            if swarm.advance(DT, &player, 2.0) {
                hit = true;
                break;
            }
        }
        assert!(hit, "rocket aimed at a stationary player must connect");
        assert!(swarm.is_empty(), "hit attack is removed with its marker");
    }

    #[test]
    fn test_projectile_expires_outside_z_range() {
        let mut swarm = RocketSwarm::new();
        swarm.attacks.push(RocketAttack::new(0));
        let mut player = Player::new();

        // Let it lock on, then dodge far enough to never collide
        let steps = (2.6 / DT) as usize;
        for _ in 0..steps {
            swarm.advance(DT, &player, 1.0);
        }
        assert_eq!(swarm.attacks[0].phase, RocketPhase::InFlight);
        player.y = CEILING_Y;
        player.current_x = LANES[0];

        let mut any_hit = false;
        for _ in 0..4000 {
            any_hit |= swarm.advance(DT, &player, 1.0);
            if swarm.is_empty() {
                break;
            }
        }
        assert!(!any_hit);
        assert!(swarm.is_empty(), "dodged projectile expires past the player");
    }

    #[test]
    fn test_batch_size_bounds() {
        for seed in 0..32 {
            let swarm = swarm_of(seed);
            assert!((1..=3).contains(&swarm.attacks.len()));
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut swarm = swarm_of(9);
        let player = Player::new();
        swarm.advance(DT, &player, 1.0);
        swarm.reset();
        assert!(swarm.is_empty());
    }
}
