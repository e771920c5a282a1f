//! Obstacle spawning, advancement, and collision
//!
//! Obstacle kinds are a tagged variant dispatched to per-kind layout
//! routines; adding a kind means adding a variant and a routine, no
//! inheritance involved. The spawner owns the rocket sub-engine and a
//! seeded RNG, so a session replays identically from its seed.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obb::{self, CollisionShape, Transform};
use super::player::Player;
use super::rocket::RocketSwarm;
use crate::consts::*;
use crate::scene::DisplayHandle;
use crate::settings::VisualMode;

/// Discrete hazard categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Full-width bar flush to the floor
    LowBar,
    /// Full-width bar flush to the ceiling
    HighBar,
    /// Full-height cylinder on one or two lanes
    LaneBlocker,
    /// Floor and ceiling bars leaving a mid-height gap
    Gap,
    DiagonalLeftRight,
    DiagonalRightLeft,
    /// Full-width bar vertically centered
    MiddleBar,
    /// Spinning full-diagonal cylinder
    Rotator,
    /// Tall block covering the lower three fifths of the room
    GroundBlock,
    /// Delegates to the rocket sub-engine
    RocketAttack,
}

impl ObstacleKind {
    /// Draw-pool order. RocketAttack sits last so eligibility gating can
    /// shrink the pool by one.
    pub const ALL: [ObstacleKind; 10] = [
        ObstacleKind::LowBar,
        ObstacleKind::HighBar,
        ObstacleKind::LaneBlocker,
        ObstacleKind::Gap,
        ObstacleKind::DiagonalLeftRight,
        ObstacleKind::DiagonalRightLeft,
        ObstacleKind::MiddleBar,
        ObstacleKind::Rotator,
        ObstacleKind::GroundBlock,
        ObstacleKind::RocketAttack,
    ];

    fn from_index(index: usize) -> ObstacleKind {
        Self::ALL[index]
    }
}

/// A live hazard in the corridor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub transform: Transform,
    /// Authoritative for collision regardless of any attached visual
    pub shape: CollisionShape,
    /// Spin rate about local Z in radians per second
    pub angular_velocity: f32,
    /// Decorative representation owned by the renderer, if any
    pub display: Option<DisplayHandle>,
}

/// Spawns, advances, culls, and collision-tests obstacles
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pub obstacles: Vec<Obstacle>,
    pub rockets: RocketSwarm,
    spawn_timer: f32,
    last_kind: Option<ObstacleKind>,
    repeat_count: u32,
    visual_mode: VisualMode,
    next_display_id: u64,
    rng: Pcg32,
}

impl ObstacleSpawner {
    pub fn new(seed: u64, visual_mode: VisualMode) -> Self {
        Self {
            obstacles: Vec::new(),
            rockets: RocketSwarm::new(),
            spawn_timer: 0.0,
            last_kind: None,
            repeat_count: 0,
            visual_mode,
            next_display_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance every live hazard one tick. Returns true if anything hit
    /// the player.
    pub fn advance(&mut self, dt: f32, player: &Player, game_speed: f32, score: f32) -> bool {
        let mut collided = false;
        self.spawn_timer += dt;

        if self.rockets.advance(dt, player, game_speed) {
            collided = true;
        }

        // Interval shrinks as the world speeds up
        if self.spawn_timer >= BASE_SPAWN_INTERVAL / (1.0 + (game_speed / 10.0) * 0.2) {
            self.spawn_event(score);
            self.spawn_timer = 0.0;
        }

        for obstacle in &mut self.obstacles {
            obstacle.transform.translation.z += game_speed * dt;
            if obstacle.angular_velocity != 0.0 {
                obstacle.transform.rotation =
                    Quat::from_rotation_z(obstacle.angular_velocity * dt) * obstacle.transform.rotation;
            }
        }
        self.obstacles.retain(|o| o.transform.translation.z <= DESPAWN_Z);

        for obstacle in &self.obstacles {
            if Self::check_collision(player, obstacle) {
                collided = true;
            }
        }

        collided
    }

    /// Collision between the player and one obstacle's authoritative shape
    pub fn check_collision(player: &Player, obstacle: &Obstacle) -> bool {
        obb::intersects(
            &player.collision_shape(),
            &player.transform(),
            &obstacle.shape,
            &obstacle.transform,
        )
    }

    /// One spawn event: pick a kind, lay it out, maybe overlay a blocker.
    ///
    /// The overlay coin flip is drawn before kind selection; layout draws
    /// follow. Keeping that order keeps seeded sessions reproducible.
    fn spawn_event(&mut self, score: f32) {
        let overlay = self.rng.random_bool(0.5);
        let kind = self.next_kind(score);

        match kind {
            ObstacleKind::LowBar => self.spawn_low_bar(),
            ObstacleKind::HighBar => self.spawn_high_bar(),
            ObstacleKind::LaneBlocker => {
                self.spawn_lane_blockers();
                return;
            }
            ObstacleKind::Gap => self.spawn_gap(),
            ObstacleKind::DiagonalLeftRight => self.spawn_diagonal(kind, LANES[0], LANES[2]),
            ObstacleKind::DiagonalRightLeft => self.spawn_diagonal(kind, LANES[2], LANES[0]),
            ObstacleKind::MiddleBar => self.spawn_middle_bar(),
            ObstacleKind::Rotator => self.spawn_rotator(),
            ObstacleKind::GroundBlock => self.spawn_ground_block(),
            ObstacleKind::RocketAttack => {
                log::info!("rocket attack batch spawned");
                self.rockets.spawn_batch(&mut self.rng);
                return;
            }
        }

        // Compound obstacles: half the time a lone lane blocker rides
        // along with the main layout
        if overlay
            && !matches!(
                kind,
                ObstacleKind::Rotator | ObstacleKind::GroundBlock
            )
        {
            let lane = self.rng.random_range(0..LANE_COUNT);
            self.push_lane_cylinder(lane);
        }
    }

    /// Pick the next kind: uniform over the pool, rockets gated behind a
    /// score threshold, and consecutive repeats capped at two.
    fn next_kind(&mut self, score: f32) -> ObstacleKind {
        let total = ObstacleKind::ALL.len();
        let rockets_eligible = score >= ROCKET_SCORE_THRESHOLD;

        let mut kind = ObstacleKind::from_index(self.rng.random_range(0..total));

        if !rockets_eligible && kind == ObstacleKind::RocketAttack {
            kind = self.redraw_excluding(total - 1, self.last_kind);
        }

        if Some(kind) == self.last_kind {
            self.repeat_count += 1;
            if self.repeat_count >= 2 {
                let pool = if rockets_eligible { total } else { total - 1 };
                kind = self.redraw_excluding(pool, self.last_kind);
                self.repeat_count = 0;
            }
        } else {
            self.repeat_count = 0;
        }

        self.last_kind = Some(kind);
        kind
    }

    /// Uniform draw over the first `pool` kinds, excluding at most one.
    /// Falls back to the unrestricted draw rather than spinning if the
    /// exclusion cannot be satisfied.
    fn redraw_excluding(&mut self, pool: usize, excluded: Option<ObstacleKind>) -> ObstacleKind {
        if pool >= 2 {
            for _ in 0..16 {
                let kind = ObstacleKind::from_index(self.rng.random_range(0..pool));
                if Some(kind) != excluded {
                    return kind;
                }
            }
        }
        ObstacleKind::from_index(self.rng.random_range(0..pool.max(1)))
    }

    fn spawn_low_bar(&mut self) {
        let h = ROOM_HEIGHT / 3.0;
        self.push_full_width_bar(ObstacleKind::LowBar, h, GROUND_Y + h / 2.0);
    }

    fn spawn_high_bar(&mut self) {
        let h = ROOM_HEIGHT / 3.0;
        self.push_full_width_bar(ObstacleKind::HighBar, h, CEILING_Y - h / 2.0);
    }

    /// Floor and ceiling bars with a clear band between them
    fn spawn_gap(&mut self) {
        let h = ROOM_HEIGHT / 4.0;
        self.push_full_width_bar(ObstacleKind::Gap, h, GROUND_Y + h / 2.0);
        self.push_full_width_bar(ObstacleKind::Gap, h, CEILING_Y - h / 2.0);
    }

    fn spawn_middle_bar(&mut self) {
        let h = ROOM_HEIGHT / 3.0;
        self.push_full_width_bar(ObstacleKind::MiddleBar, h, GROUND_Y + ROOM_HEIGHT / 3.0 + h / 2.0);
    }

    fn spawn_ground_block(&mut self) {
        let h = ROOM_HEIGHT * 3.0 / 5.0;
        self.push_full_width_bar(ObstacleKind::GroundBlock, h, GROUND_Y + h / 2.0);
    }

    fn spawn_lane_blockers(&mut self) {
        for lane in self.pick_lane_set() {
            self.push_lane_cylinder(lane);
        }
    }

    /// Half the time one random lane; otherwise remove one lane at random
    /// from the full set and pair it with one of the remaining two.
    fn pick_lane_set(&mut self) -> Vec<usize> {
        if self.rng.random_bool(0.5) {
            return vec![self.rng.random_range(0..LANE_COUNT)];
        }
        let mut lanes: Vec<usize> = (0..LANE_COUNT).collect();
        let first = lanes.remove(self.rng.random_range(0..lanes.len()));
        let second = lanes[self.rng.random_range(0..lanes.len())];
        vec![first, second]
    }

    /// Cylinder spanning one outer lane to the other across the room
    fn spawn_diagonal(&mut self, kind: ObstacleKind, x_start: f32, x_end: f32) {
        let dx = x_end - x_start;
        let length = (dx * dx + ROOM_HEIGHT * ROOM_HEIGHT).sqrt();
        let rotation = ROOM_HEIGHT.atan2(dx) * 2.0;

        let transform = Transform::new(
            Vec3::new((x_start + x_end) / 2.0, GROUND_Y + ROOM_HEIGHT / 2.0, SPAWN_Z),
            Quat::from_rotation_z(rotation),
            Vec3::new(1.0, length, 1.0),
        );
        self.push(kind, unit_cylinder(), transform, 0.0);
    }

    /// Room-diagonal cylinder spinning at a random signed rate
    fn spawn_rotator(&mut self) {
        let length = (THREE_LANE_WIDTH * THREE_LANE_WIDTH + ROOM_HEIGHT * ROOM_HEIGHT).sqrt();
        let sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let angular_velocity = sign * (0.4 + self.rng.random::<f32>() * 0.3);

        let transform = Transform::new(
            Vec3::new(0.0, GROUND_Y + ROOM_HEIGHT / 2.0, SPAWN_Z),
            Quat::from_rotation_z(FRAC_PI_2),
            Vec3::new(1.0, length, 1.0),
        );
        self.push(ObstacleKind::Rotator, unit_cylinder(), transform, angular_velocity);
    }

    fn push_full_width_bar(&mut self, kind: ObstacleKind, height: f32, y: f32) {
        let shape = CollisionShape::Box {
            half_extents: Vec3::new(THREE_LANE_WIDTH / 2.0, height / 2.0, OBSTACLE_DEPTH / 2.0),
        };
        let transform = Transform::from_translation(Vec3::new(0.0, y, SPAWN_Z));
        self.push(kind, shape, transform, 0.0);
    }

    fn push_lane_cylinder(&mut self, lane: usize) {
        let shape = CollisionShape::Cylinder {
            radius: CYLINDER_RADIUS,
            half_height: ROOM_HEIGHT / 2.0,
        };
        let transform =
            Transform::from_translation(Vec3::new(LANES[lane], GROUND_Y + ROOM_HEIGHT / 2.0, SPAWN_Z));
        self.push(ObstacleKind::LaneBlocker, shape, transform, 0.0);
    }

    fn push(
        &mut self,
        kind: ObstacleKind,
        shape: CollisionShape,
        transform: Transform,
        angular_velocity: f32,
    ) {
        let display = match self.visual_mode {
            VisualMode::Prototype => None,
            VisualMode::Full => {
                let id = self.next_display_id;
                self.next_display_id += 1;
                Some(DisplayHandle(id))
            }
        };
        self.obstacles.push(Obstacle {
            kind,
            transform,
            shape,
            angular_velocity,
            display,
        });
    }

    /// Discard every live obstacle and rocket attack unconditionally
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.rockets.reset();
    }

    pub fn live_count(&self) -> usize {
        self.obstacles.len() + self.rockets.attacks.len()
    }
}

/// Unit cylinder stretched along its axis via transform scale
fn unit_cylinder() -> CollisionShape {
    CollisionShape::Cylinder {
        radius: CYLINDER_RADIUS,
        half_height: 0.5,
    }
}
