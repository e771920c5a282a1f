//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Tick-driven, single-threaded
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod obb;
pub mod obstacle;
pub mod player;
pub mod rocket;
pub mod state;
pub mod tick;
pub mod world;

pub use obb::{CollisionShape, Obb, Transform, intersects};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleSpawner};
pub use player::{MovementIntent, Player};
pub use rocket::{Projectile, RocketAttack, RocketPhase, RocketSwarm};
pub use state::{Camera, GamePhase, GameSession};
pub use tick::{TickInput, tick};
pub use world::Backdrop;
