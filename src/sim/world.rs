//! Scrolling corridor backdrop
//!
//! Ground and ceiling strips ride toward the player with the world and
//! recycle once they pass the origin. Purely visual state; nothing
//! collides with the backdrop.

use serde::{Deserialize, Serialize};

/// Z where a freshly recycled strip starts
const STRIP_START_Z: f32 = -90.0;

/// Backdrop strip positions along the travel axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Backdrop {
    pub ground_z: f32,
    pub ceiling_z: f32,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            ground_z: STRIP_START_Z,
            ceiling_z: STRIP_START_Z,
        }
    }

    pub fn advance(&mut self, dt: f32, game_speed: f32) {
        self.ground_z += game_speed * dt;
        self.ceiling_z += game_speed * dt;

        if self.ground_z > 0.0 {
            self.ground_z = STRIP_START_Z;
            self.ceiling_z = STRIP_START_Z;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
