//! Run configuration: difficulty presets and visual mode
//!
//! Everything here is chosen outside the simulation and threaded through
//! constructors; the sim never reaches for a global.

use serde::{Deserialize, Serialize};

/// Difficulty presets
///
/// Fixed once per run: base world speed, score multiplier, and the
/// speed-ramp acceleration constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// World speed at the start of a run
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 15.0,
            Difficulty::Medium => 25.0,
            Difficulty::Hard => 35.0,
        }
    }

    /// Score accrual multiplier
    pub fn score_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 1.75,
        }
    }

    /// Speed-ramp acceleration constant
    pub fn acceleration(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.002,
            Difficulty::Medium => 0.003,
            Difficulty::Hard => 0.005,
        }
    }
}

/// Whether obstacles render as bare collision primitives or carry
/// decorative assets
///
/// Collision geometry is identical in both modes; the flag only decides
/// whether spawned obstacles get display handles for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VisualMode {
    /// Collision primitives double as the visuals
    #[default]
    Prototype,
    /// Decorative assets attached where the asset cache has them
    Full,
}

impl VisualMode {
    pub fn is_prototype(&self) -> bool {
        matches!(self, VisualMode::Prototype)
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Difficulty preselected in the menu
    pub difficulty: Difficulty,
    pub visual_mode: VisualMode,
    /// Show the speed readout in the HUD
    pub show_speed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            visual_mode: VisualMode::Prototype,
            show_speed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_difficulty_ordering() {
        // Harder presets are faster, score richer, and ramp quicker
        assert!(Difficulty::Easy.base_speed() < Difficulty::Medium.base_speed());
        assert!(Difficulty::Medium.base_speed() < Difficulty::Hard.base_speed());
        assert!(Difficulty::Easy.score_multiplier() < Difficulty::Hard.score_multiplier());
        assert!(Difficulty::Easy.acceleration() < Difficulty::Hard.acceleration());
    }
}
