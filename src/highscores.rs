//! Session score board
//!
//! Last-run and best scores for the current process. Nothing is
//! persisted; a reload starts fresh.

use serde::{Deserialize, Serialize};

/// Scores tracked across runs within one session
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub last_run: f32,
    pub best: f32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record_run(&mut self, score: f32) -> bool {
        self.last_run = score;
        if score > self.best {
            self.best = score;
            log::info!("new high score: {}", self.display_best());
            return true;
        }
        false
    }

    /// Last-run score as the HUD displays it (floored to an integer)
    pub fn display_last_run(&self) -> u64 {
        self.last_run.max(0.0) as u64
    }

    /// Best score as the HUD displays it
    pub fn display_best(&self) -> u64 {
        self.best.max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_run_tracks_best() {
        let mut board = ScoreBoard::new();
        assert!(board.record_run(120.7));
        assert_eq!(board.display_last_run(), 120);
        assert_eq!(board.display_best(), 120);

        // A worse run updates last but not best
        assert!(!board.record_run(50.0));
        assert_eq!(board.display_last_run(), 50);
        assert_eq!(board.display_best(), 120);

        assert!(board.record_run(300.2));
        assert_eq!(board.display_best(), 300);
    }
}
