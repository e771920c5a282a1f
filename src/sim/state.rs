//! Game session state machine, timing, and camera policy

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleSpawner;
use super::player::Player;
use super::world::Backdrop;
use crate::consts::*;
use crate::highscores::ScoreBoard;
use crate::settings::{Difficulty, Settings};
use crate::smoothstep;

/// Top-level phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle menu framing, waiting for a start command
    Menu,
    /// Camera easing from menu framing to gameplay framing
    Transition,
    /// Active gameplay
    Running,
    /// Frozen linger after a collision
    PostCollisionPause,
    /// Fall-back animation returning the player to the menu pose
    GameEnd,
}

/// Camera framing handed to the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub look_target: Vec3,
}

impl Camera {
    pub fn menu() -> Self {
        Self {
            position: MENU_CAMERA_POSITION,
            look_target: MENU_CAMERA_TARGET,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    pub score: f32,
    pub game_speed: f32,
    /// Seconds elapsed in the current Running phase
    pub run_time: f32,
    /// Difficulty locked in for the current run
    pub difficulty: Difficulty,
    pub player: Player,
    pub spawner: ObstacleSpawner,
    pub backdrop: Backdrop,
    pub camera: Camera,
    pub scores: ScoreBoard,
    /// Renderer hint; the player hides during the post-collision linger
    pub player_visible: bool,
    pub(crate) transition_timer: f32,
    pub(crate) pause_timer: f32,
}

impl GameSession {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        log::info!(
            "session created (seed {seed}, {:?} visuals)",
            settings.visual_mode
        );
        Self {
            phase: GamePhase::Menu,
            score: 0.0,
            game_speed: 0.0,
            run_time: 0.0,
            difficulty: settings.difficulty,
            player: Player::new(),
            spawner: ObstacleSpawner::new(seed, settings.visual_mode),
            backdrop: Backdrop::new(),
            camera: Camera::menu(),
            scores: ScoreBoard::new(),
            player_visible: true,
            transition_timer: 0.0,
            pause_timer: 0.0,
        }
    }

    /// Begin a run from the menu. The difficulty is read once here and
    /// held fixed until the run ends. No-op outside Menu.
    pub fn start_run(&mut self, difficulty: Difficulty) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.difficulty = difficulty;
        self.score = 0.0;
        self.game_speed = difficulty.base_speed();
        self.run_time = 0.0;
        self.player.reset(PLAYER_REST_Y);
        self.player_visible = true;
        self.transition_timer = 0.0;
        self.phase = GamePhase::Transition;
        log::info!("run started ({})", difficulty.as_str());
    }

    /// Score as the HUD displays it (floored to an integer)
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0) as u64
    }

    /// Current world speed for the HUD readout
    pub fn display_speed(&self) -> f32 {
        self.game_speed
    }

    pub(crate) fn enter_post_collision_pause(&mut self) {
        self.phase = GamePhase::PostCollisionPause;
        self.player_visible = false;
        self.pause_timer = 0.0;
        log::info!("collision at score {}", self.display_score());
    }

    pub(crate) fn enter_game_end(&mut self) {
        self.phase = GamePhase::GameEnd;
        self.scores.record_run(self.score);
        self.spawner.reset();
        self.backdrop.reset();
        // Fall-back animation starts above the scene
        self.player.reset(CEILING_Y);
        self.player_visible = true;
        self.camera = Camera::menu();
    }

    pub(crate) fn enter_menu(&mut self) {
        self.phase = GamePhase::Menu;
        log::info!(
            "returned to menu (last run {}, best {})",
            self.scores.display_last_run(),
            self.scores.display_best()
        );
    }

    /// Transition camera: smoothstep from menu framing to gameplay framing
    pub(crate) fn update_transition_camera(&mut self) {
        let t = smoothstep(self.transition_timer / TRANSITION_DURATION);
        self.camera.position = MENU_CAMERA_POSITION.lerp(GAME_CAMERA_POSITION, t);
        self.camera.look_target = MENU_CAMERA_TARGET.lerp(GAME_CAMERA_LOOK, t);
    }

    /// Gameplay camera: lane-biased X and player-height-biased Y, eased
    /// with a fixed per-tick factor; look target fixed ahead down the
    /// corridor.
    pub(crate) fn update_game_camera(&mut self) {
        let target_x = LANES[self.player.lane] * CAMERA_LANE_OFFSET;
        let target_y = (self.player.y + CAMERA_Y_OFFSET).min(CEILING_Y - 1.0);

        self.camera.position.x = crate::lerp(self.camera.position.x, target_x, CAMERA_LERP);
        self.camera.position.y = crate::lerp(self.camera.position.y, target_y, CAMERA_LERP);
        self.camera.look_target = Vec3::new(self.camera.position.x, GAME_CAMERA_LOOK.y, GAME_CAMERA_LOOK.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_run_only_from_menu() {
        let mut session = GameSession::new(1, &Settings::default());
        session.start_run(Difficulty::Easy);
        assert_eq!(session.phase, GamePhase::Transition);
        assert_eq!(session.game_speed, 15.0);

        // Starting again mid-transition is ignored
        session.start_run(Difficulty::Hard);
        assert_eq!(session.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_game_end_clears_entities_and_records_score() {
        let mut session = GameSession::new(2, &Settings::default());
        session.start_run(Difficulty::Medium);
        session.phase = GamePhase::Running;
        session.score = 321.9;
        session.spawner.obstacles.push(super::super::obstacle::test_support::dummy_obstacle());

        session.enter_post_collision_pause();
        assert!(!session.player_visible);

        session.enter_game_end();
        assert_eq!(session.spawner.live_count(), 0);
        assert_eq!(session.scores.display_last_run(), 321);
        assert_eq!(session.player.y, CEILING_Y);
        assert!(session.player_visible);
    }

    #[test]
    fn test_transition_camera_endpoints() {
        let mut session = GameSession::new(3, &Settings::default());
        session.start_run(Difficulty::Medium);

        session.transition_timer = 0.0;
        session.update_transition_camera();
        assert_eq!(session.camera.position, MENU_CAMERA_POSITION);

        session.transition_timer = TRANSITION_DURATION;
        session.update_transition_camera();
        assert_eq!(session.camera.position, GAME_CAMERA_POSITION);
        assert_eq!(session.camera.look_target, GAME_CAMERA_LOOK);
    }

    #[test]
    fn test_game_camera_tracks_lane_and_height() {
        let mut session = GameSession::new(4, &Settings::default());
        session.camera.position = GAME_CAMERA_POSITION;
        session.player.lane = 2;
        session.player.y = 5.0;

        let x_before = session.camera.position.x;
        for _ in 0..200 {
            session.update_game_camera();
        }
        assert!(session.camera.position.x > x_before);
        assert!((session.camera.position.x - LANES[2] * CAMERA_LANE_OFFSET).abs() < 0.05);
        assert!((session.camera.position.y - (5.0 + CAMERA_Y_OFFSET)).abs() < 0.05);

        // Height bias saturates below the ceiling
        session.player.y = CEILING_Y;
        for _ in 0..200 {
            session.update_game_camera();
        }
        assert!(session.camera.position.y <= CEILING_Y - 1.0 + 0.05);
    }
}
