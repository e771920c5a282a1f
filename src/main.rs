//! Jetlane headless demo runner
//!
//! Drives the simulation core without a renderer: starts a run, plays a
//! simple scripted input pattern, and prints a JSON summary once the run
//! has ended and the session is back at the menu.

use jetlane::input::{IntentFilter, KeyState};
use jetlane::settings::{Difficulty, Settings};
use jetlane::sim::{GamePhase, GameSession, tick};

const DT: f32 = 1.0 / 60.0;
/// Hard cap so a run that somehow never collides still terminates
const MAX_TICKS: u64 = 60 * 600;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or(Difficulty::Medium);

    let settings = Settings {
        difficulty,
        ..Default::default()
    };
    let mut session = GameSession::new(seed, &settings);
    let mut filter = IntentFilter::new();

    log::info!("headless run: seed {seed}, {}", difficulty.as_str());
    session.start_run(difficulty);

    let mut ticks = 0u64;
    while ticks < MAX_TICKS {
        let t = ticks as f32 * DT;
        // Hover around mid-height and drift between lanes
        let keys = KeyState {
            up: session.player.y < 5.0,
            left: (t as u32 / 2) % 2 == 0,
            right: (t as u32 / 2) % 2 == 1,
        };
        let input = filter.update(&keys, DT);
        tick(&mut session, &input, DT);
        ticks += 1;

        if session.phase == GamePhase::Menu {
            break;
        }
    }

    let summary = serde_json::json!({
        "seed": seed,
        "difficulty": difficulty.as_str(),
        "ticks": ticks,
        "seconds": (ticks as f32 * DT * 10.0).round() / 10.0,
        "last_run": session.scores.display_last_run(),
        "best": session.scores.display_best(),
        "final_phase": format!("{:?}", session.phase),
    });
    println!("{summary}");
}
