//! Arena Survivor entry point
//!
//! Headless demo driver: runs one seeded session with a scripted autopilot
//! standing in for a human, logs events as they happen, and prints a JSON
//! summary when the session ends.
//!
//! Usage: arena-survivor [seed] [max_frames] [tuning.json]

use glam::Vec2;
use serde::Serialize;

use arena_survivor::consts::{ARENA_HEIGHT, ARENA_WIDTH, SIM_DT};
use arena_survivor::sim::{EndCause, GameEvent, GameState, MoveIntent, TickInput, tick};
use arena_survivor::tuning::Tuning;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    score: u32,
    level: u32,
    /// `None` when the frame cap stopped a still-running session
    cause: Option<EndCause>,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xA5A5);
    let max_frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30_000);
    let tuning = match args.next() {
        Some(path) => match Tuning::load_file(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("failed to load tuning from {path}: {err}; using defaults");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut state = GameState::new(seed, tuning);
    while state.is_running() && state.frame < max_frames {
        let input = autopilot(&state);
        tick(&mut state, &input);
        for event in &state.events {
            match event {
                GameEvent::SessionEnded { cause } => log::info!("game over: {cause:?}"),
                other => log::debug!("event: {other:?}"),
            }
        }
    }

    let summary = RunSummary {
        seed,
        frames: state.frame,
        score: state.score.value(),
        level: state.progression.level,
        cause: state.result().map(|r| r.cause),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize summary: {err}"),
    }
}

/// Scripted stand-in for a human: circle the arena center, fire steadily,
/// and cash the score in for an area effect whenever it covers the cost
fn autopilot(state: &GameState) -> TickInput {
    let elapsed = state.frame as f32 * SIM_DT;
    let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
    let target = center + Vec2::new((elapsed * 0.4).cos(), (elapsed * 0.4).sin()) * 220.0;

    TickInput {
        intent: MoveIntent::Toward(target),
        fire: state.frame % 45 == 0,
        fire_fan: if state.frame > 0 && state.frame % 600 == 0 {
            Some(5)
        } else {
            None
        },
        area_effect: state.score.value() >= state.tuning.area_effect_cost,
    }
}
