//! Game state and session types
//!
//! One `GameState` is one session: the resolver (`tick`) is its sole
//! mutator. Entities live in per-kind registries owned here and are never
//! referenced after removal.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{AreaEffect, Beam, Blade, Bomb, Enemy, Explosion, Laser, Player};
use super::geometry::Rect;
use super::registry::Registry;
use super::score::{Progression, Score};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::tuning::Tuning;

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    PlayerHitByBomb,
    PlayerHitByEnemy,
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advances every tick
    Running,
    /// Terminal; a lethal collision happened
    Ended(EndCause),
}

/// Transient event emitted during a tick for the rendering collaborator.
///
/// The buffer is cleared at the start of every tick; callers drain it
/// between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A cosmetic explosion was spawned
    ExplosionSpawned { pos: Vec2, life: u32 },
    /// The player scored a kill worth celebrating
    PlayerJoy,
    /// The player was hit
    PlayerSad,
    /// The player reached a new level
    LevelUp { level: u32 },
    /// An area effect was paid for and deployed
    AreaEffectDeployed,
    /// The session reached its terminal state
    SessionEnded { cause: EndCause },
}

/// Terminal summary surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub cause: EndCause,
    pub score: u32,
    pub level: u32,
    pub frames: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, for reproducing a run
    pub seed: u64,
    /// Ticks simulated so far
    pub frame: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Registry<Enemy>,
    pub bombs: Registry<Bomb>,
    pub beams: Registry<Beam>,
    pub lasers: Registry<Laser>,
    pub blades: Registry<Blade>,
    pub area_effects: Registry<AreaEffect>,
    pub explosions: Registry<Explosion>,
    pub score: Score,
    pub progression: Progression,
    pub tuning: Tuning,
    /// Events emitted by the current tick
    pub events: Vec<GameEvent>,
    /// The playable bounds
    pub arena: Rect,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session with the given seed and balance parameters
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let arena = Rect::arena(ARENA_WIDTH, ARENA_HEIGHT);
        let player = Player::new(Vec2::from(tuning.player_start), &tuning);

        let mut blades = Registry::new();
        for i in 0..tuning.blade_count {
            blades.push(Blade::orbiting(i, tuning.blade_count, player.pos, &tuning));
        }

        log::info!(
            "session start: seed={} player_speed={} blades={}",
            seed,
            tuning.player_speed,
            tuning.blade_count
        );

        Self {
            seed,
            frame: 0,
            phase: GamePhase::Running,
            player,
            enemies: Registry::new(),
            bombs: Registry::new(),
            beams: Registry::new(),
            lasers: Registry::new(),
            blades,
            area_effects: Registry::new(),
            explosions: Registry::new(),
            score: Score::new(),
            progression: Progression::new(),
            tuning,
            events: Vec::new(),
            arena,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running)
    }

    /// Terminal summary, once the session has ended
    pub fn result(&self) -> Option<SessionResult> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Ended(cause) => Some(SessionResult {
                cause,
                score: self.score.value(),
                level: self.progression.level,
                frames: self.frame,
            }),
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drop dead members from every registry
    pub(crate) fn sweep_all(&mut self) {
        self.enemies.sweep();
        self.bombs.sweep();
        self.beams.sweep();
        self.lasers.sweep();
        self.blades.sweep();
        self.area_effects.sweep();
        self.explosions.sweep();
    }
}
