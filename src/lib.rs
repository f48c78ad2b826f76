//! Arena Survivor - a top-down arena survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{HomingTarget, Tuning};

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 50;
    /// Seconds per simulation tick
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1100.0;
    pub const ARENA_HEIGHT: f32 = 650.0;

    /// Points per kill
    pub const ENEMY_KILL_POINTS: u32 = 10;
    pub const BOMB_KILL_POINTS: u32 = 1;

    /// Experience per kill (progression variant)
    pub const ENEMY_KILL_XP: u32 = 10;
    pub const BOMB_KILL_XP: u32 = 5;

    /// Explosion lifetimes in ticks
    pub const ENEMY_EXPLOSION_LIFE: u32 = 100;
    pub const BOMB_EXPLOSION_LIFE: u32 = 50;

    /// Progression cap; experience gains at this level are ignored
    pub const MAX_LEVEL: u32 = 99;
    /// Player speed gained per level-up
    pub const LEVEL_SPEED_BONUS: f32 = 1.0;
}
