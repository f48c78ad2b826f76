//! Data-driven game balance
//!
//! The two control schemes (pointer-follow and keyboard) disagree on
//! player speed, spawn cadence and homing target; everything they disagree
//! on lives here as a tunable parameter instead of a hardcoded constant.
//! Serialized as JSON so a balance pass doesn't need a recompile.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// What homing enemies steer toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HomingTarget {
    /// Chase the player sprite
    #[default]
    Player,
    /// Chase the pointer position when the input supplies one
    Pointer,
}

/// Gameplay balance parameters.
///
/// All speeds are pixels per tick, all periods are ticks, all extents are
/// collision-box edge lengths (the asset collaborator's sprite dimensions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement speed
    pub player_speed: f32,
    /// Player spawn position
    pub player_start: [f32; 2],
    pub player_extent: f32,

    pub enemy_speed: f32,
    pub enemy_extent: f32,
    /// Ticks between enemy spawns
    pub enemy_spawn_period: u64,
    /// What enemies steer toward
    pub homing: HomingTarget,

    /// Ticks between bomb drops (one bomb per live enemy)
    pub bomb_drop_period: u64,
    pub bomb_speed: f32,
    pub bomb_radius_min: f32,
    pub bomb_radius_max: f32,

    pub beam_speed: f32,
    pub beam_extent: f32,
    /// Ticks between automatic shots at the nearest enemy
    pub autofire_period: u64,

    /// Ticks between automatic laser firings
    pub laser_period: u64,
    /// Laser lifetime, wall-clock milliseconds
    pub laser_duration_ms: u32,
    pub laser_width: f32,

    /// Number of orbiting blades
    pub blade_count: u32,
    pub blade_extent: f32,
    pub blade_orbit_radius: f32,
    /// Orbit advance per tick, degrees
    pub blade_orbit_step_deg: f32,

    /// Score cost of deploying an area effect
    pub area_effect_cost: u32,
    /// Area effect lifetime in ticks
    pub area_effect_life: u32,
    pub area_effect_width: f32,
    pub area_effect_height: f32,

    /// Experience/leveling on or off
    pub progression_enabled: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::pointer_chase()
    }
}

impl Tuning {
    /// The mouse-follow variant: slower player, blades, leveling
    pub fn pointer_chase() -> Self {
        Self {
            player_speed: 6.0,
            player_start: [900.0, 400.0],
            player_extent: 64.0,
            enemy_speed: 4.0,
            enemy_extent: 64.0,
            enemy_spawn_period: 100,
            homing: HomingTarget::Player,
            bomb_drop_period: 200,
            bomb_speed: 6.0,
            bomb_radius_min: 10.0,
            bomb_radius_max: 50.0,
            beam_speed: 10.0,
            beam_extent: 20.0,
            autofire_period: 100,
            laser_period: 500,
            laser_duration_ms: 3000,
            laser_width: 40.0,
            blade_count: 1,
            blade_extent: 75.0,
            blade_orbit_radius: 100.0,
            blade_orbit_step_deg: 3.0,
            area_effect_cost: 200,
            area_effect_life: 400,
            area_effect_width: ARENA_WIDTH,
            area_effect_height: ARENA_HEIGHT,
            progression_enabled: true,
        }
    }

    /// The keyboard variant: faster player, no blades, no leveling
    pub fn keyboard() -> Self {
        Self {
            player_speed: 10.0,
            blade_count: 0,
            progression_enabled: false,
            ..Self::pointer_chase()
        }
    }

    /// Load tuning from a JSON file
    pub fn load_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let tuning = serde_json::from_str(&text)?;
        log::info!("loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Write tuning as pretty-printed JSON
    pub fn save_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), text)
    }
}
