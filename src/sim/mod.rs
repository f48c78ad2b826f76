//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only (one logical tick per rendered frame)
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod geometry;
pub mod registry;
pub mod score;
pub mod state;
pub mod tick;

pub use entity::{AreaEffect, Beam, Blade, Bomb, Enemy, Entity, Explosion, Laser, Player};
pub use geometry::{Rect, direction_between, direction_to};
pub use registry::Registry;
pub use score::{Progression, Score, apply_experience, experience_threshold};
pub use state::{EndCause, GameEvent, GamePhase, GameState, SessionResult};
pub use tick::{MoveIntent, TickInput, tick};
