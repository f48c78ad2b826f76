//! Entity kinds and their per-tick motion rules
//!
//! The closed set of things that move in the arena. Each kind is a plain
//! struct with its own `advance` rule; the `Entity` trait is the small
//! capability the registries and the collision queries need (bounds, alive
//! flag). Cross-entity aiming is snapshot-based: a bomb captures its
//! direction at creation, homing kinds receive the target position each
//! tick. No entity holds a reference to another.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::{Rect, direction_between, direction_to};
use crate::consts::TICK_HZ;
use crate::tuning::Tuning;

/// Common capability of every simulated object
pub trait Entity {
    /// Current collision bounds
    fn bounds(&self) -> Rect;
    /// Live entities participate in queries; dead ones are swept at frame end
    fn is_alive(&self) -> bool;
    /// Mark for removal at the end-of-frame sweep
    fn mark_dead(&mut self);
}

/// The player-controlled sprite
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Facing direction (unit vector), updated by movement
    pub facing: Vec2,
    /// Collision extent (square bounds edge length)
    pub extent: f32,
    /// Base movement speed in pixels per tick
    pub base_speed: f32,
    /// Additional speed from level-ups
    pub speed_bonus: f32,
    alive: bool,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            facing: Vec2::X,
            extent: tuning.player_extent,
            base_speed: tuning.player_speed,
            speed_bonus: 0.0,
            alive: true,
        }
    }

    /// Effective movement speed in pixels per tick
    pub fn speed(&self) -> f32 {
        self.base_speed + self.speed_bonus
    }

    /// Move toward a target point (pointer-follow control).
    ///
    /// Snap-to-target rule: when the target is within one tick's travel the
    /// center lands exactly on it, never overshooting. A move that would
    /// leave the arena is reverted.
    pub fn advance_toward(&mut self, target: Vec2, arena: &Rect) {
        let offset = target - self.pos;
        let distance = offset.length();
        if distance == 0.0 {
            return;
        }

        let previous = self.pos;
        if distance <= self.speed() {
            self.pos = target;
        } else {
            self.pos += offset / distance * self.speed();
        }

        if !self.bounds().fully_inside(arena) {
            self.pos = previous;
        }

        self.facing = offset / distance;
    }

    /// Move by a directional intent (keyboard control).
    ///
    /// The summed key vector is applied unnormalized, so diagonals travel
    /// faster, matching the classic scheme. Out-of-bounds moves revert.
    pub fn advance_directed(&mut self, intent: Vec2, arena: &Rect) {
        if intent == Vec2::ZERO {
            return;
        }

        let previous = self.pos;
        self.pos += intent * self.speed();
        if !self.bounds().fully_inside(arena) {
            self.pos = previous;
        }

        self.facing = intent.normalize();
    }
}

impl Entity for Player {
    fn bounds(&self) -> Rect {
        Rect::from_extent(self.pos, self.extent)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// A homing enemy; re-aims at its target every tick
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub extent: f32,
    pub speed: f32,
    /// Sprite variant tag, no gameplay effect
    pub kind: u8,
    alive: bool,
}

impl Enemy {
    /// Spawn on a random arena edge at a random coordinate along it
    pub fn spawn(rng: &mut Pcg32, arena: &Rect, tuning: &Tuning) -> Self {
        let pos = match rng.random_range(0u8..4) {
            0 => Vec2::new(rng.random_range(0.0..=arena.size.x), 0.0),
            1 => Vec2::new(0.0, rng.random_range(0.0..=arena.size.y)),
            2 => Vec2::new(arena.size.x, rng.random_range(0.0..=arena.size.y)),
            _ => Vec2::new(rng.random_range(0.0..=arena.size.x), arena.size.y),
        };
        Self {
            pos,
            extent: tuning.enemy_extent,
            speed: tuning.enemy_speed,
            kind: rng.random_range(1u8..=3),
            alive: true,
        }
    }

    /// Home toward the target; holds position when already centered on it
    pub fn advance(&mut self, target: Vec2) {
        if let Some(dir) = direction_between(self.pos, target) {
            self.pos += dir * self.speed;
        }
    }
}

impl Entity for Enemy {
    fn bounds(&self) -> Rect {
        Rect::from_extent(self.pos, self.extent)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// An enemy-dropped bomb, aimed at the player once at creation
#[derive(Debug, Clone)]
pub struct Bomb {
    pub pos: Vec2,
    /// Collision radius (bounds are the circumscribing square)
    pub radius: f32,
    vel: Vec2,
    alive: bool,
}

impl Bomb {
    /// Drop from an enemy, aimed at where the player is right now.
    ///
    /// A bomb dropped exactly on the player's center has no defined
    /// direction and stays in place.
    pub fn dropped(enemy: &Rect, player: &Rect, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let radius = rng.random_range(tuning.bomb_radius_min..=tuning.bomb_radius_max);
        let pos = enemy.center + Vec2::new(0.0, enemy.size.y / 2.0);
        let vel = direction_to(enemy, player)
            .map(|dir| dir * tuning.bomb_speed)
            .unwrap_or(Vec2::ZERO);
        Self {
            pos,
            radius,
            vel,
            alive: true,
        }
    }

    /// Fly along the aim vector; dies once outside the arena
    pub fn advance(&mut self, arena: &Rect) {
        self.pos += self.vel;
        if !self.bounds().fully_inside(arena) {
            self.mark_dead();
        }
    }
}

impl Entity for Bomb {
    fn bounds(&self) -> Rect {
        Rect::from_extent(self.pos, self.radius * 2.0)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// A player projectile with a fixed velocity
#[derive(Debug, Clone)]
pub struct Beam {
    pub pos: Vec2,
    pub extent: f32,
    vel: Vec2,
    alive: bool,
}

impl Beam {
    /// Fire at a target rect; `None` when the player sits exactly on it
    pub fn aimed(player: &Player, target: &Rect, tuning: &Tuning) -> Option<Self> {
        let dir = direction_to(&player.bounds(), target)?;
        Some(Self::launched(player, dir, tuning))
    }

    /// Fire at an angular offset (degrees) from the player's facing
    pub fn fanned(player: &Player, offset_deg: f32, tuning: &Tuning) -> Self {
        let dir = Vec2::from_angle(offset_deg.to_radians()).rotate(player.facing);
        Self::launched(player, dir, tuning)
    }

    fn launched(player: &Player, dir: Vec2, tuning: &Tuning) -> Self {
        Self {
            // One player-extent ahead, so the beam clears the sprite
            pos: player.pos + dir * player.extent,
            extent: tuning.beam_extent,
            vel: dir * tuning.beam_speed,
            alive: true,
        }
    }

    pub fn advance(&mut self, arena: &Rect) {
        self.pos += self.vel;
        if !self.bounds().fully_inside(arena) {
            self.mark_dead();
        }
    }
}

impl Entity for Beam {
    fn bounds(&self) -> Rect {
        Rect::from_extent(self.pos, self.extent)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// A stationary piercing laser along the player's facing at fire time.
///
/// Lives for a wall-clock duration converted to ticks; destroys what it
/// touches without being consumed.
#[derive(Debug, Clone)]
pub struct Laser {
    bounds: Rect,
    /// Remaining lifetime in ticks
    pub life: u32,
    alive: bool,
}

impl Laser {
    pub fn fired(player: &Player, arena: &Rect, tuning: &Tuning) -> Self {
        let dir = player.facing;
        // Distance to the arena edge along the facing ray
        let tx = if dir.x > 0.0 {
            (arena.right() - player.pos.x) / dir.x
        } else if dir.x < 0.0 {
            (arena.left() - player.pos.x) / dir.x
        } else {
            f32::INFINITY
        };
        let ty = if dir.y > 0.0 {
            (arena.bottom() - player.pos.y) / dir.y
        } else if dir.y < 0.0 {
            (arena.top() - player.pos.y) / dir.y
        } else {
            f32::INFINITY
        };
        let reach = tx.min(ty).max(0.0);
        let end = player.pos + dir * reach;

        let half = Vec2::splat(tuning.laser_width / 2.0);
        let min = player.pos.min(end) - half;
        let max = player.pos.max(end) + half;

        Self {
            bounds: Rect::new((min + max) / 2.0, max - min),
            life: tuning.laser_duration_ms * TICK_HZ / 1000,
            alive: true,
        }
    }

    pub fn advance(&mut self) {
        if self.life == 0 {
            self.mark_dead();
        } else {
            self.life -= 1;
        }
    }
}

impl Entity for Laser {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// An orbiting blade; destroys what it touches and is never consumed
#[derive(Debug, Clone)]
pub struct Blade {
    pub pos: Vec2,
    pub extent: f32,
    /// Current orbit angle in radians
    pub angle: f32,
    orbit_radius: f32,
    /// Orbit advance per tick in radians
    step: f32,
    alive: bool,
}

impl Blade {
    /// One blade of an evenly phased ring around the player
    pub fn orbiting(index: u32, count: u32, player_pos: Vec2, tuning: &Tuning) -> Self {
        let phase = std::f32::consts::TAU * index as f32 / count.max(1) as f32;
        let mut blade = Self {
            pos: Vec2::ZERO,
            extent: tuning.blade_extent,
            angle: phase,
            orbit_radius: tuning.blade_orbit_radius,
            step: tuning.blade_orbit_step_deg.to_radians(),
            alive: true,
        };
        blade.reposition(player_pos);
        blade
    }

    pub fn advance(&mut self, player_pos: Vec2) {
        self.angle = (self.angle + self.step) % std::f32::consts::TAU;
        self.reposition(player_pos);
    }

    fn reposition(&mut self, player_pos: Vec2) {
        self.pos = player_pos + Vec2::from_angle(self.angle) * self.orbit_radius;
    }
}

impl Entity for Blade {
    fn bounds(&self) -> Rect {
        Rect::from_extent(self.pos, self.extent)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// A temporary zone that destroys hostile entities overlapping it each tick
#[derive(Debug, Clone)]
pub struct AreaEffect {
    bounds: Rect,
    /// Remaining lifetime in ticks
    pub life: u32,
    alive: bool,
}

impl AreaEffect {
    /// Deploy centered on the arena
    pub fn deployed(arena: &Rect, tuning: &Tuning) -> Self {
        Self {
            bounds: Rect::new(
                arena.center,
                Vec2::new(tuning.area_effect_width, tuning.area_effect_height),
            ),
            life: tuning.area_effect_life,
            alive: true,
        }
    }

    pub fn advance(&mut self) {
        if self.life == 0 {
            self.mark_dead();
        } else {
            self.life -= 1;
        }
    }
}

impl Entity for AreaEffect {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// A cosmetic explosion; the resolver spawns one per kill
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
    alive: bool,
}

impl Explosion {
    pub fn at(pos: Vec2, life: u32) -> Self {
        Self {
            pos,
            life,
            alive: true,
        }
    }

    pub fn advance(&mut self) {
        if self.life == 0 {
            self.mark_dead();
        } else {
            self.life -= 1;
        }
    }
}

impl Entity for Explosion {
    fn bounds(&self) -> Rect {
        // Point-sized; explosions never collide, but the registry needs bounds
        Rect::from_extent(self.pos, 0.0)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn mark_dead(&mut self) {
        self.alive = false;
    }
}
