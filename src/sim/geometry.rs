//! Axis-aligned rectangle geometry for the arena and entity bounds
//!
//! Every collision shape in the simulation is an axis-aligned rectangle
//! (circular objects collide by bounding box). The arena itself is a Rect
//! whose top-left corner sits at the origin, +y pointing down.

use glam::Vec2;

/// An axis-aligned rectangle, stored as center + full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Center position
    pub center: Vec2,
    /// Full width/height
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Square rect from a single edge length
    pub fn from_extent(center: Vec2, extent: f32) -> Self {
        Self {
            center,
            size: Vec2::splat(extent),
        }
    }

    /// The arena rectangle for a given width/height (top-left at origin)
    pub fn arena(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// AABB overlap test (closed edges: touching rects intersect)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// Per-axis containment test against the arena.
    ///
    /// Returns `(horizontal, vertical)`; an axis is `false` when the shape
    /// crosses either arena edge on that axis. Edges themselves count as
    /// inside.
    pub fn in_bounds(&self, arena: &Rect) -> (bool, bool) {
        let horizontal = !(self.left() < arena.left() || self.right() > arena.right());
        let vertical = !(self.top() < arena.top() || self.bottom() > arena.bottom());
        (horizontal, vertical)
    }

    /// True when the shape is fully inside the arena on both axes
    pub fn fully_inside(&self, arena: &Rect) -> bool {
        self.in_bounds(arena) == (true, true)
    }
}

/// Unit vector from one point toward another.
///
/// `None` when the points coincide; callers must guard instead of dividing
/// by a zero-length vector.
pub fn direction_between(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Unit vector from one rect's center toward another's
pub fn direction_to(from: &Rect, to: &Rect) -> Option<Vec2> {
    direction_between(from.center, to.center)
}
