//! Per-kind entity collections and pairwise collision queries
//!
//! Each entity kind lives in exactly one `Registry`, owned by the game
//! state. Consumption marks an entity dead immediately, which excludes it
//! from every later query in the same frame; physical removal is deferred
//! to the end-of-frame `sweep` so queries within a frame see a consistent
//! snapshot.

use glam::Vec2;

use super::entity::Entity;
use super::geometry::Rect;

/// Exclusive-owner collection of all live entities of one kind
#[derive(Debug, Clone, Default)]
pub struct Registry<T> {
    members: Vec<T>,
}

impl<T: Entity> Registry<T> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    pub fn push(&mut self, entity: T) {
        self.members.push(entity);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of members still alive (not yet swept)
    pub fn alive_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_alive()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.members.iter_mut()
    }

    /// Advance every member with the given rule
    pub fn update_each(&mut self, mut advance: impl FnMut(&mut T)) {
        for member in &mut self.members {
            advance(member);
        }
    }

    /// Drop dead members; called once per frame, never mid-query
    pub fn sweep(&mut self) {
        self.members.retain(|m| m.is_alive());
    }

    /// Pairwise collision query against another registry.
    ///
    /// Returns the bounds of each intersecting `(self, other)` pair, in
    /// stable insertion order. A consumed entity is marked dead on its
    /// first match and appears in at most one pair; non-consumed entities
    /// may appear in several.
    pub fn collide_with<U: Entity>(
        &mut self,
        other: &mut Registry<U>,
        consume_self: bool,
        consume_other: bool,
    ) -> Vec<(Rect, Rect)> {
        let mut pairs = Vec::new();
        for a in &mut self.members {
            if !a.is_alive() {
                continue;
            }
            let a_bounds = a.bounds();
            for b in &mut other.members {
                if !b.is_alive() {
                    continue;
                }
                let b_bounds = b.bounds();
                if a_bounds.intersects(&b_bounds) {
                    pairs.push((a_bounds, b_bounds));
                    if consume_other {
                        b.mark_dead();
                    }
                    if consume_self {
                        a.mark_dead();
                        break;
                    }
                }
            }
        }
        pairs
    }

    /// Collision query against a single rect (the player, an area effect).
    ///
    /// Returns the bounds of every live member intersecting it.
    pub fn collide_rect(&mut self, target: &Rect, consume: bool) -> Vec<Rect> {
        let mut hits = Vec::new();
        for member in &mut self.members {
            if !member.is_alive() {
                continue;
            }
            let bounds = member.bounds();
            if bounds.intersects(target) {
                hits.push(bounds);
                if consume {
                    member.mark_dead();
                }
            }
        }
        hits
    }

    /// The live member whose center is closest to a point
    pub fn nearest_to(&self, pos: Vec2) -> Option<&T> {
        self.members
            .iter()
            .filter(|m| m.is_alive())
            .min_by(|a, b| {
                let da = a.bounds().center.distance_squared(pos);
                let db = b.bounds().center.distance_squared(pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
