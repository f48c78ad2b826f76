//! Score and experience/level progression
//!
//! The leveling rule is a pure function so the resolver can apply it
//! deterministically: identical `(level, experience, amount)` inputs always
//! produce the same outcome.

use crate::consts::MAX_LEVEL;

/// Point total for one session
#[derive(Debug, Clone, Copy, Default)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }

    /// Deduct `cost` if affordable.
    ///
    /// Returns `false` and leaves the total unchanged when the balance is
    /// short; a failed spend is a no-op, not an error.
    pub fn spend(&mut self, cost: u32) -> bool {
        if self.value < cost {
            return false;
        }
        self.value -= cost;
        true
    }
}

/// Experience required to leave the given level
pub fn experience_threshold(level: u32) -> u32 {
    if level <= 1 { 50 } else { 100 }
}

/// Outcome of applying an experience gain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub level: u32,
    pub experience: u32,
    pub threshold: u32,
    pub leveled_up: bool,
}

/// Apply an experience gain to `(level, experience)`.
///
/// Reaching the threshold raises the level once and resets experience to
/// zero. At `MAX_LEVEL` the gain is ignored.
pub fn apply_experience(level: u32, experience: u32, amount: u32) -> LevelChange {
    if level >= MAX_LEVEL {
        return LevelChange {
            level,
            experience,
            threshold: experience_threshold(level),
            leveled_up: false,
        };
    }

    let gained = experience + amount;
    if gained >= experience_threshold(level) {
        let level = level + 1;
        LevelChange {
            level,
            experience: 0,
            threshold: experience_threshold(level),
            leveled_up: true,
        }
    } else {
        LevelChange {
            level,
            experience: gained,
            threshold: experience_threshold(level),
            leveled_up: false,
        }
    }
}

/// Experience/level state for the progression variant
#[derive(Debug, Clone, Copy)]
pub struct Progression {
    pub level: u32,
    pub experience: u32,
    /// Experience needed to leave the current level
    pub threshold: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            threshold: experience_threshold(1),
        }
    }

    /// Gain experience; returns `true` on level-up
    pub fn gain(&mut self, amount: u32) -> bool {
        let change = apply_experience(self.level, self.experience, amount);
        self.level = change.level;
        self.experience = change.experience;
        self.threshold = change.threshold;
        change.leveled_up
    }
}
