//! Collision resolution policies
//!
//! A policy maps an overlapping `(subject, other)` pair and the current tick to
//! an [`Effect`] that the tick loop applies to `other`. Both orderings of a
//! pair are resolved every tick, so a policy must be safe to evaluate twice.

use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityId};

/// Gameplay outcome of one resolved contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    None,
    /// Subtract health from a damageable target
    Damage(i32),
    /// Mark the target dead regardless of health
    Kill,
}

pub trait ResolutionPolicy {
    fn resolve(&self, subject: &Entity, other: &Entity, tick: u64) -> Effect;
}

impl<F> ResolutionPolicy for F
where
    F: Fn(&Entity, &Entity, u64) -> Effect,
{
    fn resolve(&self, subject: &Entity, other: &Entity, tick: u64) -> Effect {
        self(subject, other, tick)
    }
}

/// The player wears down damageable entities it touches, once per interval
#[derive(Debug, Clone)]
pub struct PeriodicDamage {
    pub player_id: EntityId,
    pub interval: u64,
    pub amount: i32,
}

impl PeriodicDamage {
    pub fn new(player_id: EntityId, interval: u64) -> Self {
        Self {
            player_id,
            interval: interval.max(1),
            amount: 1,
        }
    }
}

impl ResolutionPolicy for PeriodicDamage {
    fn resolve(&self, subject: &Entity, other: &Entity, tick: u64) -> Effect {
        if subject.id == self.player_id && other.is_damageable() && tick % self.interval == 0 {
            Effect::Damage(self.amount)
        } else {
            Effect::None
        }
    }
}

/// The player destroys any damageable entity on first contact
#[derive(Debug, Clone)]
pub struct KillOnContact {
    pub player_id: EntityId,
}

impl ResolutionPolicy for KillOnContact {
    fn resolve(&self, subject: &Entity, other: &Entity, _tick: u64) -> Effect {
        if subject.id == self.player_id && other.is_damageable() && other.alive {
            Effect::Kill
        } else {
            Effect::None
        }
    }
}
