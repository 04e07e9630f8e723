//! Entity data model
//!
//! Entities share an id, position, footprint and alive flag; the kind carries
//! whatever extra state a variant needs (monsters track health).

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::error::SimError;
use crate::consts::*;
use crate::heading_offset;

/// Opaque entity identifier, unique within a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random 128-bit hex id from a seeded source
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(format!("{:032x}", rng.random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Entity footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both sides strictly positive and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(ENTITY_DEFAULT_WIDTH, ENTITY_DEFAULT_HEIGHT)
    }
}

/// Cosmetic color, carried through to render snapshots only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }
}

/// Entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Monster { health: i32, max_health: i32 },
}

impl EntityKind {
    /// Monster at full health
    pub fn monster(health: i32) -> Self {
        EntityKind::Monster {
            health,
            max_health: health,
        }
    }
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub dims: Dimensions,
    pub alive: bool,
    pub color: Rgb,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, pos: Vec2, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            pos,
            dims: Dimensions::default(),
            alive: true,
            color: Rgb { r: 128, g: 128, b: 128 },
            kind,
        }
    }

    pub fn player(id: impl Into<EntityId>, pos: Vec2) -> Self {
        Self::new(id, pos, EntityKind::Player).with_color(Rgb::RED)
    }

    pub fn monster(id: impl Into<EntityId>, pos: Vec2, health: i32) -> Self {
        Self::new(id, pos, EntityKind::monster(health))
    }

    pub fn with_dimensions(mut self, dims: Dimensions) -> Self {
        self.dims = dims;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Check the creation invariants
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.dims.is_valid() {
            return Err(SimError::InvalidDimension {
                width: self.dims.width,
                height: self.dims.height,
            });
        }
        if !self.pos.is_finite() {
            return Err(SimError::InvalidPosition {
                x: self.pos.x,
                y: self.pos.y,
            });
        }
        if let EntityKind::Monster { health, max_health } = self.kind {
            if max_health <= 0 || health <= 0 || health > max_health {
                return Err(SimError::InvalidHealth { health, max_health });
            }
        }
        Ok(())
    }

    /// Bounding box `[x, x + width] × [y, y + height]`
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.dims)
    }

    /// Move by a signed magnitude toward a heading in degrees
    ///
    /// Leaves the entity untouched if the result would not be finite.
    pub fn move_by(&mut self, amount: f32, degrees: f32) -> Result<(), SimError> {
        let next = self.pos + heading_offset(amount, degrees);
        if !next.is_finite() {
            return Err(SimError::InvalidPosition {
                x: next.x,
                y: next.y,
            });
        }
        self.pos = next;
        Ok(())
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }

    pub fn is_damageable(&self) -> bool {
        matches!(self.kind, EntityKind::Monster { .. })
    }

    /// Current and max health for damageable entities
    pub fn health(&self) -> Option<(i32, i32)> {
        match self.kind {
            EntityKind::Monster { health, max_health } => Some((health, max_health)),
            EntityKind::Player => None,
        }
    }

    /// Decrement health, kept within `0..=max_health`. Returns true if this
    /// hit was fatal.
    ///
    /// Non-damageable entities ignore damage.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        match &mut self.kind {
            EntityKind::Monster { health, max_health } => {
                *health = health.saturating_sub(amount).clamp(0, *max_health);
                if *health <= 0 && self.alive {
                    self.alive = false;
                    return true;
                }
                false
            }
            EntityKind::Player => false,
        }
    }

    /// Mark dead. Returns true if the entity was alive before.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
