//! Boundary validation errors
//!
//! Raised when an entity is created, added or moved. The tick body itself is
//! total and never produces one of these.

use thiserror::Error;

use super::state::EntityId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid dimensions {width}x{height}: both must be positive and finite")]
    InvalidDimension { width: f32, height: f32 },
    #[error("invalid position ({x}, {y}): coordinates must be finite")]
    InvalidPosition { x: f32, y: f32 },
    #[error("invalid health {health}/{max_health}: max must be positive and not below current")]
    InvalidHealth { health: i32, max_health: i32 },
    #[error("an entity with id `{0}` already exists")]
    DuplicateId(EntityId),
    #[error("no entity with id `{0}`")]
    UnknownEntity(EntityId),
}
