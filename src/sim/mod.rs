//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed logical step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (store insertion order)
//! - No rendering, input device or platform dependencies

pub mod collision;
pub mod error;
pub mod grid;
pub mod policy;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use error::SimError;
pub use grid::{CellRange, SpatialHashGrid};
pub use policy::{Effect, KillOnContact, PeriodicDamage, ResolutionPolicy};
pub use snapshot::{EntityView, HealthBar, SimStats};
pub use state::{Dimensions, Entity, EntityId, EntityKind, Rgb, RngState};
pub use store::EntityStore;
pub use tick::{
    Direction, EffectRecord, MoveCommand, Simulation, TickInput, TickReport, policy_for,
};
