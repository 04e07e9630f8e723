//! Read-only views handed to rendering and telemetry collaborators

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Dimensions, Entity, EntityId, Rgb};
use crate::consts::{HEALTH_UNIT_HEIGHT, HEALTH_UNIT_WIDTH};

/// Everything a renderer needs to draw one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub pos: Vec2,
    pub dims: Dimensions,
    pub color: Rgb,
    pub alive: bool,
    /// (current, max) for damageable entities
    pub health: Option<(i32, i32)>,
}

impl From<&Entity> for EntityView {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id.clone(),
            pos: e.pos,
            dims: e.dims,
            color: e.color,
            alive: e.alive,
            health: e.health(),
        }
    }
}

/// Health bar layout: one unit per point of max health, drawn above the entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBar {
    /// Top-left corner
    pub origin: Vec2,
    pub full_width: f32,
    pub filled_width: f32,
    pub height: f32,
}

impl EntityView {
    pub fn health_bar(&self) -> Option<HealthBar> {
        let (health, max_health) = self.health?;
        Some(HealthBar {
            origin: Vec2::new(self.pos.x, self.pos.y - HEALTH_UNIT_HEIGHT),
            full_width: max_health as f32 * HEALTH_UNIT_WIDTH,
            filled_width: health.max(0) as f32 * HEALTH_UNIT_WIDTH,
            height: HEALTH_UNIT_HEIGHT,
        })
    }
}

/// Per-tick diagnostics (tps displays, debug overlays)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    pub tick: u64,
    pub entity_count: usize,
    pub live_count: usize,
    pub occupied_cells: usize,
    pub grid_entries: usize,
}
