//! Authoritative entity storage
//!
//! Entities are kept in insertion order; removal preserves the relative order
//! of survivors so iteration stays deterministic across ticks.

use rustc_hash::FxHashMap;

use super::error::SimError;
use super::state::{Entity, EntityId};

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    /// id -> index into `entities`
    index: FxHashMap<EntityId, usize>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an entity
    pub fn add(&mut self, entity: Entity) -> Result<(), SimError> {
        if self.index.contains_key(&entity.id) {
            return Err(SimError::DuplicateId(entity.id));
        }
        entity.validate()?;

        log::debug!("Entity {} added at ({}, {})", entity.id, entity.pos.x, entity.pos.y);
        self.index.insert(entity.id.clone(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    /// Drop every dead entity, keeping survivors in order
    ///
    /// Returns the ids that were evicted. Evicted ids may be reused.
    pub fn remove_dead(&mut self) -> Vec<EntityId> {
        if self.entities.iter().all(|e| e.alive) {
            return Vec::new();
        }

        let mut removed = Vec::new();
        self.entities.retain(|e| {
            if !e.alive {
                removed.push(e.id.clone());
            }
            e.alive
        });

        self.index.clear();
        for (i, e) in self.entities.iter().enumerate() {
            self.index.insert(e.id.clone(), i);
        }

        log::debug!("Removed {} dead entities", removed.len());
        removed
    }

    /// Every stored entity, dead ones included until the next `remove_dead`
    #[inline]
    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Entities that are still alive
    pub fn live(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.alive)
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    /// Changing an entity's id through this breaks lookups
    pub(crate) fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        let i = *self.index.get(id)?;
        self.entities.get_mut(i)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
