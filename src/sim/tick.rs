//! Fixed-cadence simulation tick
//!
//! One call to [`Simulation::step`] runs, in order: dead-entity removal, grid
//! clear, grid rebuild from the survivors, then per-entity candidate queries
//! with policy resolution on every overlapping pair. Entities killed during a
//! tick stay in the store until the next tick starts.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::error::SimError;
use super::grid::SpatialHashGrid;
use super::policy::{Effect, KillOnContact, PeriodicDamage, ResolutionPolicy};
use super::snapshot::{EntityView, SimStats};
use super::state::{Entity, EntityId, EntityKind, Rgb, RngState};
use super::store::EntityStore;
use crate::heading_offset;
use crate::settings::{PolicyKind, Settings, SettingsError};

/// Movement heading in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn degrees(&self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Down => 90.0,
            Direction::Left => 180.0,
            Direction::Up => 270.0,
        }
    }
}

/// Move one entity one step in a direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub id: EntityId,
    pub direction: Direction,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Applied in order before the tick body runs
    pub moves: Vec<MoveCommand>,
}

/// One applied, non-`None` policy outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub subject: EntityId,
    pub target: EntityId,
    pub effect: Effect,
    /// This effect moved the target from alive to dead
    pub fatal: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Entities in the store after removal (this tick's casualties included)
    pub entity_count: usize,
    /// Ids evicted at the start of this tick
    pub removed: Vec<EntityId>,
    pub outcomes: Vec<EffectRecord>,
}

impl TickReport {
    /// Ids killed during this tick
    pub fn kills(&self) -> impl Iterator<Item = &EntityId> {
        self.outcomes.iter().filter(|o| o.fatal).map(|o| &o.target)
    }
}

/// Build the policy selected by the settings
pub fn policy_for(settings: &Settings) -> Box<dyn ResolutionPolicy> {
    let player_id = EntityId::new(settings.player_id.clone());
    match settings.policy {
        PolicyKind::PeriodicDamage => {
            Box::new(PeriodicDamage::new(player_id, settings.damage_interval))
        }
        PolicyKind::KillOnContact => Box::new(KillOnContact { player_id }),
    }
}

/// Apply an effect to its target. Returns true if the target died from it.
fn apply_effect(target: &mut Entity, effect: Effect) -> bool {
    match effect {
        Effect::None => false,
        Effect::Damage(amount) => target.apply_damage(amount),
        Effect::Kill => target.kill(),
    }
}

/// Owns the entity store, the broad-phase grid and the active policy
pub struct Simulation {
    settings: Settings,
    store: EntityStore,
    grid: SpatialHashGrid,
    policy: Box<dyn ResolutionPolicy>,
    tick_count: u64,
    rng: Pcg32,
    /// Reused candidate buffer
    candidates: Vec<usize>,
}

impl Simulation {
    /// Empty simulation with no entities
    pub fn empty(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            grid: SpatialHashGrid::new(settings.cell_size),
            policy: policy_for(&settings),
            rng: RngState::new(settings.seed).to_rng(),
            store: EntityStore::new(),
            tick_count: 0,
            candidates: Vec::new(),
            settings,
        })
    }

    /// Simulation with the player and the configured number of scattered monsters
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        let mut sim = Self::empty(settings)?;
        let start = sim.settings.player_start;
        sim.spawn_player(start)?;

        let area = sim.settings.spawn_area;
        for _ in 0..sim.settings.initial_monsters {
            let pos = Vec2::new(
                sim.rng.random::<f32>() * area.x,
                sim.rng.random::<f32>() * area.y,
            );
            sim.spawn_monster(pos)?;
        }

        log::info!(
            "Simulation ready: {} entities, cell size {}, policy {}",
            sim.store.len(),
            sim.settings.cell_size,
            sim.settings.policy.as_str()
        );
        Ok(sim)
    }

    /// Replace the resolution policy
    pub fn set_policy(&mut self, policy: impl ResolutionPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    pub fn with_policy(mut self, policy: impl ResolutionPolicy + 'static) -> Self {
        self.set_policy(policy);
        self
    }

    /// Add an entity with the configured footprint and a random color
    pub fn spawn(
        &mut self,
        id: impl Into<EntityId>,
        pos: Vec2,
        kind: EntityKind,
    ) -> Result<(), SimError> {
        let entity = Entity::new(id, pos, kind)
            .with_dimensions(self.settings.entity_dimensions)
            .with_color(Rgb::random(&mut self.rng));
        self.store.add(entity)
    }

    /// Add a fully specified entity
    pub fn add(&mut self, entity: Entity) -> Result<(), SimError> {
        self.store.add(entity)
    }

    pub fn spawn_player(&mut self, pos: Vec2) -> Result<(), SimError> {
        let player = Entity::player(self.settings.player_id.as_str(), pos)
            .with_dimensions(self.settings.entity_dimensions);
        self.store.add(player)
    }

    /// Spawn a full-health monster under a generated id
    pub fn spawn_monster(&mut self, pos: Vec2) -> Result<EntityId, SimError> {
        let id = EntityId::random(&mut self.rng);
        let kind = EntityKind::monster(self.settings.monster_default_health);
        self.spawn(id.clone(), pos, kind)?;
        Ok(id)
    }

    /// Move one entity by a signed magnitude toward a heading in degrees
    pub fn move_entity(
        &mut self,
        id: &EntityId,
        amount: f32,
        degrees: f32,
    ) -> Result<(), SimError> {
        self.store
            .get_mut(id)
            .ok_or_else(|| SimError::UnknownEntity(id.clone()))?
            .move_by(amount, degrees)
    }

    /// Apply the tick's movement commands
    ///
    /// All commands are checked before any is applied, so a rejected input
    /// leaves every position unchanged.
    pub fn apply_input(&mut self, input: &TickInput) -> Result<(), SimError> {
        let speed = self.settings.player_speed;
        let mut staged: Vec<(&EntityId, Vec2)> = Vec::with_capacity(input.moves.len());

        for cmd in &input.moves {
            let current = match staged.iter().rev().find(|(id, _)| *id == &cmd.id) {
                Some(&(_, pos)) => pos,
                None => {
                    self.store
                        .get(&cmd.id)
                        .ok_or_else(|| SimError::UnknownEntity(cmd.id.clone()))?
                        .pos
                }
            };
            let next = current + heading_offset(speed, cmd.direction.degrees());
            if !next.is_finite() {
                return Err(SimError::InvalidPosition {
                    x: next.x,
                    y: next.y,
                });
            }
            staged.push((&cmd.id, next));
        }

        for (id, pos) in staged {
            if let Some(entity) = self.store.get_mut(id) {
                entity.pos = pos;
            }
        }
        Ok(())
    }

    /// Apply input, then run one tick
    pub fn advance(&mut self, input: &TickInput) -> Result<TickReport, SimError> {
        self.apply_input(input)?;
        Ok(self.step())
    }

    /// Run one tick
    pub fn step(&mut self) -> TickReport {
        self.tick_count += 1;
        let tick = self.tick_count;

        let removed = self.store.remove_dead();

        self.grid.clear();
        for (i, entity) in self.store.all().iter().enumerate() {
            self.grid.insert(i, &entity.aabb());
        }

        let mut outcomes = Vec::new();
        let mut candidates = std::mem::take(&mut self.candidates);
        let entities = self.store.all_mut();

        for i in 0..entities.len() {
            let subject_box = entities[i].aabb();
            self.grid.query_candidates_into(i, &subject_box, &mut candidates);

            for &j in &candidates {
                if !overlaps(&subject_box, &entities[j].aabb()) {
                    continue;
                }
                let effect = self.policy.resolve(&entities[i], &entities[j], tick);
                if effect == Effect::None {
                    continue;
                }

                let fatal = apply_effect(&mut entities[j], effect);
                log::debug!(
                    "Tick {}: {} -> {} {:?}",
                    tick,
                    entities[i].id,
                    entities[j].id,
                    effect
                );
                if fatal {
                    log::info!("{} destroyed at tick {}", entities[j].id, tick);
                }
                outcomes.push(EffectRecord {
                    subject: entities[i].id.clone(),
                    target: entities[j].id.clone(),
                    effect,
                    fatal,
                });
            }
        }
        self.candidates = candidates;

        log::trace!(
            "Tick {} done: {} entities, {} cells, {} outcomes",
            tick,
            self.store.len(),
            self.grid.occupied_cells(),
            outcomes.len()
        );

        TickReport {
            tick,
            entity_count: self.store.len(),
            removed,
            outcomes,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> Option<&Entity> {
        self.store.get(&EntityId::new(self.settings.player_id.as_str()))
    }

    /// Read-only view of every stored entity for rendering
    pub fn snapshot(&self) -> Vec<EntityView> {
        self.store.all().iter().map(EntityView::from).collect()
    }

    /// Diagnostics for telemetry displays
    pub fn stats(&self) -> SimStats {
        SimStats {
            tick: self.tick_count,
            entity_count: self.store.len(),
            live_count: self.store.live().count(),
            occupied_cells: self.grid.occupied_cells(),
            grid_entries: self.grid.total_entries(),
        }
    }
}
