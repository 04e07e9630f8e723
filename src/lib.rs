//! Grid Arena - a tick-driven 2D arena with hash-grid collision
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, broad phase, collisions, tick loop)
//! - `controls`: Key state to per-tick movement commands
//! - `scheduler`: Fixed-cadence tick scheduling
//! - `settings`: Data-driven configuration

pub mod controls;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use controls::PressedKeys;
pub use scheduler::TickScheduler;
pub use settings::{PolicyKind, Settings, SettingsError};

use glam::Vec2;

/// Simulation configuration defaults
pub mod consts {
    /// Edge length of one spatial grid cell
    pub const CELL_SIZE: f32 = 20.0;
    /// Ticks between periodic damage applications
    pub const DAMAGE_INTERVAL: u64 = 60;
    /// Health a freshly spawned monster starts (and caps) at
    pub const MONSTER_DEFAULT_HEALTH: i32 = 10;

    /// Default entity footprint
    pub const ENTITY_DEFAULT_WIDTH: f32 = 20.0;
    pub const ENTITY_DEFAULT_HEIGHT: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_ID: &str = "player";
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 100.0;
    /// Distance covered per tick per held direction
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Monsters scattered at startup
    pub const INITIAL_MONSTERS: usize = 10;
    /// Area initial monsters are scattered over (origin at 0,0)
    pub const SPAWN_AREA_WIDTH: f32 = 800.0;
    pub const SPAWN_AREA_HEIGHT: f32 = 1000.0;

    /// Target tick rate of the external scheduler
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum ticks run back-to-back to catch up after a stall
    pub const MAX_CATCH_UP: u32 = 8;

    /// Health bar unit size (one unit per point of health)
    pub const HEALTH_UNIT_WIDTH: f32 = 3.0;
    pub const HEALTH_UNIT_HEIGHT: f32 = 3.0;
}

/// Offset covered by moving `amount` toward `degrees`
///
/// Screen space: 0° is right, 90° is down, 180° is left, 270° is up.
#[inline]
pub fn heading_offset(amount: f32, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(amount * radians.cos(), amount * radians.sin())
}
