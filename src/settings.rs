//! Simulation settings
//!
//! Every field has a default, so a settings file only needs the values it
//! overrides. Loaded from JSON on native builds.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Dimensions, SimError};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
    #[error("initial population rejected: {0}")]
    Spawn(#[from] SimError),
}

/// Which resolution policy the simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Player deals 1 damage every `damage_interval` ticks of contact
    #[default]
    PeriodicDamage,
    /// Player destroys monsters on first contact
    KillOnContact,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::PeriodicDamage => "periodic_damage",
            PolicyKind::KillOnContact => "kill_on_contact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "periodic_damage" | "damage" => Some(PolicyKind::PeriodicDamage),
            "kill_on_contact" | "kill" => Some(PolicyKind::KillOnContact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Broad phase ===
    /// Grid cell edge; tune near the typical entity footprint
    pub cell_size: f32,

    // === Resolution ===
    pub policy: PolicyKind,
    /// Ticks between periodic damage hits
    pub damage_interval: u64,

    // === Entities ===
    pub monster_default_health: i32,
    pub entity_dimensions: Dimensions,
    pub player_id: String,
    pub player_start: Vec2,
    /// Distance moved per tick per held direction
    pub player_speed: f32,

    // === Initial population ===
    pub initial_monsters: usize,
    pub spawn_area: Vec2,
    /// Seed for colors, generated ids and monster scatter
    pub seed: u64,

    // === Scheduling ===
    pub ticks_per_second: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,

            policy: PolicyKind::PeriodicDamage,
            damage_interval: DAMAGE_INTERVAL,

            monster_default_health: MONSTER_DEFAULT_HEALTH,
            entity_dimensions: Dimensions::new(ENTITY_DEFAULT_WIDTH, ENTITY_DEFAULT_HEIGHT),
            player_id: PLAYER_ID.to_string(),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_speed: PLAYER_SPEED,

            initial_monsters: INITIAL_MONSTERS,
            spawn_area: Vec2::new(SPAWN_AREA_WIDTH, SPAWN_AREA_HEIGHT),
            seed: 0,

            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load_from(path) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("{}; using defaults", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(SettingsError::Invalid("cell_size must be positive"));
        }
        if self.damage_interval == 0 {
            return Err(SettingsError::Invalid("damage_interval must be at least 1"));
        }
        if self.monster_default_health <= 0 {
            return Err(SettingsError::Invalid("monster_default_health must be positive"));
        }
        if !self.entity_dimensions.is_valid() {
            return Err(SettingsError::Invalid("entity_dimensions must be positive"));
        }
        if self.player_id.is_empty() {
            return Err(SettingsError::Invalid("player_id must not be empty"));
        }
        if !self.player_start.is_finite() {
            return Err(SettingsError::Invalid("player_start must be finite"));
        }
        if !self.player_speed.is_finite() {
            return Err(SettingsError::Invalid("player_speed must be finite"));
        }
        if !(self.spawn_area.is_finite() && self.spawn_area.cmpge(Vec2::ZERO).all()) {
            return Err(SettingsError::Invalid("spawn_area must be finite and non-negative"));
        }
        if self.ticks_per_second == 0 {
            return Err(SettingsError::Invalid("ticks_per_second must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.cell_size, 20.0);
        assert_eq!(s.damage_interval, 60);
        assert_eq!(s.monster_default_health, 10);
        assert_eq!(s.entity_dimensions, Dimensions::new(20.0, 20.0));
        assert_eq!(s.policy, PolicyKind::PeriodicDamage);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s =
            Settings::from_json(r#"{ "cell_size": 32.0, "policy": "kill_on_contact" }"#).unwrap();
        assert_eq!(s.cell_size, 32.0);
        assert_eq!(s.policy, PolicyKind::KillOnContact);
        assert_eq!(s.damage_interval, DAMAGE_INTERVAL);
        assert_eq!(s.player_id, PLAYER_ID);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut s = Settings::default();
        s.seed = 99;
        s.initial_monsters = 3;
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Settings::from_json(r#"{ "cell_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "damage_interval": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err =
            Settings::from_json(r#"{ "entity_dimensions": { "width": -1.0, "height": 5.0 } }"#)
                .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ cell_size: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load(Some(Path::new("/nonexistent/grid-arena/settings.json")));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_policy_kind_from_str() {
        assert_eq!(PolicyKind::from_str("Kill-On-Contact"), Some(PolicyKind::KillOnContact));
        assert_eq!(PolicyKind::from_str("damage"), Some(PolicyKind::PeriodicDamage));
        assert_eq!(PolicyKind::from_str("bounce"), None);
        assert_eq!(PolicyKind::KillOnContact.as_str(), "kill_on_contact");
    }
}
