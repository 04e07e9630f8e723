//! Keyboard state to movement commands
//!
//! The platform layer forwards key-down/key-up names here; nothing in this
//! module listens for events itself. Each held direction yields one move per
//! tick, so diagonal movement covers more distance than straight movement.

use std::collections::BTreeSet;

use crate::sim::{Direction, EntityId, MoveCommand, TickInput};

/// Key that toggles pause at the call site
pub const PAUSE_KEY: &str = " ";

/// Map a key name to a movement direction (arrows and WASD)
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" => Some(Direction::Up),
        "ArrowDown" | "s" => Some(Direction::Down),
        "ArrowLeft" | "a" => Some(Direction::Left),
        "ArrowRight" | "d" => Some(Direction::Right),
        _ => None,
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    keys: BTreeSet<String>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Held directions in a fixed order, each reported once
    pub fn directions(&self) -> Vec<Direction> {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .into_iter()
            .filter(|dir| self.keys.iter().any(|k| direction_for_key(k) == Some(*dir)))
            .collect()
    }

    /// Movement commands for `id` for the coming tick
    pub fn to_tick_input(&self, id: &EntityId) -> TickInput {
        TickInput {
            moves: self
                .directions()
                .into_iter()
                .map(|direction| MoveCommand {
                    id: id.clone(),
                    direction,
                })
                .collect(),
        }
    }
}
