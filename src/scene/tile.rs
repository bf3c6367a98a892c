//! Tile entity and the material it recolours
//!
//! A tile holds a single locked flag. Its position is implicit in the grid
//! index, and only the grid manager ever changes the flag.

use crate::io::configuration::{LOCKED_COLOR, UNLOCKED_COLOR};

/// Per-tile material instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    color: [u8; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: UNLOCKED_COLOR,
        }
    }
}

impl Material {
    /// Current RGBA colour
    pub const fn color(&self) -> [u8; 4] {
        self.color
    }

    /// Paint the colour that represents a lock state
    pub const fn apply_lock_state(&mut self, locked: bool) {
        self.color = if locked { LOCKED_COLOR } else { UNLOCKED_COLOR };
    }
}

/// One grid cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tile {
    locked: bool,
    material: Material,
}

impl Tile {
    /// Unlocked tile with a white material
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tile lies on the grid boundary
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Store the lock state and recolour the material
    pub const fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.material.apply_lock_state(locked);
    }

    /// The tile's material
    pub const fn material(&self) -> &Material {
        &self.material
    }
}
