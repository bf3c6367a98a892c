//! Pure comparison of desired configuration against observed grid state
//!
//! Reconciliation has no side effects: it looks at what exists, what is
//! wanted and the run mode, and describes the structural change needed.

use crate::grid::index::Shape;
use crate::io::configuration::GridConfig;
use crate::scene::transform::{Vec3, extent_scale};

/// Whether the grid may still be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Authoring: configuration changes are applied
    #[default]
    Edit,
    /// Running: the grid is frozen
    Play,
}

/// Shape and spacing the grid should have
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesiredState {
    /// Target rows and columns
    pub shape: Shape,
    /// Target tile extent
    pub tile_extent: f32,
}

impl From<&GridConfig> for DesiredState {
    fn from(config: &GridConfig) -> Self {
        Self {
            shape: Shape::new(config.rows(), config.columns()),
            tile_extent: config.tile_extent(),
        }
    }
}

/// What currently exists in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedState {
    /// Shape of the tile collection, `None` when none exists
    pub shape: Option<Shape>,
    /// Current local scale of the grid root
    pub root_scale: Vec3,
}

/// Structural change turning the observed grid into the desired one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    /// No collection exists; build one from scratch
    Build(Shape),
    /// Tile spacing changed; destroy every tile and build fresh
    Replace {
        /// Shape being torn down
        from: Shape,
        /// Shape being built
        to: Shape,
    },
    /// Add or remove rows and columns, keeping the overlap
    Resize {
        /// Current shape
        from: Shape,
        /// Target shape
        to: Shape,
    },
}

impl Patch {
    /// Shape the grid has once the patch is applied
    pub const fn target(&self) -> Shape {
        match *self {
            Self::Build(to) | Self::Replace { to, .. } | Self::Resize { to, .. } => to,
        }
    }

    /// Shape whose tiles survive the patch
    pub const fn retained(&self) -> Shape {
        match *self {
            Self::Build(_) | Self::Replace { .. } => Shape::new(0, 0),
            Self::Resize { from, to } => Shape::new(
                min(from.rows, to.rows),
                min(from.columns, to.columns),
            ),
        }
    }

    /// Rows appended at the end
    pub const fn rows_added(&self) -> usize {
        match *self {
            Self::Build(to) | Self::Replace { to, .. } => to.rows,
            Self::Resize { from, to } => to.rows.saturating_sub(from.rows),
        }
    }

    /// Rows removed from the end
    pub const fn rows_removed(&self) -> usize {
        match *self {
            Self::Build(_) => 0,
            Self::Replace { from, .. } => from.rows,
            Self::Resize { from, to } => from.rows.saturating_sub(to.rows),
        }
    }

    /// Columns appended to every row
    pub const fn columns_added(&self) -> usize {
        match *self {
            Self::Build(to) | Self::Replace { to, .. } => to.columns,
            Self::Resize { from, to } => to.columns.saturating_sub(from.columns),
        }
    }

    /// Columns removed from every row
    pub const fn columns_removed(&self) -> usize {
        match *self {
            Self::Build(_) => 0,
            Self::Replace { from, .. } => from.columns,
            Self::Resize { from, to } => from.columns.saturating_sub(to.columns),
        }
    }
}

const fn min(a: usize, b: usize) -> usize {
    if a < b { a } else { b }
}

/// Describe the change needed, or `None` when the grid is current
///
/// Play mode never produces a patch. A scale mismatch takes precedence over
/// a shape mismatch because the spacing of every existing tile is wrong.
pub fn reconcile(desired: &DesiredState, observed: &ObservedState, mode: RunMode) -> Option<Patch> {
    if mode == RunMode::Play {
        return None;
    }

    let Some(current) = observed.shape.filter(|shape| !shape.is_empty()) else {
        return Some(Patch::Build(desired.shape));
    };

    let expected_scale = extent_scale(desired.tile_extent, observed.root_scale);
    if !observed.root_scale.approx_eq(expected_scale) {
        return Some(Patch::Replace {
            from: current,
            to: desired.shape,
        });
    }

    (current != desired.shape).then_some(Patch::Resize {
        from: current,
        to: desired.shape,
    })
}
