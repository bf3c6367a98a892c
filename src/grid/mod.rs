//! Grid lifecycle: reconciliation, tile indexing and boundary locking
//!
//! This module contains:
//! - The lifecycle manager that owns and mutates the tile index
//! - Pure reconciliation of desired against observed state
//! - The dense tile index and the boundary predicate

/// Boundary predicate and expected lock masks
pub mod boundary;
/// Dense 2D index of tile objects
pub mod index;
/// Lifecycle manager driving incremental rebuilds
pub mod manager;
/// Desired-versus-observed comparison producing structural patches
pub mod reconcile;

pub use index::{Shape, TileIndex};
pub use manager::{GridManager, RebuildReport};
pub use reconcile::{Patch, RunMode};
