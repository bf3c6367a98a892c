//! Scene objects the grid is built from
//!
//! This module contains:
//! - The object host contract and an arena-backed scene
//! - The tile entity and its material
//! - Transform math for tile placement and root scale

/// Object host contract and in-memory scene
pub mod host;
/// Tile entity and material
pub mod tile;
/// Vectors, transforms and placement helpers
pub mod transform;

pub use host::{ObjectId, Scene, SceneHost};
pub use tile::Tile;
