//! Transform math for placing tiles under the grid root

use crate::io::configuration::{SCALE_EPSILON, TILE_ROTATION_OFFSET_DEGREES};
use num_traits::Float;

/// Three-component vector used for positions, euler angles and scales
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component (up)
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// All components zero
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All components one
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Build a vector from components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise multiplication by a scalar
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Whether every component lies within `SCALE_EPSILON` of `other`
    pub fn approx_eq(self, other: Self) -> bool {
        approx_eq(self.x, other.x, SCALE_EPSILON)
            && approx_eq(self.y, other.y, SCALE_EPSILON)
            && approx_eq(self.z, other.z, SCALE_EPSILON)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Scalar comparison with an absolute tolerance
pub fn approx_eq<F: Float>(a: F, b: F, epsilon: F) -> bool {
    (a - b).abs() <= epsilon
}

/// Position, euler rotation (degrees) and local scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World position
    pub position: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    /// Local scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Origin, no rotation, unit scale
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Identity rotation and scale at `position`
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// World position of the tile at column `x`, row `y`
///
/// Columns advance along X and rows along Z, `extent` apart, starting at the
/// root position.
pub fn tile_position(root: &Transform, x: usize, y: usize, extent: f32) -> Vec3 {
    root.position + Vec3::new(x as f32 * extent, 0.0, y as f32 * extent)
}

/// Rotation that lays a tile flat relative to the root
pub fn tile_rotation(root: &Transform) -> Vec3 {
    Vec3::new(root.rotation.x + TILE_ROTATION_OFFSET_DEGREES, 0.0, 0.0)
}

/// Root scale implied by a tile extent
///
/// Depends on the extent alone, never on the row or column count; the
/// vertical component is carried over from `current`.
pub const fn extent_scale(extent: f32, current: Vec3) -> Vec3 {
    Vec3::new(extent, current.y, extent)
}
