//! Boundary predicate deciding which tiles are locked

use crate::grid::index::Shape;
use ndarray::Array2;

/// Whether `(x, y)` lies on the first or last row or column of `shape`
///
/// With a single row or column every cell is a boundary cell.
pub const fn is_boundary(x: usize, y: usize, shape: Shape) -> bool {
    y == 0 || y + 1 == shape.rows || x == 0 || x + 1 == shape.columns
}

/// Expected lock state for every cell, indexed `[y, x]`
pub fn boundary_mask(shape: Shape) -> Array2<bool> {
    Array2::from_shape_fn((shape.rows, shape.columns), |(y, x)| {
        is_boundary(x, y, shape)
    })
}
