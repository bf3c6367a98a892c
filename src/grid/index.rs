//! Dense row-major index of tile objects
//!
//! Row `y` then column `x`, matching how the grid is laid out along Z and X.
//! Resizing keeps every id in the overlapping region and reports the ids that
//! fall outside the new shape so the caller can destroy them.

use crate::io::error::{Result, inconsistency};
use crate::scene::host::ObjectId;
use ndarray::Array2;

/// Row and column counts of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of rows (Z axis)
    pub rows: usize,
    /// Number of columns (X axis)
    pub columns: usize,
}

impl Shape {
    /// Build a shape
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.rows * self.columns
    }

    /// Whether the shape holds no cells
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `(x, y)` lies inside the shape
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows
    }

    /// Every `(x, y)` in row-major order
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| (x, y)))
    }
}

/// Dense 2D index of tile ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIndex {
    cells: Array2<ObjectId>,
}

impl TileIndex {
    /// Build an index by asking `fill` for the id at every `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `StructuralInconsistency` if `fill` has no id for a cell
    pub fn build(
        shape: Shape,
        mut fill: impl FnMut(usize, usize) -> Option<ObjectId>,
    ) -> Result<Self> {
        let mut cells = Array2::from_elem((shape.rows, shape.columns), ObjectId::default());
        for ((y, x), slot) in cells.indexed_iter_mut() {
            *slot = fill(x, y).ok_or_else(|| missing_cell(x, y))?;
        }
        Ok(Self { cells })
    }

    /// Current shape
    pub fn shape(&self) -> Shape {
        let (rows, columns) = self.cells.dim();
        Shape::new(rows, columns)
    }

    /// Id at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<ObjectId> {
        self.cells.get([y, x]).copied()
    }

    /// Every `(x, y, id)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, ObjectId)> + '_ {
        self.cells.indexed_iter().map(|((y, x), &id)| (x, y, id))
    }

    /// Resize to `shape`, keeping the overlapping region
    ///
    /// Cells outside the old shape are taken from `fill`. Returns the new
    /// index together with the ids that no longer fit, in row-major order.
    ///
    /// # Errors
    ///
    /// Returns `StructuralInconsistency` if `fill` has no id for a new cell
    pub fn resized(
        &self,
        shape: Shape,
        mut fill: impl FnMut(usize, usize) -> Option<ObjectId>,
    ) -> Result<(Self, Vec<ObjectId>)> {
        let old_shape = self.shape();
        let resized = Self::build(shape, |x, y| {
            if old_shape.contains(x, y) {
                self.get(x, y)
            } else {
                fill(x, y)
            }
        })?;

        let dropped = self
            .iter()
            .filter(|&(x, y, _)| !shape.contains(x, y))
            .map(|(_, _, id)| id)
            .collect();

        Ok((resized, dropped))
    }
}

fn missing_cell(x: usize, y: usize) -> crate::io::error::GridError {
    inconsistency(&format!("no tile available for cell ({x}, {y})"))
}
