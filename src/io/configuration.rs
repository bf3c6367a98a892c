//! Grid constants and the validated runtime configuration

use crate::io::error::{Result, invalid_configuration};

// Bounds accepted for rows and columns
/// Smallest allowed row or column count
pub const MIN_DIMENSION: usize = 1;
/// Largest allowed row or column count
pub const MAX_DIMENSION: usize = 50;

/// Smallest allowed tile extent
pub const MIN_TILE_EXTENT: f32 = 0.1;
/// Largest allowed tile extent
pub const MAX_TILE_EXTENT: f32 = 16.0;

// Default values for configurable parameters
/// Default row count
pub const DEFAULT_ROWS: usize = 1;
/// Default column count
pub const DEFAULT_COLUMNS: usize = 1;
/// Default tile extent
pub const DEFAULT_TILE_EXTENT: f32 = 1.0;

/// Tiles lie flat: rotated this far about X relative to the grid root
pub const TILE_ROTATION_OFFSET_DEGREES: f32 = 90.0;

// Vectors closer than this compare equal, so float noise never triggers a rebuild
/// Tolerance for scale comparisons
pub const SCALE_EPSILON: f32 = 1e-5;

// Material colours
/// RGBA colour of a locked tile
pub const LOCKED_COLOR: [u8; 4] = [255, 0, 0, 255];
/// RGBA colour of an unlocked tile
pub const UNLOCKED_COLOR: [u8; 4] = [255, 255, 255, 255];

// Output settings
/// Side length of one tile in exported images
pub const DEFAULT_PIXELS_PER_TILE: u32 = 16;
/// Fixed seed for reproducible random reconfiguration
pub const DEFAULT_SEED: u64 = 42;
/// Step count above which the driver shows a progress bar
pub const PROGRESS_THRESHOLD: usize = 8;

/// Desired grid configuration
///
/// Every setter validates its input, so a `GridConfig` always describes a
/// buildable grid. The manager polls it; it is never notified of changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    rows: usize,
    columns: usize,
    tile_extent: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            tile_extent: DEFAULT_TILE_EXTENT,
        }
    }
}

impl GridConfig {
    /// Create a configuration, validating every value
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if any value is out of range
    pub fn new(rows: usize, columns: usize, tile_extent: f32) -> Result<Self> {
        let mut config = Self::default();
        config.set_rows(rows)?;
        config.set_columns(columns)?;
        config.set_tile_extent(tile_extent)?;
        Ok(config)
    }

    /// Configured row count
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Configured column count
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Configured tile extent
    pub const fn tile_extent(&self) -> f32 {
        self.tile_extent
    }

    /// Set the row count
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `rows` is outside
    /// `MIN_DIMENSION..=MAX_DIMENSION`; the stored value is left unchanged
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        self.rows = check_dimension("rows", rows)?;
        Ok(())
    }

    /// Set the column count
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `columns` is outside
    /// `MIN_DIMENSION..=MAX_DIMENSION`; the stored value is left unchanged
    pub fn set_columns(&mut self, columns: usize) -> Result<()> {
        self.columns = check_dimension("columns", columns)?;
        Ok(())
    }

    /// Set the tile extent
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `tile_extent` is not finite or lies
    /// outside `MIN_TILE_EXTENT..=MAX_TILE_EXTENT`
    pub fn set_tile_extent(&mut self, tile_extent: f32) -> Result<()> {
        if !tile_extent.is_finite() {
            return Err(invalid_configuration(
                "tile_extent",
                &tile_extent,
                &"must be a finite number",
            ));
        }
        if !(MIN_TILE_EXTENT..=MAX_TILE_EXTENT).contains(&tile_extent) {
            return Err(invalid_configuration(
                "tile_extent",
                &tile_extent,
                &format!("must lie within {MIN_TILE_EXTENT}..={MAX_TILE_EXTENT}"),
            ));
        }
        self.tile_extent = tile_extent;
        Ok(())
    }

    /// Re-check a configuration whose fields may have been produced elsewhere
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for the first out-of-range value
    pub fn validate(&self) -> Result<()> {
        Self::new(self.rows, self.columns, self.tile_extent).map(|_| ())
    }
}

fn check_dimension(parameter: &'static str, value: usize) -> Result<usize> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(value)
    } else {
        Err(invalid_configuration(
            parameter,
            &value,
            &format!("must lie within {MIN_DIMENSION}..={MAX_DIMENSION}"),
        ))
    }
}

// Random reconfiguration used by the driver's stress mode
/// Largest row or column count picked by a random step
pub const RANDOM_STEP_MAX_DIMENSION: usize = 12;
/// Chance that a random step also changes the tile extent
pub const RANDOM_EXTENT_CHANGE_PROBABILITY: f64 = 0.2;
