//! Tests for grid constants and configuration validation

#[cfg(test)]
mod tests {
    use tilegrid::io::configuration::{
        DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_TILE_EXTENT, GridConfig, LOCKED_COLOR,
        MAX_DIMENSION, MAX_TILE_EXTENT, MIN_DIMENSION, MIN_TILE_EXTENT, UNLOCKED_COLOR,
    };
    use tilegrid::GridError;

    // Tests the accepted ranges
    #[test]
    fn test_bounds_values() {
        assert_eq!(MIN_DIMENSION, 1);
        assert_eq!(MAX_DIMENSION, 50);
        assert!((MIN_TILE_EXTENT - 0.1).abs() < f32::EPSILON);
        assert!((MAX_TILE_EXTENT - 16.0).abs() < f32::EPSILON);
    }

    // Tests locked and unlocked colours differ
    #[test]
    fn test_colors_differ() {
        assert_ne!(LOCKED_COLOR, UNLOCKED_COLOR);
    }

    // Tests the default configuration uses the default constants
    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!(config.rows(), DEFAULT_ROWS);
        assert_eq!(config.columns(), DEFAULT_COLUMNS);
        assert!((config.tile_extent() - DEFAULT_TILE_EXTENT).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    // Tests edge values are accepted
    #[test]
    fn test_edge_values_accepted() {
        assert!(GridConfig::new(MIN_DIMENSION, MAX_DIMENSION, MIN_TILE_EXTENT).is_ok());
        assert!(GridConfig::new(MAX_DIMENSION, MIN_DIMENSION, MAX_TILE_EXTENT).is_ok());
    }

    // Tests out-of-range dimensions are rejected and the old value kept
    #[test]
    fn test_dimension_rejected() {
        let mut config = GridConfig::new(3, 3, 1.0).expect("valid configuration");

        let error = config.set_rows(0).expect_err("zero rows");
        assert!(matches!(
            error,
            GridError::InvalidConfiguration {
                parameter: "rows",
                ..
            }
        ));
        assert!(config.set_columns(MAX_DIMENSION + 1).is_err());
        assert_eq!(config.rows(), 3);
        assert_eq!(config.columns(), 3);
    }

    // Tests non-finite and out-of-range extents are rejected
    #[test]
    fn test_extent_rejected() {
        let mut config = GridConfig::default();
        assert!(config.set_tile_extent(0.0).is_err());
        assert!(config.set_tile_extent(-1.0).is_err());
        assert!(config.set_tile_extent(16.5).is_err());
        assert!(config.set_tile_extent(f32::NAN).is_err());
        assert!(config.set_tile_extent(f32::INFINITY).is_err());
        assert!((config.tile_extent() - DEFAULT_TILE_EXTENT).abs() < f32::EPSILON);
    }

    // Tests setters apply valid values
    #[test]
    fn test_setters_apply() {
        let mut config = GridConfig::default();
        config.set_rows(7).expect("valid rows");
        config.set_columns(9).expect("valid columns");
        config.set_tile_extent(2.5).expect("valid extent");

        assert_eq!(config, GridConfig::new(7, 9, 2.5).expect("valid configuration"));
    }
}
