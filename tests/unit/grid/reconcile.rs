//! Tests for desired-versus-observed reconciliation

#[cfg(test)]
mod tests {
    use tilegrid::grid::reconcile::{DesiredState, ObservedState, Patch, RunMode, reconcile};
    use tilegrid::grid::Shape;
    use tilegrid::io::configuration::GridConfig;
    use tilegrid::scene::transform::Vec3;

    fn desired(rows: usize, columns: usize, tile_extent: f32) -> DesiredState {
        DesiredState {
            shape: Shape::new(rows, columns),
            tile_extent,
        }
    }

    fn observed(shape: Option<Shape>, extent: f32) -> ObservedState {
        ObservedState {
            shape,
            root_scale: Vec3::new(extent, 1.0, extent),
        }
    }

    // Tests play mode never asks for a rebuild, even with no grid
    #[test]
    fn test_play_mode_is_frozen() {
        let patch = reconcile(&desired(3, 3, 1.0), &observed(None, 1.0), RunMode::Play);
        assert_eq!(patch, None);
    }

    // Tests a missing grid is built from scratch
    #[test]
    fn test_missing_grid_builds() {
        let patch = reconcile(&desired(3, 4, 1.0), &observed(None, 1.0), RunMode::Edit);
        assert_eq!(patch, Some(Patch::Build(Shape::new(3, 4))));
    }

    // Tests a current grid needs nothing
    #[test]
    fn test_current_grid_is_left_alone() {
        let patch = reconcile(
            &desired(3, 3, 2.0),
            &observed(Some(Shape::new(3, 3)), 2.0),
            RunMode::Edit,
        );
        assert_eq!(patch, None);
    }

    // Tests a size change produces an incremental resize
    #[test]
    fn test_size_change_resizes() {
        let patch = reconcile(
            &desired(5, 3, 1.0),
            &observed(Some(Shape::new(3, 3)), 1.0),
            RunMode::Edit,
        );
        assert_eq!(
            patch,
            Some(Patch::Resize {
                from: Shape::new(3, 3),
                to: Shape::new(5, 3),
            })
        );
    }

    // Tests an extent change replaces the grid even when the size is unchanged
    #[test]
    fn test_extent_change_replaces() {
        let patch = reconcile(
            &desired(3, 3, 1.5),
            &observed(Some(Shape::new(3, 3)), 1.0),
            RunMode::Edit,
        );
        assert_eq!(
            patch,
            Some(Patch::Replace {
                from: Shape::new(3, 3),
                to: Shape::new(3, 3),
            })
        );
    }

    // Tests the vertical scale does not take part in the comparison
    #[test]
    fn test_vertical_scale_is_ignored() {
        let state = ObservedState {
            shape: Some(Shape::new(2, 2)),
            root_scale: Vec3::new(1.0, 7.0, 1.0),
        };
        assert_eq!(reconcile(&desired(2, 2, 1.0), &state, RunMode::Edit), None);
    }

    // Tests float noise below the tolerance does not trigger a rebuild
    #[test]
    fn test_scale_tolerance() {
        let state = observed(Some(Shape::new(2, 2)), 1.000_001);
        assert_eq!(reconcile(&desired(2, 2, 1.0), &state, RunMode::Edit), None);
    }

    // Tests patch arithmetic for grow, shrink and mixed resizes
    #[test]
    fn test_patch_counts() {
        let grow = Patch::Resize {
            from: Shape::new(3, 3),
            to: Shape::new(5, 4),
        };
        assert_eq!(grow.rows_added(), 2);
        assert_eq!(grow.columns_added(), 1);
        assert_eq!(grow.rows_removed(), 0);
        assert_eq!(grow.retained(), Shape::new(3, 3));

        let mixed = Patch::Resize {
            from: Shape::new(3, 3),
            to: Shape::new(2, 5),
        };
        assert_eq!(mixed.rows_removed(), 1);
        assert_eq!(mixed.columns_added(), 2);
        assert_eq!(mixed.retained(), Shape::new(2, 3));
        assert_eq!(mixed.target(), Shape::new(2, 5));

        let replace = Patch::Replace {
            from: Shape::new(2, 2),
            to: Shape::new(2, 2),
        };
        assert!(replace.retained().is_empty());
        assert_eq!(replace.rows_removed(), 2);
        assert_eq!(replace.rows_added(), 2);

        let build = Patch::Build(Shape::new(4, 1));
        assert_eq!(build.columns_added(), 1);
        assert_eq!(build.columns_removed(), 0);
    }

    // Tests desired state is read straight from a configuration
    #[test]
    fn test_desired_from_config() {
        let config = GridConfig::new(4, 6, 2.5).expect("valid configuration");
        let state = DesiredState::from(&config);
        assert_eq!(state.shape, Shape::new(4, 6));
        assert!((state.tile_extent - 2.5).abs() < f32::EPSILON);
    }
}
