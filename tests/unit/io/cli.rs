//! Tests for step parsing, argument handling and the driver loop

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tilegrid::grid::{RunMode, Shape};
    use tilegrid::io::cli::{Cli, Driver, Step};
    use tilegrid::io::configuration::RANDOM_STEP_MAX_DIMENSION;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tilegrid").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    // Tests steps with and without an extent
    #[test]
    fn test_parse_step() {
        let plain: Step = "5x3".parse().expect("valid step");
        assert_eq!(
            plain,
            Step {
                rows: 5,
                columns: 3,
                tile_extent: None,
            }
        );

        let scaled: Step = " 2X4@1.5".trim().parse().expect("valid step");
        assert_eq!(scaled.rows, 2);
        assert_eq!(scaled.columns, 4);
        assert_eq!(scaled.tile_extent, Some(1.5));
    }

    // Tests malformed steps are rejected with the argument name
    #[test]
    fn test_parse_step_rejects_garbage() {
        for bad in ["5", "ax3", "3x", "3x3@wide", ""] {
            let result = bad.parse::<Step>();
            assert!(
                result.is_err_and(|e| e.to_string().contains("step")),
                "accepted {bad:?}"
            );
        }
    }

    // Tests argument parsing and defaults
    #[test]
    fn test_cli_arguments() {
        let parsed = cli(&["-r", "3", "-c", "4", "--step", "5x3", "-s", "2x3@2", "--play"]);

        assert_eq!(parsed.rows, 3);
        assert_eq!(parsed.columns, 4);
        assert_eq!(parsed.steps.len(), 2);
        assert_eq!(parsed.mode(), RunMode::Play);
        assert!(parsed.output.is_none());

        assert!(Cli::try_parse_from(["tilegrid", "--step", "nonsense"]).is_err());
    }

    // Tests the plan applies steps cumulatively, keeping the extent when omitted
    #[test]
    fn test_plan_from_steps() {
        let driver = Driver::new(cli(&["-r", "3", "-c", "3", "-s", "5x3@2", "-s", "2x3"]));
        let plan = driver.plan().expect("valid plan");

        assert_eq!(plan.len(), 3);
        let last = plan.last().expect("three entries");
        assert_eq!((last.rows(), last.columns()), (2, 3));
        assert!((last.tile_extent() - 2.0).abs() < f32::EPSILON);
    }

    // Tests an out-of-range step fails the plan
    #[test]
    fn test_plan_rejects_invalid_step() {
        let driver = Driver::new(cli(&["-s", "0x3"]));
        assert!(driver.plan().is_err());
    }

    // Tests random steps are seeded and bounded
    #[test]
    fn test_random_plan_is_reproducible() {
        let first = Driver::new(cli(&["--random", "20", "--seed", "7"]))
            .plan()
            .expect("valid plan");
        let second = Driver::new(cli(&["--random", "20", "--seed", "7"]))
            .plan()
            .expect("valid plan");

        assert_eq!(first, second);
        assert_eq!(first.len(), 21);
        assert!(
            first
                .iter()
                .all(|c| c.rows() <= RANDOM_STEP_MAX_DIMENSION
                    && c.columns() <= RANDOM_STEP_MAX_DIMENSION)
        );
    }

    // Tests a scripted run ends on the last configuration and passes its checks
    #[test]
    fn test_driver_run_scripted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("grid.png");
        let output_arg = output.to_string_lossy().to_string();
        let mut driver = Driver::new(cli(&[
            "-r", "3", "-c", "3", "-s", "5x3", "-s", "2x3", "-s", "4x4@1.5", "--quiet", "-o",
            &output_arg,
        ]));

        driver.run().expect("run succeeds");

        assert_eq!(driver.manager().shape(), Some(Shape::new(4, 4)));
        assert!(output.exists());
    }

    // Tests a random stress run keeps the invariant on every tick
    #[test]
    fn test_driver_run_random() {
        let mut driver = Driver::new(cli(&["--random", "40", "--seed", "3", "--quiet"]));
        driver.run().expect("every tick verified");
        assert!(driver.manager().shape().is_some());
    }

    // Tests play mode builds nothing
    #[test]
    fn test_driver_play_mode() {
        let mut driver = Driver::new(cli(&["-r", "3", "-c", "3", "--play", "--quiet"]));
        driver.run().expect("run succeeds");

        assert_eq!(driver.manager().shape(), None);
        assert_eq!(driver.scene().object_count(), 0);
    }

    // Tests verification flags a grid that disagrees with the configuration
    #[test]
    fn test_verify_detects_mismatch() {
        let mut driver = Driver::new(cli(&["-r", "2", "-c", "2", "--quiet"]));
        driver.run().expect("run succeeds");

        let other = tilegrid::io::configuration::GridConfig::new(3, 3, 1.0)
            .expect("valid configuration");
        assert!(driver.verify(&other).is_err_and(|e| e.is_structural()));
    }

    // Tests installing the logger twice keeps the first one without failing
    #[test]
    fn test_init_logging_twice() {
        let cli = cli(&["-q"]);
        cli.init_logging();
        cli.init_logging();
        log::error!("still logging after a second install");
    }
}
