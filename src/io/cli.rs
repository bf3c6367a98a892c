//! Command-line interface and the external driver loop
//!
//! The driver plays the role of the host application: it owns a scene and a
//! grid manager, changes the configuration between ticks and calls
//! [`GridManager::tick`] once per configuration.

use crate::grid::boundary::boundary_mask;
use crate::grid::index::Shape;
use crate::grid::manager::GridManager;
use crate::grid::reconcile::RunMode;
use crate::io::configuration::{
    DEFAULT_COLUMNS, DEFAULT_PIXELS_PER_TILE, DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_TILE_EXTENT,
    GridConfig, MAX_TILE_EXTENT, MIN_DIMENSION, MIN_TILE_EXTENT,
    RANDOM_EXTENT_CHANGE_PROBABILITY, RANDOM_STEP_MAX_DIMENSION,
};
use crate::io::error::{GridError, Result, inconsistency};
use crate::io::image::export_colors_as_png;
use crate::io::progress::ProgressManager;
use crate::io::visualization::{lock_counts, render_lock_map};
use crate::scene::host::Scene;
use clap::{ArgAction, Parser};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use std::str::FromStr;

/// One reconfiguration applied between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// New row count
    pub rows: usize,
    /// New column count
    pub columns: usize,
    /// New tile extent, or keep the previous one
    pub tile_extent: Option<f32>,
}

impl FromStr for Step {
    type Err = GridError;

    /// Parse `ROWSxCOLUMNS` or `ROWSxCOLUMNS@EXTENT`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| GridError::InvalidArgument {
            argument: "step",
            reason: format!("'{s}': {reason}"),
        };

        let (size, extent) = match s.split_once('@') {
            Some((size, extent)) => (size, Some(extent)),
            None => (s, None),
        };
        let (rows, columns) = size
            .split_once(['x', 'X'])
            .ok_or_else(|| invalid("expected ROWSxCOLUMNS[@EXTENT]".to_string()))?;

        let rows = rows
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(format!("rows: {e}")))?;
        let columns = columns
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(format!("columns: {e}")))?;
        let tile_extent = extent
            .map(|extent| extent.trim().parse::<f32>())
            .transpose()
            .map_err(|e| invalid(format!("extent: {e}")))?;

        Ok(Self {
            rows,
            columns,
            tile_extent,
        })
    }
}

fn parse_step(s: &str) -> std::result::Result<Step, String> {
    s.parse().map_err(|e: GridError| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "tilegrid")]
#[command(
    author,
    version,
    about = "Build a boundary-locked tile grid and resize it tick by tick"
)]
/// Command-line arguments for the grid driver
pub struct Cli {
    /// Initial row count
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Initial column count
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Initial tile extent
    #[arg(short, long, default_value_t = DEFAULT_TILE_EXTENT)]
    pub extent: f32,

    /// Reconfigure before the next tick (repeatable)
    #[arg(short, long = "step", value_name = "ROWSxCOLUMNS[@EXTENT]", value_parser = parse_step)]
    pub steps: Vec<Step>,

    /// Number of seeded random reconfigurations appended after the steps
    #[arg(long, default_value_t = 0)]
    pub random: usize,

    /// Random seed for reproducible reconfiguration
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Run every tick in play mode, where the grid never changes
    #[arg(long)]
    pub play: bool,

    /// Export the final grid as a PNG
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Side length of one tile in the exported PNG
    #[arg(long, default_value_t = DEFAULT_PIXELS_PER_TILE)]
    pub pixels_per_tile: u32,

    /// Suppress progress and the final map
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Install the logger; `RUST_LOG` overrides the verbosity flags
    pub fn init_logging(&self) {
        let level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        let env = env_logger::Env::default().default_filter_or(level);
        if let Err(error) = env_logger::Builder::from_env(env).try_init() {
            debug!("Keeping the installed logger: {error}");
        }
    }

    /// Run mode requested on the command line
    pub const fn mode(&self) -> RunMode {
        if self.play { RunMode::Play } else { RunMode::Edit }
    }
}

/// Owns the scene and manager and ticks them through a configuration plan
pub struct Driver {
    cli: Cli,
    scene: Scene,
    manager: GridManager,
}

impl Driver {
    /// Create a driver with an empty scene
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            scene: Scene::new(),
            manager: GridManager::new(),
        }
    }

    /// Scene the grid lives in
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Grid manager being driven
    pub const fn manager(&self) -> &GridManager {
        &self.manager
    }

    /// Configurations to tick through, initial one first
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for the first out-of-range value
    pub fn plan(&self) -> Result<Vec<GridConfig>> {
        let mut config = GridConfig::new(self.cli.rows, self.cli.columns, self.cli.extent)?;
        let mut plan = Vec::with_capacity(1 + self.cli.steps.len() + self.cli.random);
        plan.push(config);

        for step in &self.cli.steps {
            config.set_rows(step.rows)?;
            config.set_columns(step.columns)?;
            if let Some(extent) = step.tile_extent {
                config.set_tile_extent(extent)?;
            }
            plan.push(config);
        }

        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        for _ in 0..self.cli.random {
            config.set_rows(rng.random_range(MIN_DIMENSION..=RANDOM_STEP_MAX_DIMENSION))?;
            config.set_columns(rng.random_range(MIN_DIMENSION..=RANDOM_STEP_MAX_DIMENSION))?;
            if rng.random_bool(RANDOM_EXTENT_CHANGE_PROBABILITY) {
                config.set_tile_extent(rng.random_range(MIN_TILE_EXTENT..=MAX_TILE_EXTENT))?;
            }
            plan.push(config);
        }

        Ok(plan)
    }

    /// Tick through the plan, check every result, then print and export
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is invalid, a tick fails, a tick leaves
    /// the grid violating the lock invariant, or the export fails
    pub fn run(&mut self) -> Result<()> {
        let plan = self.plan()?;
        let mode = self.cli.mode();
        let progress = ProgressManager::new(plan.len(), self.cli.quiet);

        for (tick, config) in plan.iter().enumerate() {
            if let Some(report) = self.manager.tick(&mut self.scene, config, mode)? {
                if let Some(cause) = &report.recovered_from {
                    warn!("Tick {tick} recovered from: {cause}");
                }
                info!(
                    "Tick {tick}: {:?} (+{} -{} ~{})",
                    report.patch, report.created, report.destroyed, report.relocked
                );
            }
            if mode == RunMode::Edit {
                self.verify(config)?;
            }
            progress.tick(config.rows(), config.columns());
        }
        progress.finish();

        if !self.cli.quiet {
            self.print_summary();
        }
        self.export()
    }

    /// Check shape and lock state against `config`
    ///
    /// # Errors
    ///
    /// Returns `StructuralInconsistency` describing the first mismatch
    pub fn verify(&self, config: &GridConfig) -> Result<()> {
        let expected = Shape::new(config.rows(), config.columns());
        let map = self
            .manager
            .lock_map(&self.scene)
            .ok_or_else(|| inconsistency(&"no grid after an edit-mode tick"))?;

        if map.dim() != (expected.rows, expected.columns) {
            return Err(inconsistency(&format!(
                "grid is {}x{} but {}x{} is configured",
                map.nrows(),
                map.ncols(),
                expected.rows,
                expected.columns
            )));
        }
        if map != boundary_mask(expected) {
            return Err(inconsistency(&"lock states disagree with the boundary"));
        }
        Ok(())
    }

    // Allow print for the final map, the tool's primary output
    #[allow(clippy::print_stdout)]
    fn print_summary(&self) {
        match self.manager.lock_map(&self.scene) {
            Some(map) => {
                let (locked, unlocked) = lock_counts(&map);
                print!("{}", render_lock_map(&map));
                println!(
                    "{}x{} grid: {locked} locked, {unlocked} unlocked",
                    map.nrows(),
                    map.ncols()
                );
            }
            None => println!("No grid built"),
        }
    }

    fn export(&self) -> Result<()> {
        let Some(output) = &self.cli.output else {
            return Ok(());
        };
        let colors = self
            .manager
            .material_colors(&self.scene)
            .ok_or_else(|| inconsistency(&"no grid to export"))?;
        export_colors_as_png(&colors, self.cli.pixels_per_tile, output)?;
        info!("Exported grid to {}", output.display());
        Ok(())
    }
}
