//! Grid lifecycle manager
//!
//! Owns the tile index and is the only code that mutates it. Each tick it
//! compares the desired configuration with what exists in the scene and, in
//! edit mode, applies the smallest structural change that closes the gap:
//! rows and columns are appended or removed in place, tiles that stay keep
//! their identity, and lock states are recomputed against the final shape.
//!
//! A rebuild creates everything it needs before it touches the index. When
//! the host refuses a creation, the objects made so far are destroyed and the
//! previous grid is left exactly as it was. Tiles leaving the grid are
//! destroyed last; any the host refuses stay queued, and the grid counts as
//! stale until they are gone.

use std::collections::HashMap;

use log::{debug, info, warn};
use ndarray::Array2;

use crate::grid::boundary::is_boundary;
use crate::grid::index::{Shape, TileIndex};
use crate::grid::reconcile::{DesiredState, ObservedState, Patch, RunMode, reconcile};
use crate::io::configuration::GridConfig;
use crate::io::error::{GridError, Result, inconsistency};
use crate::scene::host::{ObjectId, SceneHost};
use crate::scene::tile::Tile;
use crate::scene::transform::{Transform, Vec3, extent_scale, tile_position, tile_rotation};

/// Summary of one completed rebuild
#[derive(Debug)]
pub struct RebuildReport {
    /// Structural change that was applied
    pub patch: Patch,
    /// Tiles instantiated
    pub created: usize,
    /// Tiles destroyed
    pub destroyed: usize,
    /// Surviving tiles whose lock state flipped
    pub relocked: usize,
    /// Inconsistency found going in, answered with a full rebuild
    pub recovered_from: Option<GridError>,
}

/// Owner of the grid root and its tile index
#[derive(Debug, Default)]
pub struct GridManager {
    root: Option<ObjectId>,
    tiles: Option<TileIndex>,
    // Unindexed tiles whose destruction the host refused
    pending_destroy: Vec<ObjectId>,
}

type CreatedTiles = HashMap<(usize, usize), ObjectId>;

impl GridManager {
    /// Manager with no root and no tiles
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid root object, once initialized
    pub const fn root(&self) -> Option<ObjectId> {
        self.root
    }

    /// Shape of the tile collection, if one exists
    pub fn shape(&self) -> Option<Shape> {
        self.tiles.as_ref().map(TileIndex::shape)
    }

    /// Tile object at column `x`, row `y`
    pub fn tile_at(&self, x: usize, y: usize) -> Option<ObjectId> {
        self.tiles.as_ref().and_then(|index| index.get(x, y))
    }

    /// Tile index, if one exists
    pub const fn tiles(&self) -> Option<&TileIndex> {
        self.tiles.as_ref()
    }

    /// Tiles removed from the grid that are still waiting to be destroyed
    pub fn pending_destroy(&self) -> &[ObjectId] {
        &self.pending_destroy
    }

    /// Lock state of every tile, indexed `[y, x]`
    ///
    /// `None` when no collection exists or an indexed tile is not live.
    pub fn lock_map<H: SceneHost + ?Sized>(&self, host: &H) -> Option<Array2<bool>> {
        self.sample(host, Tile::is_locked)
    }

    /// Material colour of every tile, indexed `[y, x]`
    pub fn material_colors<H: SceneHost + ?Sized>(&self, host: &H) -> Option<Array2<[u8; 4]>> {
        self.sample(host, |tile| tile.material().color())
    }

    fn sample<H, T>(&self, host: &H, read: impl Fn(&Tile) -> T) -> Option<Array2<T>>
    where
        H: SceneHost + ?Sized,
    {
        let index = self.tiles.as_ref()?;
        let shape = index.shape();
        let values = index
            .iter()
            .map(|(_, _, id)| host.tile(id).map(&read))
            .collect::<Option<Vec<_>>>()?;
        Array2::from_shape_vec((shape.rows, shape.columns), values).ok()
    }

    /// Create the grid root if there is none
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the host cannot create the root
    pub fn initialize<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> Result<ObjectId> {
        if let Some(root) = self.root {
            return Ok(root);
        }
        let root = host.create_root(Transform::IDENTITY)?;
        debug!("Grid root created");
        self.root = Some(root);
        Ok(root)
    }

    /// Run one update check, rebuilding when the grid is stale
    ///
    /// Returns the rebuild report, or `None` when nothing had to change.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::reclaim_orphans`] or [`Self::rebuild`]
    pub fn tick<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        config: &GridConfig,
        mode: RunMode,
    ) -> Result<Option<RebuildReport>> {
        if !self.should_rebuild(host, config, mode) {
            return Ok(None);
        }
        self.reclaim_orphans(host)?;
        self.rebuild(host, config).map(Some)
    }

    /// Destroy every tile and the root, returning how many tiles went
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the host refuses a destruction; the
    /// refused tiles stay queued and the root is kept for a later attempt
    pub fn teardown<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
        let destroyed = self.discard_tiles(host)?;
        if let Some(root) = self.root.take().filter(|&root| host.contains(root)) {
            host.destroy_immediate(root)?;
        }
        info!("Grid torn down ({destroyed} tiles destroyed)");
        Ok(destroyed)
    }

    /// Whether the grid is missing, misshapen, mis-scaled or broken, or
    /// removed tiles are still waiting to be destroyed
    ///
    /// Always false in play mode.
    pub fn should_rebuild<H: SceneHost + ?Sized>(
        &self,
        host: &H,
        config: &GridConfig,
        mode: RunMode,
    ) -> bool {
        if mode == RunMode::Play {
            return false;
        }
        !self.pending_destroy.is_empty()
            || self.check_integrity(host).is_err()
            || reconcile(&DesiredState::from(config), &self.observe(host), mode).is_some()
    }

    /// Destroy tiles left in the scene by a previous owner
    ///
    /// Only acts while no collection exists; with a live collection every
    /// tile is accounted for and nothing is touched.
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the host refuses a destruction
    pub fn reclaim_orphans<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
        if self.tiles.is_some() {
            return Ok(0);
        }

        let mut reclaimed = 0;
        for id in host.find_all_tiles() {
            if host.contains(id) {
                host.destroy_immediate(id)?;
                debug!("Destroyed orphaned tile {id:?}");
                reclaimed += 1;
            }
        }
        if reclaimed > 0 {
            warn!("Reclaimed {reclaimed} orphaned tiles");
        }
        Ok(reclaimed)
    }

    /// Bring the grid in line with `config`
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if `config` is out of range
    /// - `HostOperationFailed` if the host refuses an operation; failures
    ///   before the new index is published leave the previous grid
    ///   untouched, and refused destructions after it stay queued so
    ///   [`Self::should_rebuild`] keeps reporting the grid as stale
    /// - `StructuralInconsistency` if a tile disappears during the rebuild
    pub fn rebuild<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        config: &GridConfig,
    ) -> Result<RebuildReport> {
        config.validate()?;

        let mut recovered_from = None;
        if let Err(error) = self.check_integrity(host) {
            warn!("{error}; rebuilding from scratch");
            self.discard_tiles(host)?;
            if self.root.is_some_and(|root| !host.contains(root)) {
                self.root = None;
            }
            recovered_from = Some(error);
        }

        let root = self.initialize(host)?;
        let root_transform = host
            .transform(root)
            .ok_or_else(|| inconsistency(&"grid root is not live"))?;

        let desired = DesiredState::from(config);
        let patch = reconcile(&desired, &self.observe(host), RunMode::Edit).unwrap_or(
            Patch::Resize {
                from: desired.shape,
                to: desired.shape,
            },
        );
        let target = patch.target();
        let retained = patch.retained();

        let new_cells: Vec<_> = target
            .cells()
            .filter(|&(x, y)| !retained.contains(x, y))
            .collect();
        let created = create_tiles(
            host,
            root,
            &root_transform,
            config.tile_extent(),
            &new_cells,
        )?;

        let staged = self.commit_index(patch, &created).and_then(|(index, dropped)| {
            let relocked = apply_locks(host, &index, target, &created)?;
            host.set_local_scale(root, extent_scale(config.tile_extent(), root_transform.scale))?;
            Ok((index, dropped, relocked))
        });
        let (index, dropped, relocked) = match staged {
            Ok(staged) => staged,
            Err(error) => {
                rollback(host, created);
                return Err(error);
            }
        };
        self.tiles = Some(index);
        self.pending_destroy.extend(dropped);
        let destroyed = self.destroy_pending(host)?;

        info!(
            "Grid rebuilt to {}x{} ({} created, {destroyed} destroyed, {relocked} relocked)",
            target.rows,
            target.columns,
            created.len()
        );

        Ok(RebuildReport {
            patch,
            created: created.len(),
            destroyed,
            relocked,
            recovered_from,
        })
    }

    fn observe<H: SceneHost + ?Sized>(&self, host: &H) -> ObservedState {
        let root_scale = self
            .root
            .and_then(|root| host.transform(root))
            .map_or(Vec3::ONE, |transform| transform.scale);
        ObservedState {
            shape: self.shape(),
            root_scale,
        }
    }

    fn check_integrity<H: SceneHost + ?Sized>(&self, host: &H) -> Result<()> {
        if self.root.is_some_and(|root| !host.contains(root)) {
            return Err(inconsistency(&"grid root is no longer live"));
        }

        let Some(index) = &self.tiles else {
            return Ok(());
        };
        if self.root.is_none() {
            return Err(inconsistency(&"tiles exist without a grid root"));
        }

        let missing = index
            .iter()
            .filter(|&(_, _, id)| host.tile(id).is_none())
            .count();
        if missing > 0 {
            return Err(inconsistency(&format!(
                "{missing} of {} indexed tiles are no longer live",
                index.shape().len()
            )));
        }
        Ok(())
    }

    fn discard_tiles<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
        if let Some(index) = self.tiles.take() {
            self.pending_destroy.extend(index.iter().map(|(_, _, id)| id));
        }
        self.destroy_pending(host)
    }

    // Ids the host already dropped are forgotten; refused ones stay queued
    fn destroy_pending<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> Result<usize> {
        let mut destroyed = 0;
        let mut first_error = None;
        self.pending_destroy.retain(|&id| {
            if !host.contains(id) {
                return false;
            }
            match host.destroy_immediate(id) {
                Ok(()) => {
                    debug!("Destroyed tile {id:?}");
                    destroyed += 1;
                    false
                }
                Err(error) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                    true
                }
            }
        });

        match first_error {
            None => Ok(destroyed),
            Some(error) => {
                warn!(
                    "{} tiles could not be destroyed and stay queued: {error}",
                    self.pending_destroy.len()
                );
                Err(error)
            }
        }
    }

    // Pure: the new index plus the ids leaving it
    fn commit_index(
        &self,
        patch: Patch,
        created: &CreatedTiles,
    ) -> Result<(TileIndex, Vec<ObjectId>)> {
        let fill = |x: usize, y: usize| created.get(&(x, y)).copied();
        match (patch, &self.tiles) {
            (Patch::Resize { .. }, Some(existing)) => existing.resized(patch.target(), fill),
            (_, existing) => {
                let index = TileIndex::build(patch.target(), fill)?;
                let dropped = existing
                    .iter()
                    .flat_map(TileIndex::iter)
                    .map(|(_, _, id)| id)
                    .collect();
                Ok((index, dropped))
            }
        }
    }
}

// Single pass against the final shape, after every row and column exists
fn apply_locks<H: SceneHost + ?Sized>(
    host: &mut H,
    index: &TileIndex,
    target: Shape,
    created: &CreatedTiles,
) -> Result<usize> {
    let mut relocked = 0;
    for (x, y, id) in index.iter() {
        let locked = is_boundary(x, y, target);
        let is_new = created.contains_key(&(x, y));
        let tile = host
            .tile_mut(id)
            .ok_or_else(|| inconsistency(&format!("tile ({x}, {y}) vanished mid-rebuild")))?;

        if tile.is_locked() != locked {
            if !is_new {
                relocked += 1;
            }
            tile.set_locked(locked);
        } else if is_new {
            tile.set_locked(locked);
        }
    }
    Ok(relocked)
}

fn create_tiles<H: SceneHost + ?Sized>(
    host: &mut H,
    root: ObjectId,
    root_transform: &Transform,
    extent: f32,
    cells: &[(usize, usize)],
) -> Result<CreatedTiles> {
    let mut created = CreatedTiles::with_capacity(cells.len());
    if cells.is_empty() {
        return Ok(created);
    }

    let mut template_transform = Transform::at(root_transform.position);
    template_transform.scale = template_transform.scale.scaled(extent);
    let template = host.create_primitive_tile(template_transform)?;

    let mut instantiate_all = || -> Result<()> {
        let rotation = tile_rotation(root_transform);
        for &(x, y) in cells {
            let position = tile_position(root_transform, x, y, extent);
            let id = host.instantiate(template, position, rotation)?;
            created.insert((x, y), id);
            host.set_parent(id, root)?;
            debug!("Instantiated tile ({x}, {y})");
        }
        Ok(())
    };
    let outcome = instantiate_all();
    let outcome = outcome.and_then(|()| host.destroy_immediate(template));

    match outcome {
        Ok(()) => Ok(created),
        Err(error) => {
            let cleanup = if host.contains(template) {
                host.destroy_immediate(template)
            } else {
                Ok(())
            };
            if let Err(cleanup) = cleanup {
                warn!("Failed to destroy tile template: {cleanup}");
            }
            rollback(host, created);
            Err(error)
        }
    }
}

fn rollback<H: SceneHost + ?Sized>(host: &mut H, created: CreatedTiles) {
    let count = created.len();
    for id in created.into_values() {
        if let Err(error) = host.destroy_immediate(id) {
            warn!("Rollback could not destroy a tile: {error}");
        }
    }
    warn!("Rebuild aborted; {count} new tiles rolled back");
}
