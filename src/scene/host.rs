//! Scene object host and its in-memory arena implementation
//!
//! The grid manager never owns scene objects directly. It asks a
//! [`SceneHost`] to create, parent and destroy them and keeps only the
//! returned [`ObjectId`]s. [`Scene`] is an arena host: destroying an object
//! frees its slot and every id that pointed at it stops resolving.

use crate::io::error::{Result, host_failure};
use crate::scene::tile::Tile;
use crate::scene::transform::{Transform, Vec3};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle to an object living in a scene
    pub struct ObjectId;
}

/// Contract the grid manager relies on for object lifetime
///
/// Calls are synchronous. Implementations report failure through
/// `HostOperationFailed` rather than panicking.
pub trait SceneHost {
    /// Create an empty object with no tile component
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the object cannot be created
    fn create_root(&mut self, transform: Transform) -> Result<ObjectId>;

    /// Create a static quad carrying an unlocked tile component
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the object cannot be created
    fn create_primitive_tile(&mut self, transform: Transform) -> Result<ObjectId>;

    /// Clone `template` at a new position and rotation, without a parent
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the template is not live or the
    /// clone cannot be created
    fn instantiate(&mut self, template: ObjectId, position: Vec3, rotation: Vec3)
    -> Result<ObjectId>;

    /// Attach `child` under `parent`
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if either object is not live
    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> Result<()>;

    /// Destroy an object and everything parented under it
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the object is not live
    fn destroy_immediate(&mut self, id: ObjectId) -> Result<()>;

    /// Every live object carrying a tile component
    fn find_all_tiles(&self) -> Vec<ObjectId>;

    /// Whether `id` refers to a live object
    fn contains(&self, id: ObjectId) -> bool;

    /// Transform of a live object
    fn transform(&self, id: ObjectId) -> Option<Transform>;

    /// Overwrite the local scale of an object
    ///
    /// # Errors
    ///
    /// Returns `HostOperationFailed` if the object is not live
    fn set_local_scale(&mut self, id: ObjectId, scale: Vec3) -> Result<()>;

    /// Tile component of a live object
    fn tile(&self, id: ObjectId) -> Option<&Tile>;

    /// Mutable tile component of a live object
    fn tile_mut(&mut self, id: ObjectId) -> Option<&mut Tile>;
}

/// A single object in a [`Scene`]
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Placement of the object
    pub transform: Transform,
    /// Owning object, if attached
    pub parent: Option<ObjectId>,
    /// Objects attached under this one
    pub children: Vec<ObjectId>,
    /// Static objects never move after creation
    pub is_static: bool,
    /// Tile component, present on grid cells and tile templates
    pub tile: Option<Tile>,
}

impl SceneObject {
    const fn new(transform: Transform, is_static: bool, tile: Option<Tile>) -> Self {
        Self {
            transform,
            parent: None,
            children: Vec::new(),
            is_static,
            tile,
        }
    }
}

/// Arena-backed scene host
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
    object_limit: Option<usize>,
}

impl Scene {
    /// Create an empty, unbounded scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene that refuses to hold more than `limit` live objects
    pub fn with_object_limit(limit: usize) -> Self {
        Self {
            objects: SlotMap::with_key(),
            object_limit: Some(limit),
        }
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Look up a live object
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Change or lift the live object limit
    pub const fn set_object_limit(&mut self, limit: Option<usize>) {
        self.object_limit = limit;
    }

    fn insert(&mut self, object: SceneObject, operation: &'static str) -> Result<ObjectId> {
        if let Some(limit) = self.object_limit.filter(|&limit| self.objects.len() >= limit) {
            return Err(host_failure(
                operation,
                &format!("scene object limit of {limit} reached"),
            ));
        }
        Ok(self.objects.insert(object))
    }

    fn detach(&mut self, id: ObjectId) {
        let parent = self.objects.get(id).and_then(|object| object.parent);
        if let Some(parent) = parent.and_then(|parent| self.objects.get_mut(parent)) {
            parent.children.retain(|&child| child != id);
        }
        if let Some(object) = self.objects.get_mut(id) {
            object.parent = None;
        }
    }
}

impl SceneHost for Scene {
    fn create_root(&mut self, transform: Transform) -> Result<ObjectId> {
        self.insert(SceneObject::new(transform, false, None), "create root")
    }

    fn create_primitive_tile(&mut self, transform: Transform) -> Result<ObjectId> {
        self.insert(
            SceneObject::new(transform, true, Some(Tile::new())),
            "create primitive tile",
        )
    }

    fn instantiate(
        &mut self,
        template: ObjectId,
        position: Vec3,
        rotation: Vec3,
    ) -> Result<ObjectId> {
        let source = self
            .objects
            .get(template)
            .ok_or_else(|| host_failure("instantiate", &"template object is not live"))?;

        let mut clone = SceneObject::new(source.transform, source.is_static, source.tile.clone());
        clone.transform.position = position;
        clone.transform.rotation = rotation;

        self.insert(clone, "instantiate")
    }

    fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> Result<()> {
        if !self.objects.contains_key(child) {
            return Err(host_failure("set parent", &"child object is not live"));
        }
        if !self.objects.contains_key(parent) {
            return Err(host_failure("set parent", &"parent object is not live"));
        }

        self.detach(child);
        if let Some(object) = self.objects.get_mut(child) {
            object.parent = Some(parent);
        }
        if let Some(object) = self.objects.get_mut(parent) {
            object.children.push(child);
        }
        Ok(())
    }

    fn destroy_immediate(&mut self, id: ObjectId) -> Result<()> {
        if !self.objects.contains_key(id) {
            return Err(host_failure("destroy", &"object is not live"));
        }

        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(object) = self.objects.remove(next) {
                pending.extend(object.children);
            }
        }
        Ok(())
    }

    fn find_all_tiles(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, object)| object.tile.is_some())
            .map(|(id, _)| id)
            .collect()
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.objects.get(id).map(|object| object.transform)
    }

    fn set_local_scale(&mut self, id: ObjectId, scale: Vec3) -> Result<()> {
        let object = self
            .objects
            .get_mut(id)
            .ok_or_else(|| host_failure("set local scale", &"object is not live"))?;
        object.transform.scale = scale;
        Ok(())
    }

    fn tile(&self, id: ObjectId) -> Option<&Tile> {
        self.objects.get(id).and_then(|object| object.tile.as_ref())
    }

    fn tile_mut(&mut self, id: ObjectId) -> Option<&mut Tile> {
        self.objects.get_mut(id).and_then(|object| object.tile.as_mut())
    }
}
