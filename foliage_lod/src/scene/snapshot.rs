/// SceneSnapshot - immutable view of the editor scene for one pass.
///
/// The editor owns and mutates its scene; before each pass it hands the
/// foliage pipeline a snapshot. Objects and instances are shared through
/// `Arc` so building a snapshot never deep-copies leaf data.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use super::instance::{SceneInstance, SceneLayer};
use super::material::MaterialLibrary;
use super::object::SceneObject;

/// Objects, instances, layers and global materials of one pass.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    objects: FxHashMap<String, Arc<SceneObject>>,
    instances: Vec<Arc<SceneInstance>>,
    layers: Vec<SceneLayer>,
    materials: MaterialLibrary,
}

impl SceneSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object definition
    pub fn add_object(&mut self, object: impl Into<Arc<SceneObject>>) {
        let object = object.into();
        self.objects.insert(object.uuid.clone(), object);
    }

    /// Append an instance
    pub fn add_instance(&mut self, instance: impl Into<Arc<SceneInstance>>) {
        self.instances.push(instance.into());
    }

    /// Append a layer
    pub fn add_layer(&mut self, layer: SceneLayer) {
        self.layers.push(layer);
    }

    /// Global material library
    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    /// Mutable access to the global material library
    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    /// Object definitions by uuid
    pub fn objects(&self) -> &FxHashMap<String, Arc<SceneObject>> {
        &self.objects
    }

    /// Look up an object definition
    pub fn object(&self, uuid: &str) -> Option<&Arc<SceneObject>> {
        self.objects.get(uuid)
    }

    /// All instances, in insertion order
    pub fn instances(&self) -> &[Arc<SceneInstance>] {
        &self.instances
    }

    /// All layers
    pub fn layers(&self) -> &[SceneLayer] {
        &self.layers
    }

    /// Whether the layer is visible. Unknown layers count as visible.
    pub fn is_layer_visible(&self, layer_id: &str) -> bool {
        self.layers
            .iter()
            .find(|l| l.id == layer_id)
            .map_or(true, |l| l.visible)
    }

    /// Whether an instance renders: its object exists, and the layer, the
    /// object and the instance are all visible.
    pub fn is_instance_visible(&self, instance: &SceneInstance) -> bool {
        match self.objects.get(&instance.object_uuid) {
            Some(object) => {
                instance.visible && object.visible && self.is_layer_visible(object.layer_id())
            }
            None => false,
        }
    }

    /// Visible instances whose object carries at least one leaf.
    pub fn visible_leaf_instances(&self) -> Vec<Arc<SceneInstance>> {
        self.instances
            .iter()
            .filter(|inst| {
                self.objects
                    .get(&inst.object_uuid)
                    .is_some_and(|obj| obj.has_leaves())
                    && self.is_instance_visible(inst)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
