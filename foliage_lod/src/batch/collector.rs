/// Leaf element collection with stable far-band thinning.
///
/// A `LeafItem` is the (object, instance, leaf) triple rendered as one
/// element of a batch. Items are ephemeral: recollected every pass.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::lod::hash_to_unit;
use crate::scene::{LeafPrimitive, SceneInstance, SceneObject};

/// Sampling ratios at or above this keep every leaf.
pub const FULL_SAMPLING_CUTOFF: f32 = 0.999;

/// One renderable leaf: a leaf of `object`, placed by `instance`.
#[derive(Debug, Clone)]
pub struct LeafItem {
    object: Arc<SceneObject>,
    instance: Arc<SceneInstance>,
    leaf_index: usize,
}

impl LeafItem {
    /// Owning object definition
    pub fn object(&self) -> &Arc<SceneObject> {
        &self.object
    }

    /// Placing instance
    pub fn instance(&self) -> &Arc<SceneInstance> {
        &self.instance
    }

    /// Index of the leaf inside `object().leaves`
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    /// The leaf primitive
    pub fn leaf(&self) -> &LeafPrimitive {
        &self.object.leaves[self.leaf_index]
    }

    fn same_object_inputs(&self, other: &Self) -> bool {
        self.object.uuid == other.object.uuid
            && self.object.layer_id == other.object.layer_id
            && self.object.leaf_params == other.object.leaf_params
            && self.leaf() == other.leaf()
    }
}

// Compares what a batch is built from: the instance, the leaf itself and
// the object fields copied into each element. Other leaves of the object
// do not take part.
impl PartialEq for LeafItem {
    fn eq(&self, other: &Self) -> bool {
        self.leaf_index == other.leaf_index
            && (Arc::ptr_eq(&self.instance, &other.instance) || self.instance == other.instance)
            && (Arc::ptr_eq(&self.object, &other.object) || self.same_object_inputs(other))
    }
}

/// Per-object mask of leaves kept at `ratio`.
///
/// Computed from each leaf's stable id only, so every instance of one
/// object keeps exactly the same subset.
pub fn sample_mask(object: &SceneObject, ratio: f32) -> Vec<bool> {
    let ratio = ratio.clamp(0.0, 1.0);
    object
        .leaves
        .iter()
        .map(|leaf| hash_to_unit(leaf.stable_id()) <= ratio)
        .collect()
}

/// Gather the leaves of `instances`.
///
/// With `sample_ratio` below `FULL_SAMPLING_CUTOFF`, only leaves whose
/// stable-id hash is `<= ratio` are kept. Instances whose object is missing
/// are skipped.
pub fn collect_leaf_items(
    objects: &FxHashMap<String, Arc<SceneObject>>,
    instances: &[Arc<SceneInstance>],
    sample_ratio: Option<f32>,
) -> Vec<LeafItem> {
    let sampling = sample_ratio.filter(|r| *r < FULL_SAMPLING_CUTOFF);
    let mut masks: FxHashMap<&str, Vec<bool>> = FxHashMap::default();
    let mut out = Vec::new();

    for instance in instances {
        let Some(object) = objects.get(&instance.object_uuid) else {
            continue;
        };

        let mask = match sampling {
            Some(ratio) => Some(
                masks
                    .entry(object.uuid.as_str())
                    .or_insert_with(|| sample_mask(object, ratio))
                    .as_slice(),
            ),
            None => None,
        };

        for leaf_index in 0..object.leaves.len() {
            if mask.is_some_and(|mask| !mask[leaf_index]) {
                continue;
            }
            out.push(LeafItem {
                object: object.clone(),
                instance: instance.clone(),
                leaf_index,
            });
        }
    }
    out
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
