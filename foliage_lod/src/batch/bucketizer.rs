/// Grouping of leaf items into per-chunk buckets.

use rustc_hash::FxHashMap;
use crate::config::DEFAULT_CHUNK_SIZE;
use crate::scene::{resolve_material, Material, MaterialLibrary};
use super::chunk_key::ChunkKey;
use super::collector::LeafItem;

/// Leaf items sharing one chunk key.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafBucket {
    pub key: ChunkKey,
    /// Material resolved for the first item; all items share its uuid
    pub material: Material,
    pub items: Vec<LeafItem>,
}

/// Buckets of one band, in first-appearance order of their keys.
#[derive(Debug, Clone, Default)]
pub struct ChunkBuckets {
    buckets: Vec<(String, LeafBucket)>,
    index: FxHashMap<String, usize>,
}

impl ChunkBuckets {
    /// Empty set of buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for a serialized key
    pub fn get(&self, key: &str) -> Option<&LeafBucket> {
        self.index.get(key).map(|&i| &self.buckets[i].1)
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether there are no buckets
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of items across buckets
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|(_, b)| b.items.len()).sum()
    }

    /// Iterate `(key string, bucket)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LeafBucket)> {
        self.buckets.iter().map(|(k, b)| (k.as_str(), b))
    }

    /// Serialized keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(k, _)| k.as_str())
    }

    fn push(&mut self, key: ChunkKey, material: Material, item: LeafItem) {
        let key_string = key.to_key_string();
        match self.index.get(&key_string) {
            Some(&i) => self.buckets[i].1.items.push(item),
            None => {
                self.index.insert(key_string.clone(), self.buckets.len());
                self.buckets.push((key_string, LeafBucket {
                    key,
                    material,
                    items: vec![item],
                }));
            }
        }
    }

    /// Consume into `(key string, bucket)` pairs.
    pub fn into_vec(self) -> Vec<(String, LeafBucket)> {
        self.buckets
    }
}

/// Group items by chunk cell of their instance and by draw-state.
///
/// Items keep their input order inside each bucket. A non-positive or
/// non-finite `chunk_size` falls back to `DEFAULT_CHUNK_SIZE`.
pub fn bucketize_by_chunks(
    items: Vec<LeafItem>,
    chunk_size: f32,
    materials: &MaterialLibrary,
) -> ChunkBuckets {
    let chunk_size = if chunk_size.is_finite() && chunk_size > 0.0 {
        chunk_size
    } else {
        DEFAULT_CHUNK_SIZE
    };

    let mut out = ChunkBuckets::new();
    for item in items {
        let object = item.object();
        let leaf = item.leaf();
        let material = resolve_material(object.material_refs(leaf), materials);

        let key = ChunkKey::at(
            item.instance().transform.position(),
            chunk_size,
            leaf.shape,
            material.uuid.clone(),
        )
        .with_sprite(object.leaf_params.texture_set_id.clone(), leaf.sprite.clone())
        .with_paint_factor(object.leaf_params.paint_factor);

        out.push(key, material, item);
    }
    out
}

#[cfg(test)]
#[path = "bucketizer_tests.rs"]
mod tests;
