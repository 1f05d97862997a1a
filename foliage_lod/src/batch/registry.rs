/// Stable bucket registry
///
/// Keeps one `UnifiedBucketEntry` per chunk key across passes. An entry
/// keeps its `BatchId` for as long as its key is populated in at least one
/// band, even when the band changes, so a renderer can update the matching
/// GPU batch in place instead of recreating it.
///
/// Lifecycle per pass (`sync`):
/// 1. Union of key strings over the five band bucket sets
/// 2. Entries outside the union are removed
/// 3. Every entry in the union has its band lists replaced (not merged)
/// 4. Both fade maps are recomputed from this pass's blend weights

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use crate::lod::LodPartition;
use crate::scene::Material;
use super::band::{BandMask, LeafBand};
use super::bucketizer::ChunkBuckets;
use super::chunk_key::ChunkKey;
use super::collector::LeafItem;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable identity of a unified bucket entry.
    ///
    /// Valid until the entry's key disappears from every band in a pass.
    pub struct BatchId;
}

// ===== FADE MAP =====

/// Instance uuid → blend position `t` inside a transition window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FadeMap {
    weights: FxHashMap<String, f32>,
}

impl FadeMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blend position of an instance
    pub fn insert(&mut self, instance_uuid: impl Into<String>, t: f32) {
        self.weights.insert(instance_uuid.into(), t);
    }

    /// Blend position of an instance
    pub fn get(&self, instance_uuid: &str) -> Option<f32> {
        self.weights.get(instance_uuid).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    fn collect<'a>(
        items: impl Iterator<Item = &'a LeafItem>,
        blend: &FxHashMap<&str, f32>,
    ) -> Self {
        let mut map = Self::new();
        for item in items {
            let uuid = item.instance().uuid.as_str();
            if let Some(&t) = blend.get(uuid) {
                map.weights.entry(uuid.to_string()).or_insert(t);
            }
        }
        map
    }
}

/// One side of a fade map.
///
/// The simplified side of the near↔far window fades in with `t`; the
/// detailed side of a window fades out with `1 - t`.
#[derive(Debug, Clone, Copy)]
pub struct FadeView<'a> {
    map: &'a FadeMap,
    fade_out: bool,
}

impl<'a> FadeView<'a> {
    /// View of `map` fading in (`t`) or out (`1 - t`)
    pub fn new(map: &'a FadeMap, fade_out: bool) -> Self {
        Self { map, fade_out }
    }

    /// The underlying map
    pub fn map(&self) -> &'a FadeMap {
        self.map
    }

    /// Fade weight of an instance, 1 when absent, clamped to [0, 1].
    pub fn weight(&self, instance_uuid: &str) -> f32 {
        match self.map.get(instance_uuid) {
            Some(t) if self.fade_out => (1.0 - t).clamp(0.0, 1.0),
            Some(t) => t.clamp(0.0, 1.0),
            None => 1.0,
        }
    }
}

// ===== UNIFIED BUCKET ENTRY =====

/// Persistent per-chunk-key entry holding the five band lists.
#[derive(Debug, Clone)]
pub struct UnifiedBucketEntry {
    key_string: String,
    key: ChunkKey,
    material: Material,
    bands: [Vec<LeafItem>; 5],
    near_far_fade: FadeMap,
    far_billboard_fade: FadeMap,
}

impl UnifiedBucketEntry {
    fn new(key_string: String, key: ChunkKey, material: Material) -> Self {
        Self {
            key_string,
            key,
            material,
            bands: Default::default(),
            near_far_fade: FadeMap::new(),
            far_billboard_fade: FadeMap::new(),
        }
    }

    /// Serialized chunk key
    pub fn key_string(&self) -> &str {
        &self.key_string
    }

    /// Chunk key
    pub fn key(&self) -> &ChunkKey {
        &self.key
    }

    /// Resolved material shared by every item
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Items of one band (empty when the band is not populated)
    pub fn items(&self, band: LeafBand) -> &[LeafItem] {
        &self.bands[band.index()]
    }

    /// Bands with at least one item
    pub fn populated_bands(&self) -> BandMask {
        LeafBand::ALL
            .into_iter()
            .filter(|b| !self.bands[b.index()].is_empty())
            .fold(BandMask::empty(), |mask, b| mask | b.mask())
    }

    /// Blend positions of instances in the near↔far window
    pub fn near_far_fade(&self) -> &FadeMap {
        &self.near_far_fade
    }

    /// Blend positions of instances in the far↔billboard window
    pub fn far_billboard_fade(&self) -> &FadeMap {
        &self.far_billboard_fade
    }

    /// Fade source for a band; `None` for solid bands.
    pub fn fade_view(&self, band: LeafBand) -> Option<FadeView<'_>> {
        match band {
            LeafBand::NearSolid | LeafBand::FarSolid => None,
            LeafBand::NearFarNear => Some(FadeView::new(&self.near_far_fade, true)),
            LeafBand::NearFarFar => Some(FadeView::new(&self.near_far_fade, false)),
            LeafBand::FarBillboard => Some(FadeView::new(&self.far_billboard_fade, true)),
        }
    }
}

// ===== SYNC REPORT =====

/// Entry churn of one `sync` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Entries created this pass
    pub created: Vec<BatchId>,
    /// Entries removed this pass, with their key strings
    pub removed: Vec<(BatchId, String)>,
}

// ===== REGISTRY =====

/// Owner of all unified bucket entries.
#[derive(Debug, Default)]
pub struct StableBucketRegistry {
    entries: SlotMap<BatchId, UnifiedBucketEntry>,
    by_key: FxHashMap<String, BatchId>,
}

impl StableBucketRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by id
    pub fn entry(&self, id: BatchId) -> Option<&UnifiedBucketEntry> {
        self.entries.get(id)
    }

    /// Id of the entry for a serialized key
    pub fn lookup(&self, key_string: &str) -> Option<BatchId> {
        self.by_key.get(key_string).copied()
    }

    /// Iterate entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BatchId, &UnifiedBucketEntry)> {
        self.entries.iter()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_key.clear();
    }

    /// Reconcile the registry with one pass of band buckets.
    ///
    /// `pass` is indexed like `LeafBand::ALL`.
    pub fn sync(&mut self, pass: [ChunkBuckets; 5], partition: &LodPartition) -> SyncReport {
        let mut report = SyncReport::default();

        let live: FxHashSet<&str> = pass.iter().flat_map(|b| b.keys()).collect();

        let mut stale: Vec<(String, BatchId)> = self
            .by_key
            .iter()
            .filter(|(key, _)| !live.contains(key.as_str()))
            .map(|(key, id)| (key.clone(), *id))
            .collect();
        stale.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, id) in stale {
            self.by_key.remove(&key);
            self.entries.remove(id);
            report.removed.push((id, key));
        }

        for entry in self.entries.values_mut() {
            for list in entry.bands.iter_mut() {
                list.clear();
            }
        }

        for (band, buckets) in LeafBand::ALL.into_iter().zip(pass) {
            for (key_string, bucket) in buckets.into_vec() {
                let id = match self.by_key.get(&key_string) {
                    Some(&id) => id,
                    None => {
                        let id = self.entries.insert(UnifiedBucketEntry::new(
                            key_string.clone(),
                            bucket.key.clone(),
                            bucket.material.clone(),
                        ));
                        self.by_key.insert(key_string, id);
                        report.created.push(id);
                        id
                    }
                };
                if let Some(entry) = self.entries.get_mut(id) {
                    entry.material = bucket.material;
                    entry.bands[band.index()] = bucket.items;
                }
            }
        }

        let near_far: FxHashMap<&str, f32> = partition
            .near_far_blend
            .iter()
            .map(|b| (b.instance.uuid.as_str(), b.t))
            .collect();
        let far_billboard: FxHashMap<&str, f32> = partition
            .far_billboard_blend
            .iter()
            .map(|b| (b.instance.uuid.as_str(), b.t))
            .collect();

        for entry in self.entries.values_mut() {
            let near_far_items = entry.bands[LeafBand::NearFarNear.index()]
                .iter()
                .chain(entry.bands[LeafBand::NearFarFar.index()].iter());
            entry.near_far_fade = FadeMap::collect(near_far_items, &near_far);
            entry.far_billboard_fade = FadeMap::collect(
                entry.bands[LeafBand::FarBillboard.index()].iter(),
                &far_billboard,
            );
        }

        report
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
