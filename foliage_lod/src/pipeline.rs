/// Leaf LOD pipeline
///
/// Owns the stable bucket registry and the batch cache, and runs one
/// classify → collect → bucketize → sync → build pass per `update`.
///
/// Bands and their inputs:
///
/// | band           | instances         | sampling | scale          | fade  |
/// |----------------|-------------------|----------|----------------|-------|
/// | NearSolid      | near solid        | no       | 1              | 1     |
/// | NearFarNear    | near↔far window   | no       | 1              | 1 - t |
/// | NearFarFar     | near↔far window   | yes      | far_scale_mul  | t     |
/// | FarSolid       | far solid         | yes      | far_scale_mul  | 1     |
/// | FarBillboard   | far↔billboard     | yes      | far_scale_mul  | 1 - t |

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::batch::{
    build_batch, bucketize_by_chunks, collect_leaf_items, BatchId, BuildParams, FadeMap,
    LeafBand, LeafBatch, LeafItem, SpriteCatalog, SpriteInfo, StableBucketRegistry,
};
use crate::config::LeafBatchConfig;
use crate::error::Result;
use crate::lod::{LodClassifier, LodView, LodWeights};
use crate::scene::{Material, SceneSnapshot};
use crate::{foliage_debug, foliage_info, foliage_trace};

const SOURCE: &str = "foliage::Pipeline";

/// Outcome of one `update` pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    /// Batches built this pass (new or changed)
    pub rebuilt: Vec<(BatchId, LeafBand)>,
    /// Batches carried over unchanged from the previous pass
    pub reused: Vec<(BatchId, LeafBand)>,
    /// Batches that existed last pass and are gone now
    pub removed: Vec<(BatchId, LeafBand)>,
    pub entries_created: usize,
    pub entries_removed: usize,
    /// Instances in any rendered group
    pub instances_rendered: usize,
    pub instances_culled: usize,
}

impl PassReport {
    /// Whether the renderer has anything to upload or release
    pub fn has_changes(&self) -> bool {
        !self.rebuilt.is_empty() || !self.removed.is_empty()
    }
}

/// Inputs a batch was built from, compared by value on the next pass.
struct CachedBatch {
    items: Vec<LeafItem>,
    scale_mul: f32,
    sprite: SpriteInfo,
    material: Material,
    fade: Option<FadeMap>,
    batch: LeafBatch,
}

impl CachedBatch {
    fn matches(
        &self,
        items: &[LeafItem],
        scale_mul: f32,
        sprite: &SpriteInfo,
        material: &Material,
        fade: Option<&FadeMap>,
    ) -> bool {
        self.scale_mul == scale_mul
            && self.sprite == *sprite
            && self.fade.as_ref() == fade
            && self.material == *material
            && self.items.as_slice() == items
    }
}

/// Owner of the registry and of all current leaf batches.
pub struct LeafLodPipeline {
    config: LeafBatchConfig,
    classifier: LodClassifier,
    registry: StableBucketRegistry,
    batches: FxHashMap<(BatchId, LeafBand), CachedBatch>,
    /// Batch slots of the last pass, in build order
    order: Vec<(BatchId, LeafBand)>,
}

impl LeafLodPipeline {
    /// Create a pipeline after validating `config`.
    pub fn new(config: LeafBatchConfig) -> Result<Self> {
        config.validate()?;
        foliage_info!(SOURCE, "Leaf pipeline created (chunk size {}, LOD {})",
            config.chunk_size,
            if config.lod.enabled { "on" } else { "off" });
        Ok(Self {
            classifier: LodClassifier::new(config.lod.clone()),
            config,
            registry: StableBucketRegistry::new(),
            batches: FxHashMap::default(),
            order: Vec::new(),
        })
    }

    pub fn config(&self) -> &LeafBatchConfig {
        &self.config
    }

    pub fn classifier(&self) -> &LodClassifier {
        &self.classifier
    }

    pub fn registry(&self) -> &StableBucketRegistry {
        &self.registry
    }

    /// Replace the configuration.
    ///
    /// Registry entries survive; batches whose inputs change are rebuilt
    /// on the next `update`.
    pub fn set_config(&mut self, config: LeafBatchConfig) -> Result<()> {
        config.validate()?;
        self.classifier = LodClassifier::new(config.lod.clone());
        self.config = config;
        Ok(())
    }

    /// LOD weights of a single position, without running a pass.
    pub fn lod_weights(&self, view: &LodView, position: Vec3) -> LodWeights {
        self.classifier.weights(self.classifier.metric(view, position))
    }

    /// Batch of one entry in one band
    pub fn batch(&self, id: BatchId, band: LeafBand) -> Option<&LeafBatch> {
        self.batches.get(&(id, band)).map(|c| &c.batch)
    }

    /// Current batches in build order
    pub fn batches(&self) -> impl Iterator<Item = (BatchId, LeafBand, &LeafBatch)> + '_ {
        self.order
            .iter()
            .filter_map(|slot| self.batches.get(slot).map(|c| (slot.0, slot.1, &c.batch)))
    }

    /// Number of current batches
    pub fn batch_count(&self) -> usize {
        self.order.len()
    }

    /// Drop all entries and batches
    pub fn clear(&mut self) {
        self.registry.clear();
        self.batches.clear();
        self.order.clear();
    }

    /// Run one pass over `snapshot` as seen from `view`.
    pub fn update(
        &mut self,
        snapshot: &SceneSnapshot,
        view: &LodView,
        sprites: &dyn SpriteCatalog,
    ) -> PassReport {
        let visible = snapshot.visible_leaf_instances();
        let partition = self.classifier.partition(&visible, view);

        let objects = snapshot.objects();
        let ratio = Some(self.config.lod.far_sample_ratio);
        let near_far = partition.near_far_instances();
        let far_billboard = partition.far_billboard_instances();

        // Indexed like LeafBand::ALL
        let band_items = [
            collect_leaf_items(objects, &partition.near_solid, None),
            collect_leaf_items(objects, &near_far, None),
            collect_leaf_items(objects, &near_far, ratio),
            collect_leaf_items(objects, &partition.far_solid, ratio),
            collect_leaf_items(objects, &far_billboard, ratio),
        ];
        let chunk_size = self.config.chunk_size;
        let materials = snapshot.materials();
        let pass = band_items.map(|items| bucketize_by_chunks(items, chunk_size, materials));
        let bucket_counts: Vec<usize> = pass.iter().map(|b| b.len()).collect();

        let sync = self.registry.sync(pass, &partition);

        let mut report = PassReport {
            entries_created: sync.created.len(),
            entries_removed: sync.removed.len(),
            instances_rendered: partition.rendered_count(),
            instances_culled: partition.culled.len(),
            ..PassReport::default()
        };

        if !sync.created.is_empty() || !sync.removed.is_empty() {
            foliage_debug!(SOURCE,
                "Buckets near={} nf-near={} nf-far={} far={} fb={}, entries +{} -{} ({} live)",
                bucket_counts[0], bucket_counts[1], bucket_counts[2],
                bucket_counts[3], bucket_counts[4],
                sync.created.len(), sync.removed.len(), self.registry.len());
        }

        let far_scale_mul = self.config.lod.far_scale_mul;
        let mut next = FxHashMap::default();
        let mut order = Vec::new();

        for (id, entry) in self.registry.iter() {
            let key = entry.key();
            let sprite = sprites
                .sprite(key.texture_set_id.as_deref(), key.sprite.as_deref())
                .unwrap_or_default()
                .sanitized();

            for band in LeafBand::ALL {
                let items = entry.items(band);
                if items.is_empty() {
                    continue;
                }
                let slot = (id, band);
                let scale_mul = if band.is_simplified() { far_scale_mul } else { 1.0 };
                let fade = entry.fade_view(band);

                let reusable = self.batches.remove(&slot).filter(|cached| {
                    cached.matches(items, scale_mul, &sprite, entry.material(), fade.map(|f| f.map()))
                });
                let cached = match reusable {
                    Some(mut cached) => {
                        // Hold the current snapshot's Arcs so the next pass
                        // hits the pointer fast path.
                        cached.items = items.to_vec();
                        report.reused.push(slot);
                        cached
                    }
                    None => {
                        let params = BuildParams { scale_mul, sprite, fade };
                        let Some(batch) = build_batch(entry, items, &params) else {
                            continue;
                        };
                        report.rebuilt.push(slot);
                        CachedBatch {
                            items: items.to_vec(),
                            scale_mul,
                            sprite,
                            material: entry.material().clone(),
                            fade: fade.map(|f| f.map().clone()),
                            batch,
                        }
                    }
                };
                next.insert(slot, cached);
                order.push(slot);
            }
        }

        let mut removed: Vec<(BatchId, LeafBand)> = self.batches.keys().copied().collect();
        removed.sort();
        report.removed = removed;
        self.batches = next;
        self.order = order;

        foliage_trace!(SOURCE, "Batches rebuilt={} reused={} removed={}",
            report.rebuilt.len(), report.reused.len(), report.removed.len());

        report
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
