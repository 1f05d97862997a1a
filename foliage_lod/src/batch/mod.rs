//! Leaf batching
//!
//! Collect leaves per band, group them by chunk cell and draw-state, keep
//! bucket identity stable across passes, and build renderable batches.

mod band;
mod bucketizer;
mod builder;
mod chunk_key;
mod collector;
mod registry;
mod sprite;

pub use band::{BandMask, LeafBand};
pub use bucketizer::{bucketize_by_chunks, ChunkBuckets, LeafBucket};
pub use builder::{
    build_batch, paint_multiplier, BoundingSphere, BuildParams, LeafBatch, LeafPick,
    LeafVariant, BOUNDS_MARGIN, VIEWER_FACING_BOUNDS_MARGIN,
};
pub use chunk_key::{chunk_center, ChunkKey};
pub use collector::{collect_leaf_items, sample_mask, LeafItem, FULL_SAMPLING_CUTOFF};
pub use registry::{
    BatchId, FadeMap, FadeView, StableBucketRegistry, SyncReport, UnifiedBucketEntry,
};
pub use sprite::{NoSprites, SpriteCatalog, SpriteInfo, StaticSpriteCatalog};
