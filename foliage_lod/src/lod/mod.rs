//! Level-of-detail classification
//!
//! Deterministic hashing for stable thinning, and the classifier that
//! splits instances into near / transition / far / billboard / culled groups.

mod classifier;
mod hash_sampler;

pub use classifier::{
    BlendedInstance, LodBand, LodClassifier, LodPartition, LodView, LodWeights,
};
pub use hash_sampler::{hash_str, hash_to_unit};
