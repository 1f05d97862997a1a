//! Scene input model
//!
//! Read-only description of the editor scene consumed by the foliage
//! pipeline: objects with leaf primitives, placed instances, layers and
//! materials. The pipeline never mutates any of it.

mod instance;
mod material;
mod object;
mod snapshot;
mod transform;

pub use instance::{SceneInstance, SceneLayer};
pub use material::{
    resolve_material, DirectMaterial, Material, MaterialLibrary, MaterialRefs,
    DEFAULT_MATERIAL_UUID,
};
pub use object::{
    LeafParams, LeafPrimitive, LeafShape, SceneObject,
    DEFAULT_LAYER_ID, DEFAULT_LEAF_RADIUS,
};
pub use snapshot::SceneSnapshot;
pub use transform::Transform;

#[cfg(test)]
#[path = "scene_model_tests.rs"]
mod tests;
