/*!
# Foliage LOD

Chunked, level-of-detail batching of leaf elements for a 3D scene editor.

Every pass takes an immutable scene snapshot and a camera, and produces
renderable leaf batches whose identity stays stable across passes, so the
renderer can update GPU buffers in place.

## Architecture

- **scene**: read-only input model (objects, leaves, instances, layers, materials)
- **lod**: deterministic hashing and the LOD classifier
- **batch**: leaf collection, chunk bucketing, stable bucket registry, batch building
- **LeafLodPipeline**: owns the registry and runs one pass per `update`

## Example

```
use foliage_lod::foliage::{LeafBatchConfig, LeafLodPipeline};
use foliage_lod::foliage::batch::NoSprites;
use foliage_lod::foliage::lod::LodView;
use foliage_lod::foliage::scene::{LeafPrimitive, SceneInstance, SceneObject, SceneSnapshot, Transform};
use foliage_lod::glam::Vec3;

let mut snapshot = SceneSnapshot::new();
snapshot.add_object(SceneObject::new("oak").with_leaf(LeafPrimitive::new("leaf-0", 0.5)));
snapshot.add_instance(SceneInstance::new("oak-1", "oak", Transform::from_position(4.0, 0.0, 2.0)));

let mut pipeline = LeafLodPipeline::new(LeafBatchConfig::default())?;
let report = pipeline.update(&snapshot, &LodView::new(Vec3::ZERO), &NoSprites);
assert_eq!(report.rebuilt.len(), 1);
# Ok::<(), foliage_lod::foliage::Error>(())
```
*/

// Internal modules
mod config;
mod error;
mod facade;
mod pipeline;
pub mod batch;
pub mod log;
pub mod lod;
pub mod scene;

// Main foliage namespace module
pub mod foliage {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger facade
    pub use crate::facade::Foliage;

    // Configuration
    pub use crate::config::{LeafBatchConfig, LodConfig, DEFAULT_CHUNK_SIZE};

    // Pass orchestration
    pub use crate::pipeline::{LeafLodPipeline, PassReport};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Scene input sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // LOD classification sub-module
    pub mod lod {
        pub use crate::lod::*;
    }

    // Batching sub-module
    pub mod batch {
        pub use crate::batch::*;
    }
}

// Re-export math library at crate root
pub use glam;
