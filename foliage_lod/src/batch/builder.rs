/// Batch transform builder
///
/// Turns one band's item list of a unified bucket entry into a GPU-ready
/// `LeafBatch`: chunk-local element matrices, fade and paint arrays, the
/// draw variant and a bounding sphere.
///
/// Element placement (instance frame outer, leaf frame inner):
///
/// ```text
/// rotation = q_instance * q_leaf
/// world    = q_instance * (leaf_position * instance_scale) + instance_position
/// uniform  = radius * cbrt|instance_scale| * cbrt|leaf_scale| * scale_mul
/// size     = (uniform * aspect, uniform, uniform)
/// local    = world - (cx, 0, cz) + rotation * ((0.5 - u) * size.x, (v - 0.5) * size.y, 0)
/// ```

use glam::{Mat4, Vec3};
use crate::lod::hash_to_unit;
use crate::scene::{LeafShape, Material};
use super::collector::LeafItem;
use super::registry::{FadeView, UnifiedBucketEntry};
use super::sprite::SpriteInfo;

/// Bounding radius margin for fixed-orientation elements.
pub const BOUNDS_MARGIN: f32 = 1.06;
/// Bounding radius margin for elements that turn toward the viewer.
pub const VIEWER_FACING_BOUNDS_MARGIN: f32 = 1.5;

// ===== OUTPUT TYPES =====

/// Bounding sphere in chunk-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Whether a chunk-local point lies inside (or on) the sphere
    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Center in world space, given the chunk anchor
    pub fn world_center(&self, chunk_anchor: Vec3) -> Vec3 {
        chunk_anchor + self.center
    }
}

/// Draw-state shared by every element of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafVariant {
    pub shape: LeafShape,
    pub material: Material,
    pub texture_set_id: Option<String>,
    pub sprite: Option<String>,
    pub paint_factor: Option<f32>,
    /// Width / height of the sprite
    pub aspect: f32,
}

/// Owner of one element, for picking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPick {
    pub object_uuid: String,
    pub instance_uuid: String,
    pub layer_id: String,
}

/// Renderable batch of one (entry, band).
///
/// `transforms`, `fades`, `paint_muls` and `owners` are parallel arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafBatch {
    /// Chunk center (cx, 0, cz); element transforms are relative to it
    pub chunk_anchor: Vec3,
    pub transforms: Vec<Mat4>,
    /// Cross-fade weights in [0, 1]
    pub fades: Vec<f32>,
    /// Brightness multipliers in [0, 1]
    pub paint_muls: Vec<f32>,
    pub variant: LeafVariant,
    pub bounds: BoundingSphere,
    pub owners: Vec<LeafPick>,
}

impl LeafBatch {
    /// Number of elements
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the batch has no elements (never true for built batches)
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Owner of the element at `element_index`
    pub fn pick(&self, element_index: usize) -> Option<&LeafPick> {
        self.owners.get(element_index)
    }

    /// Element matrices as raw bytes (16 f32 per element, column-major)
    pub fn transform_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }

    /// Fade weights as raw bytes
    pub fn fade_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.fades)
    }

    /// Paint multipliers as raw bytes
    pub fn paint_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.paint_muls)
    }
}

// ===== BUILD =====

/// Per-band build inputs.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams<'a> {
    /// Size multiplier (1 for detailed bands)
    pub scale_mul: f32,
    pub sprite: SpriteInfo,
    /// Fade source; `None` gives every element weight 1
    pub fade: Option<FadeView<'a>>,
}

impl Default for BuildParams<'_> {
    fn default() -> Self {
        Self {
            scale_mul: 1.0,
            sprite: SpriteInfo::default(),
            fade: None,
        }
    }
}

fn element_size(shape: LeafShape, uniform: f32, aspect: f32) -> Vec3 {
    match shape {
        LeafShape::Texture => Vec3::new(uniform * aspect, uniform, uniform),
    }
}

/// Brightness multiplier of one element, stable across passes.
pub fn paint_multiplier(instance_uuid: &str, leaf_id: &str, jitter: f32) -> f32 {
    let jitter = if jitter.is_finite() { jitter.clamp(0.0, 1.0) } else { 0.0 };
    if jitter == 0.0 {
        return 1.0;
    }
    1.0 - jitter * hash_to_unit(&format!("{}/{}", instance_uuid, leaf_id))
}

/// Build the batch of `items`, which belong to `entry`.
///
/// Returns `None` for an empty item list.
pub fn build_batch(
    entry: &UnifiedBucketEntry,
    items: &[LeafItem],
    params: &BuildParams<'_>,
) -> Option<LeafBatch> {
    if items.is_empty() {
        return None;
    }

    let key = entry.key();
    let chunk_anchor = key.anchor();
    let sprite = params.sprite.sanitized();

    let mut transforms = Vec::with_capacity(items.len());
    let mut fades = Vec::with_capacity(items.len());
    let mut paint_muls = Vec::with_capacity(items.len());
    let mut owners = Vec::with_capacity(items.len());

    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    let mut reach = 0.0f32;

    for item in items {
        let object = item.object();
        let instance = item.instance();
        let leaf = item.leaf();

        let instance_rotation = instance.transform.rotation();
        let rotation = instance_rotation * leaf.transform.rotation();
        let world = instance_rotation * (leaf.transform.position() * instance.transform.scale())
            + instance.transform.position();

        let uniform = leaf.effective_radius()
            * instance.transform.uniform_scale()
            * leaf.transform.uniform_scale()
            * params.scale_mul;
        let size = element_size(leaf.shape, uniform, sprite.aspect);

        let anchor_offset = rotation
            * Vec3::new(
                (0.5 - sprite.anchor.x) * size.x,
                (sprite.anchor.y - 0.5) * size.y,
                0.0,
            );
        let local = world - chunk_anchor + anchor_offset;

        transforms.push(Mat4::from_scale_rotation_translation(size, rotation, local));
        fades.push(params.fade.map_or(1.0, |f| f.weight(&instance.uuid)));
        paint_muls.push(paint_multiplier(
            &instance.uuid,
            leaf.stable_id(),
            object.leaf_params.paint_jitter,
        ));
        owners.push(LeafPick {
            object_uuid: object.uuid.clone(),
            instance_uuid: instance.uuid.clone(),
            layer_id: object.layer_id().to_string(),
        });

        let half_height = 0.5 * size.y;
        min_y = min_y.min(local.y - half_height);
        max_y = max_y.max(local.y + half_height);
        reach = reach.max(local.x.hypot(local.z) + size.x.max(size.z));
    }

    let margin = if sprite.viewer_facing {
        VIEWER_FACING_BOUNDS_MARGIN
    } else {
        BOUNDS_MARGIN
    };
    let bounds = BoundingSphere {
        center: Vec3::new(0.0, (min_y + max_y) * 0.5, 0.0),
        radius: reach.max((max_y - min_y) * 0.5) * margin,
    };

    Some(LeafBatch {
        chunk_anchor,
        transforms,
        fades,
        paint_muls,
        variant: LeafVariant {
            shape: key.shape,
            material: entry.material().clone(),
            texture_set_id: key.texture_set_id.clone(),
            sprite: key.sprite.clone(),
            paint_factor: key.paint_factor,
            aspect: sprite.aspect,
        },
        bounds,
        owners,
    })
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
