/// Scene object definitions and their leaf primitives.
///
/// Objects are definitions; `SceneInstance`s place them in the world.
/// Only the leaf-related part of an object is modelled here.

use super::material::{DirectMaterial, Material, MaterialRefs};
use super::transform::Transform;

/// Layer id assumed for objects without an explicit layer.
pub const DEFAULT_LAYER_ID: &str = "objects";

/// Radius used when a leaf has no usable radius.
pub const DEFAULT_LEAF_RADIUS: f32 = 0.5;

/// Visual shape of a leaf.
///
/// Only textured sprites are produced by the editor today; the enum keeps
/// the shape explicit in batch keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeafShape {
    /// Textured quad cut from a sprite atlas
    #[default]
    Texture,
}

impl LeafShape {
    /// Name used in serialized batch keys
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafShape::Texture => "texture",
        }
    }
}

/// One leaf sub-element of an object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeafPrimitive {
    /// Stable identifier (preferred hash input)
    pub uuid: String,
    /// Optional name (hash input when uuid is empty)
    pub name: Option<String>,
    /// Base size of the leaf
    pub radius: f32,
    pub shape: LeafShape,
    /// Sprite name inside the object's texture set
    pub sprite: Option<String>,
    /// Transform relative to the owning instance
    pub transform: Transform,
    pub direct_material: Option<DirectMaterial>,
    pub object_material_uuid: Option<String>,
    pub global_material_uuid: Option<String>,
}

impl LeafPrimitive {
    /// Create a leaf with a uuid and radius
    pub fn new(uuid: impl Into<String>, radius: f32) -> Self {
        Self {
            uuid: uuid.into(),
            radius,
            ..Self::default()
        }
    }

    /// Set the transform relative to the instance
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the sprite name
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// Reference a material from the owning object's list
    pub fn with_object_material(mut self, uuid: impl Into<String>) -> Self {
        self.object_material_uuid = Some(uuid.into());
        self
    }

    /// Reference a global material
    pub fn with_global_material(mut self, uuid: impl Into<String>) -> Self {
        self.global_material_uuid = Some(uuid.into());
        self
    }

    /// Attach an inline material
    pub fn with_direct_material(mut self, material: DirectMaterial) -> Self {
        self.direct_material = Some(material);
        self
    }

    /// Identifier that is invariant across frames and instances.
    pub fn stable_id(&self) -> &str {
        if !self.uuid.is_empty() {
            &self.uuid
        } else {
            match self.name.as_deref() {
                Some(name) if !name.is_empty() => name,
                _ => "leaf",
            }
        }
    }

    /// Radius, falling back to `DEFAULT_LEAF_RADIUS` for zero, negative or NaN.
    pub fn effective_radius(&self) -> f32 {
        if self.radius.is_finite() && self.radius > 0.0 {
            self.radius
        } else {
            DEFAULT_LEAF_RADIUS
        }
    }
}

/// Object-level leaf appearance parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeafParams {
    /// Texture set the sprites are cut from
    pub texture_set_id: Option<String>,
    /// Strength of recoloring toward the material color
    pub paint_factor: Option<f32>,
    /// Per-leaf random darkening amount in [0, 1]
    pub paint_jitter: f32,
}

/// A scene object definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub uuid: String,
    pub name: String,
    /// Layer this object belongs to (`None` = default layer)
    pub layer_id: Option<String>,
    pub visible: bool,
    pub leaves: Vec<LeafPrimitive>,
    /// Materials owned by the object
    pub materials: Vec<Material>,
    pub leaf_params: LeafParams,
}

impl SceneObject {
    /// Create a visible object with no leaves
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: String::new(),
            layer_id: None,
            visible: true,
            leaves: Vec::new(),
            materials: Vec::new(),
            leaf_params: LeafParams::default(),
        }
    }

    /// Append a leaf
    pub fn with_leaf(mut self, leaf: LeafPrimitive) -> Self {
        self.leaves.push(leaf);
        self
    }

    /// Append an owned material
    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    /// Set the layer
    pub fn with_layer(mut self, layer_id: impl Into<String>) -> Self {
        self.layer_id = Some(layer_id.into());
        self
    }

    /// Set visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set leaf appearance parameters
    pub fn with_leaf_params(mut self, params: LeafParams) -> Self {
        self.leaf_params = params;
        self
    }

    /// Effective layer id
    pub fn layer_id(&self) -> &str {
        self.layer_id.as_deref().unwrap_or(DEFAULT_LAYER_ID)
    }

    /// Whether the object carries any leaves
    pub fn has_leaves(&self) -> bool {
        !self.leaves.is_empty()
    }

    /// Material references of one of this object's leaves
    pub fn material_refs<'a>(&'a self, leaf: &'a LeafPrimitive) -> MaterialRefs<'a> {
        MaterialRefs {
            direct: leaf.direct_material.as_ref(),
            object_material_uuid: leaf.object_material_uuid.as_deref(),
            global_material_uuid: leaf.global_material_uuid.as_deref(),
            object_materials: &self.materials,
        }
    }
}
