/// Material references and their resolution.
///
/// Leaves reference materials in three ways, resolved by priority:
/// 1. Direct (inline) material on the primitive
/// 2. Object material, looked up by uuid in the owning object's list
/// 3. Global material, looked up by uuid in the `MaterialLibrary`
/// 4. Sentinel `"default-material"`

use rustc_hash::FxHashMap;
use crate::lod::hash_str;

/// Uuid of the sentinel material used when no reference resolves.
pub const DEFAULT_MATERIAL_UUID: &str = "default-material";

/// A resolved material descriptor handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Stable identifier, part of the batch variant key
    pub uuid: String,
    /// Display name
    pub name: String,
    /// Base color as a CSS hex string
    pub color: String,
    /// Opacity in [0, 1]
    pub opacity: f32,
    /// Emissive color, if any
    pub emissive: Option<String>,
    /// Emissive intensity
    pub emissive_intensity: f32,
}

impl Material {
    /// Create an opaque material
    pub fn new(uuid: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: String::new(),
            color: color.into(),
            opacity: 1.0,
            emissive: None,
            emissive_intensity: 0.0,
        }
    }

    /// Grey sentinel material
    pub fn default_material() -> Self {
        Self {
            name: "Default".to_string(),
            ..Self::new(DEFAULT_MATERIAL_UUID, "#808080")
        }
    }

    /// Whether this is the sentinel material
    pub fn is_default(&self) -> bool {
        self.uuid == DEFAULT_MATERIAL_UUID
    }
}

/// Inline material stored directly on a primitive (legacy form).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectMaterial {
    pub color: Option<String>,
    pub opacity: Option<f32>,
    pub emissive: Option<String>,
    pub emissive_intensity: Option<f32>,
}

impl DirectMaterial {
    /// Convert to a full material.
    ///
    /// The uuid is derived from the properties, so identical inline
    /// materials share batches and keep the same id across passes.
    pub fn to_material(&self) -> Material {
        let color = self.color.clone().unwrap_or_else(|| "#808080".to_string());
        let opacity = self.opacity.filter(|o| o.is_finite()).unwrap_or(1.0).clamp(0.0, 1.0);
        let emissive_intensity = self.emissive_intensity.unwrap_or(0.0);
        let signature = format!(
            "{}|{}|{}|{}",
            color,
            opacity,
            self.emissive.as_deref().unwrap_or(""),
            emissive_intensity
        );
        Material {
            uuid: format!("direct-{:08x}", hash_str(&signature)),
            name: "Inline".to_string(),
            color,
            opacity,
            emissive: self.emissive.clone(),
            emissive_intensity,
        }
    }
}

/// Scene-wide (global) materials, keyed by uuid.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: FxHashMap<String, Material>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a material
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.uuid.clone(), material);
    }

    /// Look up a material by uuid
    pub fn get(&self, uuid: &str) -> Option<&Material> {
        self.materials.get(uuid)
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Everything needed to resolve one leaf's material.
#[derive(Debug, Clone, Copy)]
pub struct MaterialRefs<'a> {
    pub direct: Option<&'a DirectMaterial>,
    pub object_material_uuid: Option<&'a str>,
    pub global_material_uuid: Option<&'a str>,
    pub object_materials: &'a [Material],
}

/// Resolve a material by priority, falling back to the sentinel.
///
/// Unresolvable references are never an error.
pub fn resolve_material(refs: MaterialRefs<'_>, library: &MaterialLibrary) -> Material {
    if let Some(direct) = refs.direct {
        return direct.to_material();
    }

    if let Some(uuid) = refs.object_material_uuid.filter(|u| !u.is_empty()) {
        if let Some(found) = refs.object_materials.iter().find(|m| m.uuid == uuid) {
            return found.clone();
        }
    }

    if let Some(uuid) = refs.global_material_uuid.filter(|u| !u.is_empty()) {
        if let Some(found) = library.get(uuid) {
            return found.clone();
        }
    }

    Material::default_material()
}
