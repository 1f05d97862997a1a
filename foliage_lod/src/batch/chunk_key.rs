/// Chunk keys: the identity of a leaf bucket.
///
/// A key combines the XZ chunk cell of an instance with everything that
/// forces a separate draw: shape, material, texture set, sprite and paint
/// factor. Its string form is the registry lookup key.

use std::fmt;
use glam::Vec3;
use crate::scene::LeafShape;

/// Prefix of every serialized key.
const KEY_PREFIX: &str = "bb";
/// Placeholder for an absent texture set or sprite.
const DEFAULT_PART: &str = "def";
/// Placeholder for an absent paint factor.
const NO_PAINT: &str = "na";

/// Center of the chunk cell containing `coord` on one axis.
pub fn chunk_center(coord: f32, chunk_size: f32) -> f32 {
    (coord / chunk_size).floor() * chunk_size + chunk_size * 0.5
}

/// Identity of a leaf bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkKey {
    /// X of the chunk center
    pub cx: f32,
    /// Z of the chunk center
    pub cz: f32,
    pub shape: LeafShape,
    /// Uuid of the resolved material
    pub material_uuid: String,
    pub texture_set_id: Option<String>,
    pub sprite: Option<String>,
    pub paint_factor: Option<f32>,
}

impl ChunkKey {
    /// Build the key of an instance at `position`.
    pub fn at(
        position: Vec3,
        chunk_size: f32,
        shape: LeafShape,
        material_uuid: impl Into<String>,
    ) -> Self {
        Self {
            cx: chunk_center(position.x, chunk_size),
            cz: chunk_center(position.z, chunk_size),
            shape,
            material_uuid: material_uuid.into(),
            texture_set_id: None,
            sprite: None,
            paint_factor: None,
        }
    }

    /// Set texture set and sprite
    pub fn with_sprite(mut self, texture_set_id: Option<String>, sprite: Option<String>) -> Self {
        self.texture_set_id = texture_set_id;
        self.sprite = sprite;
        self
    }

    /// Set the paint factor
    pub fn with_paint_factor(mut self, paint_factor: Option<f32>) -> Self {
        self.paint_factor = paint_factor;
        self
    }

    /// Chunk center as a world position on the ground plane.
    pub fn anchor(&self) -> Vec3 {
        Vec3::new(self.cx, 0.0, self.cz)
    }

    /// Serialized form, e.g. `bb|16|-16|texture|mat-1|set-a|oak|pf:0.5`.
    pub fn to_key_string(&self) -> String {
        self.to_string()
    }
}

/// Write one name part. `\` and `|` are escaped with a backslash, and a
/// name spelled like the placeholder gets a leading backslash, so distinct
/// parts never serialize alike.
fn write_part(f: &mut fmt::Formatter<'_>, part: Option<&str>) -> fmt::Result {
    let Some(part) = part else {
        return f.write_str(DEFAULT_PART);
    };
    if part == DEFAULT_PART {
        f.write_str("\\")?;
    }
    for c in part.chars() {
        if c == '\\' || c == '|' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    Ok(())
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}|", KEY_PREFIX, self.cx, self.cz, self.shape.as_str())?;
        write_part(f, Some(&self.material_uuid))?;
        f.write_str("|")?;
        write_part(f, self.texture_set_id.as_deref())?;
        f.write_str("|")?;
        write_part(f, self.sprite.as_deref())?;
        f.write_str("|")?;
        match self.paint_factor {
            Some(pf) => write!(f, "pf:{}", pf),
            None => f.write_str(NO_PAINT),
        }
    }
}

#[cfg(test)]
#[path = "chunk_key_tests.rs"]
mod tests;
