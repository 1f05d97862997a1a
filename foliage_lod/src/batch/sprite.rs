/// Sprite parameters supplied by the host's texture system.

use glam::Vec2;
use rustc_hash::FxHashMap;

/// Per-sprite parameters affecting element size and placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInfo {
    /// Width / height of the sprite image
    pub aspect: f32,
    /// Attachment point in UV space, (0.5, 1.0) is bottom-centre
    pub anchor: Vec2,
    /// The renderer turns these elements toward the camera
    pub viewer_facing: bool,
}

impl Default for SpriteInfo {
    fn default() -> Self {
        Self {
            aspect: 1.0,
            anchor: Vec2::new(0.5, 1.0),
            viewer_facing: false,
        }
    }
}

impl SpriteInfo {
    /// Sprite with an aspect ratio and the default anchor
    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            aspect,
            ..Self::default()
        }
    }

    /// Set the anchor
    pub fn with_anchor(mut self, u: f32, v: f32) -> Self {
        self.anchor = Vec2::new(u, v);
        self
    }

    /// Set the viewer-facing flag
    pub fn with_viewer_facing(mut self, viewer_facing: bool) -> Self {
        self.viewer_facing = viewer_facing;
        self
    }

    /// Copy with non-finite or non-positive values replaced by defaults.
    pub fn sanitized(self) -> Self {
        let fallback = Self::default();
        let aspect = if self.aspect.is_finite() && self.aspect > 0.0 {
            self.aspect
        } else {
            fallback.aspect
        };
        let anchor = if self.anchor.is_finite() { self.anchor } else { fallback.anchor };
        Self { aspect, anchor, viewer_facing: self.viewer_facing }
    }
}

/// Source of sprite parameters, implemented by the host.
pub trait SpriteCatalog {
    /// Parameters of sprite `name` inside texture set `set_id`.
    ///
    /// `None` means the sprite is unknown; defaults are used.
    fn sprite(&self, set_id: Option<&str>, name: Option<&str>) -> Option<SpriteInfo>;
}

/// Catalog that knows no sprites.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteCatalog for NoSprites {
    fn sprite(&self, _set_id: Option<&str>, _name: Option<&str>) -> Option<SpriteInfo> {
        None
    }
}

/// In-memory sprite catalog.
///
/// Lookups without a sprite name fall back to the set's default sprite
/// (the first one inserted).
#[derive(Debug, Clone, Default)]
pub struct StaticSpriteCatalog {
    sets: FxHashMap<String, FxHashMap<String, SpriteInfo>>,
    defaults: FxHashMap<String, String>,
}

impl StaticSpriteCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprite
    pub fn insert(&mut self, set_id: impl Into<String>, name: impl Into<String>, info: SpriteInfo) {
        let set_id = set_id.into();
        let name = name.into();
        self.defaults.entry(set_id.clone()).or_insert_with(|| name.clone());
        self.sets.entry(set_id).or_default().insert(name, info);
    }

    /// Builder form of `insert`
    pub fn with_sprite(mut self, set_id: impl Into<String>, name: impl Into<String>, info: SpriteInfo) -> Self {
        self.insert(set_id, name, info);
        self
    }
}

impl SpriteCatalog for StaticSpriteCatalog {
    fn sprite(&self, set_id: Option<&str>, name: Option<&str>) -> Option<SpriteInfo> {
        let set_id = set_id?;
        let set = self.sets.get(set_id)?;
        let name = match name {
            Some(name) => name,
            None => self.defaults.get(set_id)?.as_str(),
        };
        set.get(name).copied()
    }
}

#[cfg(test)]
#[path = "sprite_tests.rs"]
mod tests;
