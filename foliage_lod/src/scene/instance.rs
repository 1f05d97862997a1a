/// Placed instances of scene objects, and layers.

use super::transform::Transform;

/// A placement of a `SceneObject` in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInstance {
    /// Stable identifier
    pub uuid: String,
    /// Uuid of the placed object
    pub object_uuid: String,
    pub transform: Transform,
    pub visible: bool,
}

impl SceneInstance {
    /// Create a visible instance
    pub fn new(uuid: impl Into<String>, object_uuid: impl Into<String>, transform: Transform) -> Self {
        Self {
            uuid: uuid.into(),
            object_uuid: object_uuid.into(),
            transform,
            visible: true,
        }
    }

    /// Set visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// An editor layer; hidden layers hide every object assigned to them.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayer {
    pub id: String,
    pub visible: bool,
}

impl SceneLayer {
    /// Create a layer
    pub fn new(id: impl Into<String>, visible: bool) -> Self {
        Self { id: id.into(), visible }
    }
}
