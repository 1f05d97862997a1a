/// Placement transform shared by instances and leaf primitives.
///
/// Every field is optional; missing or non-finite components resolve to
/// position [0,0,0], rotation [0,0,0] (XYZ euler, radians), scale [1,1,1].

use glam::{Quat, Vec3};

/// Position / rotation / scale as stored by the scene editor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// World (or parent-local) position
    pub position: Option<[f32; 3]>,
    /// Euler angles in radians, applied in XYZ order
    pub rotation: Option<[f32; 3]>,
    /// Per-axis scale
    pub scale: Option<[f32; 3]>,
}

fn resolve(values: Option<[f32; 3]>, fallback: f32) -> Vec3 {
    let v = values.unwrap_or([fallback; 3]);
    let pick = |c: f32| if c.is_finite() { c } else { fallback };
    Vec3::new(pick(v[0]), pick(v[1]), pick(v[2]))
}

impl Transform {
    /// Identity transform (all fields unset)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Transform with only a position
    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Some([x, y, z]),
            ..Self::default()
        }
    }

    /// Set the euler rotation
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Some([x, y, z]);
        self
    }

    /// Set the per-axis scale
    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Some([x, y, z]);
        self
    }

    /// Resolved position.
    pub fn position(&self) -> Vec3 {
        resolve(self.position, 0.0)
    }

    /// Resolved rotation as a quaternion (intrinsic X, then Y, then Z).
    pub fn rotation(&self) -> Quat {
        let r = resolve(self.rotation, 0.0);
        Quat::from_rotation_x(r.x) * Quat::from_rotation_y(r.y) * Quat::from_rotation_z(r.z)
    }

    /// Resolved per-axis scale.
    pub fn scale(&self) -> Vec3 {
        resolve(self.scale, 1.0)
    }

    /// Cube root of the absolute scale volume.
    ///
    /// A zero axis collapses the result to zero.
    pub fn uniform_scale(&self) -> f32 {
        let s = self.scale();
        (s.x * s.y * s.z).abs().cbrt()
    }
}
