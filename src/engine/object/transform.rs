use crate::config::MIN_OBJECT_SCALE;
use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians. Applied about x, then y, then z.
    pub rotation: Vec3,
    /// Per axis scale. Components are kept at or above [`MIN_OBJECT_SCALE`] by the editor.
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_rotation_z(self.rotation.z)
            * Mat3::from_rotation_y(self.rotation.y)
            * Mat3::from_rotation_x(self.rotation.x)
    }

    /// Scale with every component clamped to [`MIN_OBJECT_SCALE`]
    pub fn clamped_scale(&self) -> Vec3 {
        self.scale.max(Vec3::splat(MIN_OBJECT_SCALE))
    }

    /// Converts a world space point into the local space of the primitive.
    ///
    /// _Note: must match `object_point` in `object_access.glsl`_
    pub fn world_to_local(&self, p: Vec3) -> Vec3 {
        self.rotation_matrix().transpose() * (p - self.position) / self.clamped_scale()
    }

    /// Factor correcting local space distances back to world space. Exact for uniform scale and
    /// a bound for non-uniform scale.
    pub fn distance_scale(&self) -> f32 {
        self.clamped_scale().min_element()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
